//! RANSAC configuration for polynomial fitting.
//!
//! Settings are validated once when a fitter is built and are not changed
//! afterwards.

use crate::error::{Error, Result};

/// Main configuration object for the polynomial RANSAC pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RansacSettings {
    /// Number of sample/fit/evaluate trials. Must be positive.
    pub trial_count: usize,
    /// Maximum absolute residual (exclusive) for a point to count as an inlier.
    pub tolerance: f64,
    /// A trial is only accepted when its inlier count exceeds
    /// `min_inlier_fraction * N`. Must lie in \[0, 1).
    pub min_inlier_fraction: f64,
    /// Fixed seed for the random stream. `None` seeds from OS entropy on every fit.
    pub seed: Option<u64>,
    /// Refit the winning model on its full consensus set after the trial loop.
    pub refit_on_inliers: bool,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            trial_count: 100,
            tolerance: 3.0,
            min_inlier_fraction: 0.7,
            seed: None,
            refit_on_inliers: true,
        }
    }
}

impl RansacSettings {
    /// Build validated settings from the three core parameters.
    pub fn new(trial_count: usize, tolerance: f64, min_inlier_fraction: f64) -> Result<Self> {
        let settings = Self {
            trial_count,
            tolerance,
            min_inlier_fraction,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Use a fixed seed so repeated fits draw the same samples.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the final least-squares refit.
    pub fn with_refit_on_inliers(mut self, refit_on_inliers: bool) -> Self {
        self.refit_on_inliers = refit_on_inliers;
        self
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.trial_count == 0 {
            return Err(Error::InvalidSettings {
                field: "trial_count",
                reason: "must be positive".to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidSettings {
                field: "tolerance",
                reason: format!("must be a positive finite number, got {}", self.tolerance),
            });
        }
        if !(0.0..1.0).contains(&self.min_inlier_fraction) {
            return Err(Error::InvalidSettings {
                field: "min_inlier_fraction",
                reason: format!("must lie in [0, 1), got {}", self.min_inlier_fraction),
            });
        }
        Ok(())
    }
}
