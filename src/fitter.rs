//! Stateful robust polynomial fitter.
//!
//! [`PolynomialRansac`] owns its settings, the last accepted data set and the
//! last fit result. Each piece of state is replaced as a whole, never patched:
//! - `set_data` stores both columns or neither;
//! - `fit` either publishes a complete [`FitResult`], clears it on
//!   [`Error::NoFitFound`], or leaves it untouched when its preconditions fail.

use num_traits::ToPrimitive;
use tracing::debug;

use crate::api::{estimate_polynomial, FitResult};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::settings::RansacSettings;

/// Robust polynomial fitter with a `set_data` / `fit` / accessor interface.
///
/// ```rust
/// use inlier_poly::PolynomialRansac;
///
/// let mut ransac = PolynomialRansac::with_params(100, 3.0, 0.7).unwrap();
/// assert!(ransac.coefficients().is_none());
///
/// let x: Vec<i32> = (1..=50).collect();
/// let y: Vec<f64> = x.iter().map(|&x| 0.5 * x as f64 - 2.0).collect();
/// ransac.set_data(&x, &y).unwrap();
/// ransac.fit(1).unwrap();
///
/// let coefficients = ransac.coefficients().unwrap();
/// assert!((coefficients[0] + 2.0).abs() < 1e-6);
/// assert!(ransac.inlier_mask().unwrap().iter().all(|&inlier| inlier));
/// ```
#[derive(Debug, Clone)]
pub struct PolynomialRansac {
    settings: RansacSettings,
    data: Option<Dataset>,
    result: Option<FitResult>,
}

impl PolynomialRansac {
    /// Create a fitter from validated settings.
    pub fn new(settings: RansacSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            data: None,
            result: None,
        })
    }

    /// Create a fitter from the three core parameters with default extras.
    pub fn with_params(
        trial_count: usize,
        tolerance: f64,
        min_inlier_fraction: f64,
    ) -> Result<Self> {
        Self::new(RansacSettings::new(
            trial_count,
            tolerance,
            min_inlier_fraction,
        )?)
    }

    pub fn settings(&self) -> &RansacSettings {
        &self.settings
    }

    /// Validate and store the data points.
    ///
    /// On failure the previously stored data set (if any) is kept. On success
    /// any previous fit result is discarded, since its inlier mask describes
    /// other data.
    pub fn set_data<X, Y>(&mut self, x: &[X], y: &[Y]) -> Result<()>
    where
        X: ToPrimitive,
        Y: ToPrimitive,
    {
        let dataset = Dataset::new(x, y)?;
        debug!(points = dataset.len(), "data set accepted");
        self.data = Some(dataset);
        self.result = None;
        Ok(())
    }

    /// Currently stored data set.
    pub fn data(&self) -> Option<&Dataset> {
        self.data.as_ref()
    }

    /// Fit a polynomial of order `order` to the stored data.
    ///
    /// `UninitializedData` and `InsufficientData` leave the previous result in
    /// place; `NoFitFound` clears it.
    pub fn fit(&mut self, order: usize) -> Result<&FitResult> {
        let data = self.data.as_ref().ok_or(Error::UninitializedData)?;
        data.ensure_fits_order(order)?;

        match estimate_polynomial(data, order, &self.settings) {
            Ok(result) => Ok(&*self.result.insert(result)),
            Err(err) => {
                if matches!(err, Error::NoFitFound { .. }) {
                    self.result = None;
                }
                Err(err)
            }
        }
    }

    /// Full result of the last successful fit.
    pub fn result(&self) -> Option<&FitResult> {
        self.result.as_ref()
    }

    /// Coefficients of the last successful fit, ascending power order.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.result.as_ref().map(FitResult::coefficients)
    }

    /// Inlier flags of the last successful fit.
    pub fn inlier_mask(&self) -> Option<&[bool]> {
        self.result.as_ref().map(|r| r.inlier_mask.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(trials: usize, tolerance: f64, fraction: f64, seed: u64) -> PolynomialRansac {
        PolynomialRansac::new(
            RansacSettings::new(trials, tolerance, fraction)
                .unwrap()
                .with_seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn fit_before_set_data_is_uninitialized() {
        let mut ransac = seeded(10, 1.0, 0.5, 1);
        assert_eq!(ransac.fit(1).unwrap_err(), Error::UninitializedData);
        assert!(ransac.result().is_none());
    }

    #[test]
    fn invalid_settings_are_rejected_at_construction() {
        assert!(matches!(
            PolynomialRansac::with_params(10, 1.0, 1.5),
            Err(Error::InvalidSettings { .. })
        ));
    }

    #[test]
    fn failed_set_data_keeps_previous_data() {
        let mut ransac = seeded(10, 1.0, 0.5, 1);
        ransac.set_data(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();

        assert!(ransac.set_data(&[1.0, 2.0], &[f64::NAN, 2.0]).is_err());
        assert!(ransac.set_data(&[1.0, 2.0], &[1.0]).is_err());
        assert_eq!(ransac.data().map(Dataset::len), Some(3));
    }

    #[test]
    fn insufficient_data_keeps_previous_result() {
        let mut ransac = seeded(20, 0.5, 0.5, 2);
        ransac
            .set_data(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let before = ransac.fit(1).unwrap().clone();

        let err = ransac.fit(4).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientData {
                order: 4,
                required: 5,
                available: 4
            }
        );
        assert_eq!(ransac.result(), Some(&before));
    }

    #[test]
    fn no_fit_found_clears_previous_result() {
        let mut ransac = seeded(20, 0.5, 0.5, 2);
        ransac
            .set_data(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        ransac.fit(1).unwrap();
        assert!(ransac.coefficients().is_some());

        // A constant cannot cover more than one point of the line.
        let err = ransac.fit(0).unwrap_err();
        assert_eq!(err, Error::NoFitFound { trials: 20 });
        assert!(ransac.coefficients().is_none());
        assert!(ransac.inlier_mask().is_none());
    }

    #[test]
    fn new_data_discards_previous_result() {
        let mut ransac = seeded(20, 0.5, 0.5, 2);
        ransac.set_data(&[0, 1, 2, 3], &[1, 2, 3, 4]).unwrap();
        ransac.fit(1).unwrap();
        ransac.set_data(&[0, 1, 2], &[0, 0, 0]).unwrap();
        assert!(ransac.result().is_none());
    }
}
