//! High-level stateless API.
//!
//! These functions assemble the RANSAC pipeline for polynomial models and run
//! a single fit. [`PolynomialRansac`](crate::fitter::PolynomialRansac) wraps
//! them behind a stateful `set_data` / `fit` interface.

use num_traits::ToPrimitive;

use crate::core::Ransac;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::estimators::PolynomialEstimator;
use crate::models::Polynomial;
use crate::optimisers::LeastSquaresOptimizer;
use crate::samplers::UniformRandomSampler;
use crate::scoring::{InlierCountScoring, Score};
use crate::settings::RansacSettings;
use crate::types::{inlier_indices, InlierMask};

/// Result of a robust polynomial fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// The published model, refit on the whole consensus set.
    pub model: Polynomial,
    /// Inlier flags of the winning trial, one per data point.
    pub inlier_mask: InlierMask,
    /// Score of the winning trial.
    pub score: Score,
    /// Number of trials performed.
    pub iterations: usize,
    /// Trials skipped because their sample was degenerate.
    pub degenerate_trials: usize,
}

impl FitResult {
    /// Coefficients in ascending power order.
    pub fn coefficients(&self) -> &[f64] {
        self.model.coefficients()
    }

    pub fn inlier_count(&self) -> usize {
        self.score.inlier_count
    }

    /// Indices of the inlier points.
    pub fn inlier_indices(&self) -> Vec<usize> {
        inlier_indices(&self.inlier_mask)
    }
}

/// Robustly fit a polynomial of the given order to a validated data set.
///
/// # Arguments
/// * `dataset` - Validated (x, y) samples
/// * `order` - Polynomial order `k`; at least `k + 1` points are required
/// * `settings` - RANSAC settings, validated before use
///
/// # Returns
/// `FitResult` containing the refit polynomial, the inlier mask and
/// diagnostics, or `NoFitFound` if no trial reached the consensus threshold.
pub fn estimate_polynomial(
    dataset: &Dataset,
    order: usize,
    settings: &RansacSettings,
) -> Result<FitResult> {
    settings.validate()?;
    dataset.ensure_fits_order(order)?;

    let estimator = PolynomialEstimator::new(order);
    let sampler = UniformRandomSampler::from_optional_seed(settings.seed);
    let scoring = InlierCountScoring::polynomial(settings.tolerance);
    let final_optimizer = settings
        .refit_on_inliers
        .then(|| LeastSquaresOptimizer::new(PolynomialEstimator::new(order)));

    let mut ransac = Ransac::new(
        settings.clone(),
        estimator,
        sampler,
        scoring,
        final_optimizer,
    );

    #[cfg(feature = "parallel")]
    let consensus = ransac.run_parallel(dataset.points())?.clone();
    #[cfg(not(feature = "parallel"))]
    let consensus = ransac.run(dataset.points())?.clone();

    Ok(FitResult {
        model: consensus.model,
        inlier_mask: consensus.inlier_mask,
        score: consensus.score,
        iterations: ransac.iteration,
        degenerate_trials: ransac.degenerate_trials,
    })
}

/// Validate raw sequences and fit them in one call.
///
/// # Example
///
/// ```rust
/// use inlier_poly::{fit_polynomial, RansacSettings};
///
/// let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
/// let mut y: Vec<f64> = x.iter().map(|x| 1.0 + 2.0 * x).collect();
/// y[5] = 100.0;
///
/// let settings = RansacSettings::new(50, 0.5, 0.6).unwrap().with_seed(1);
/// let result = fit_polynomial(&x, &y, 1, Some(settings)).unwrap();
/// assert!(!result.inlier_mask[5]);
/// assert!((result.coefficients()[1] - 2.0).abs() < 1e-6);
/// ```
pub fn fit_polynomial<X, Y>(
    x: &[X],
    y: &[Y],
    order: usize,
    settings_opt: Option<RansacSettings>,
) -> Result<FitResult>
where
    X: ToPrimitive,
    Y: ToPrimitive,
{
    let dataset = Dataset::new(x, y)?;
    let settings = settings_opt.unwrap_or_default();
    estimate_polynomial(&dataset, order, &settings)
}
