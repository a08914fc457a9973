//! Polynomial estimator for 2D curve fitting.

use nalgebra::{DMatrix, DVector, SVD};

use crate::core::Estimator;
use crate::error::{Error, Result};
use crate::models::Polynomial;
use crate::types::{DataMatrix, X_COL, Y_COL};

/// Singular values below `RANK_TOLERANCE * σ_max` count as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Least-squares estimator for polynomials of a fixed order `k`.
///
/// Minimal samples hold `k + 1` points. The Vandermonde system is built on
/// normalized abscissae `t = (x - shift) / scale` and solved with an SVD, so
/// the normal equations are never formed. Coefficients are returned in the raw
/// monomial basis of `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialEstimator {
    order: usize,
}

impl PolynomialEstimator {
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    fn degenerate(&self) -> Error {
        Error::DegenerateSample { order: self.order }
    }
}

/// Centre and half-width of the sampled abscissae.
fn normalization(data: &DataMatrix, sample: &[usize]) -> (f64, f64) {
    let n = sample.len() as f64;
    let shift = sample.iter().map(|&i| data[(i, X_COL)]).sum::<f64>() / n;
    let scale = sample
        .iter()
        .map(|&i| (data[(i, X_COL)] - shift).abs())
        .fold(0.0, f64::max);
    // All abscissae equal: keep t = 0 and let the rank check flag it.
    let scale = if scale > 0.0 { scale } else { 1.0 };
    (shift, scale)
}

impl Estimator for PolynomialEstimator {
    type Model = Polynomial;

    fn sample_size(&self) -> usize {
        self.order.saturating_add(1)
    }

    fn is_valid_sample(&self, data: &DataMatrix, sample: &[usize]) -> bool {
        if sample.len() < self.sample_size() {
            return false;
        }
        if sample.iter().any(|&idx| idx >= data.nrows()) || data.ncols() < 2 {
            return false;
        }

        // A unique polynomial of order k needs k + 1 distinct abscissae.
        let mut xs: Vec<f64> = sample.iter().map(|&i| data[(i, X_COL)]).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        xs.len() >= self.sample_size()
    }

    fn estimate_model(&self, data: &DataMatrix, sample: &[usize]) -> Result<Self::Model> {
        let k = self.sample_size();
        if sample.len() < k || sample.iter().any(|&idx| idx >= data.nrows()) {
            return Err(self.degenerate());
        }

        let (shift, scale) = normalization(data, sample);

        let mut vandermonde = DMatrix::<f64>::zeros(sample.len(), k);
        let mut rhs = DVector::<f64>::zeros(sample.len());
        for (row, &idx) in sample.iter().enumerate() {
            let t = (data[(idx, X_COL)] - shift) / scale;
            let mut power = 1.0;
            for col in 0..k {
                vandermonde[(row, col)] = power;
                power *= t;
            }
            rhs[row] = data[(idx, Y_COL)];
        }

        let svd = SVD::new(vandermonde, true, true);
        let sigma_max = svd.singular_values.max();
        let sigma_min = svd.singular_values.min();
        if !sigma_max.is_finite() || sigma_max <= 0.0 || sigma_min <= RANK_TOLERANCE * sigma_max {
            return Err(self.degenerate());
        }

        let normalized = svd
            .solve(&rhs, RANK_TOLERANCE * sigma_max)
            .map_err(|_| self.degenerate())?;
        if normalized.iter().any(|c| !c.is_finite()) {
            return Err(self.degenerate());
        }

        Ok(Polynomial::from_normalized(&normalized, shift, scale))
    }
}
