//! Polynomial model produced by the estimator.

use nalgebra::DVector;

/// Polynomial `c0 + c1·x + … + ck·x^k` with coefficients in ascending power order.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: DVector<f64>,
}

impl Polynomial {
    pub fn new(coefficients: DVector<f64>) -> Self {
        debug_assert!(!coefficients.is_empty(), "a polynomial needs at least one coefficient");
        Self { coefficients }
    }

    pub fn from_slice(coefficients: &[f64]) -> Self {
        Self::new(DVector::from_column_slice(coefficients))
    }

    /// Polynomial order `k` (number of coefficients minus one).
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice()
    }

    /// Evaluate at `x` using Horner's scheme.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// Absolute vertical residual `|p(x) - y|`.
    pub fn residual(&self, x: f64, y: f64) -> f64 {
        (self.evaluate(x) - y).abs()
    }

    /// Rewrite a polynomial in `t = (x - shift) / scale` as one in `x`.
    ///
    /// `normalized` holds the coefficients in `t`, ascending. The result is
    /// built by Horner composition: `q ← q·(x - shift)/scale + c_j`.
    pub(crate) fn from_normalized(normalized: &DVector<f64>, shift: f64, scale: f64) -> Self {
        let k = normalized.len();
        let mut out = DVector::<f64>::zeros(k);
        for &c in normalized.iter().rev() {
            // out ← out · (x - shift) / scale
            for i in (0..k).rev() {
                let lower = if i > 0 { out[i - 1] } else { 0.0 };
                out[i] = (lower - shift * out[i]) / scale;
            }
            out[0] += c;
        }
        Self::new(out)
    }
}
