//! Scoring primitives.
//!
//! This module provides the score type and the RANSAC-style inlier-count
//! scoring that plugs into the generic `Scoring` trait from `core`.

use std::fmt;
use std::marker::PhantomData;

use crate::core::Scoring;
use crate::models::Polynomial;
use crate::types::{DataMatrix, InlierMask, X_COL, Y_COL};

/// Number of points supporting a hypothesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    pub inlier_count: usize,
}

impl Score {
    pub fn new(inlier_count: usize) -> Self {
        Self { inlier_count }
    }
}

/// Residual function `(data, model, row) -> |residual|`.
pub type ResidualFn<M> = fn(&DataMatrix, &M, usize) -> f64;

/// RANSAC-style scoring that counts inliers using a residual function.
///
/// A point is an inlier iff its residual is strictly below the threshold.
/// The residual function may be any closure; the default type parameter
/// names the plain function pointer used by the built-in pipelines.
pub struct InlierCountScoring<M, F = ResidualFn<M>>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    threshold: f64,
    residual_fn: F,
    _marker: PhantomData<M>,
}

impl<M, F> InlierCountScoring<M, F>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    pub fn new(threshold: f64, residual_fn: F) -> Self {
        Self {
            threshold,
            residual_fn,
            _marker: PhantomData,
        }
    }
}

impl InlierCountScoring<Polynomial> {
    /// Scoring on the vertical residual `|p(x) - y|`.
    pub fn polynomial(threshold: f64) -> Self {
        Self::new(threshold, |data, model: &Polynomial, row| {
            model.residual(data[(row, X_COL)], data[(row, Y_COL)])
        })
    }
}

impl<M, F> fmt::Debug for InlierCountScoring<M, F>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlierCountScoring")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl<M, F> Scoring<M> for InlierCountScoring<M, F>
where
    F: Fn(&DataMatrix, &M, usize) -> f64,
{
    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn score(&self, data: &DataMatrix, model: &M, mask_out: &mut InlierMask) -> Score {
        mask_out.clear();
        mask_out.extend(
            (0..data.nrows()).map(|row| (self.residual_fn)(data, model, row) < self.threshold),
        );
        Score::new(mask_out.iter().filter(|&&inlier| inlier).count())
    }
}

#[cfg(test)]
mod tests {
    use super::{InlierCountScoring, Score};
    use crate::core::Scoring;
    use crate::models::Polynomial;
    use crate::types::DataMatrix;

    #[derive(Clone, Debug)]
    struct UnitModel;

    #[test]
    fn inlier_count_scoring_counts_correctly() {
        // Data matrix where each row contains a single scalar we treat as a residual.
        let data = DataMatrix::from_column_slice(5, 1, &[0.1, 0.4, 0.6, 1.0, 0.3]);

        let scoring = InlierCountScoring::new(0.5, |d: &DataMatrix, _m: &UnitModel, row: usize| {
            d[(row, 0)]
        });
        let mut mask = Vec::new();
        let s: Score = scoring.score(&data, &UnitModel, &mut mask);

        assert_eq!(s.inlier_count, 3);
        assert_eq!(mask, vec![true, true, false, false, true]);
    }

    #[test]
    fn residual_equal_to_threshold_is_an_outlier() {
        let data = DataMatrix::from_row_slice(3, 2, &[0.0, 0.5, 1.0, -0.5, 2.0, 0.25]);
        let scoring = InlierCountScoring::polynomial(0.5);
        let model = Polynomial::from_slice(&[0.0]);

        let mut mask = vec![true; 10];
        let s = scoring.score(&data, &model, &mut mask);
        assert_eq!(mask, vec![false, false, true]);
        assert_eq!(s, Score::new(1));
        assert_eq!(scoring.threshold(), 0.5);
    }

    #[test]
    fn residual_closure_may_capture_state() {
        let data = DataMatrix::from_row_slice(4, 2, &[0.0, 1.0, 1.0, 2.0, 2.0, 3.5, 3.0, 4.0]);
        let offset = 1.0;
        let scoring = InlierCountScoring::new(0.25, move |d: &DataMatrix, m: &Polynomial, row: usize| {
            (m.evaluate(d[(row, 0)]) + offset - d[(row, 1)]).abs()
        });

        let mut mask = Vec::new();
        let s = scoring.score(&data, &Polynomial::from_slice(&[0.0, 1.0]), &mut mask);
        assert_eq!(mask, vec![true, true, false, true]);
        assert_eq!(s, Score::new(3));
    }
}
