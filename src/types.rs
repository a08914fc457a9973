//! Core shared types.
//!
//! Samples are kept in a single `nalgebra` matrix with one row per point so
//! that every component (sampler, estimator, scoring) can share the same
//! indexing scheme.

use nalgebra::DMatrix;

/// Dynamic N×2 matrix of `f64`: column 0 holds x, column 1 holds y.
pub type DataMatrix = DMatrix<f64>;

/// Column of the x-values in a [`DataMatrix`].
pub const X_COL: usize = 0;

/// Column of the y-values in a [`DataMatrix`].
pub const Y_COL: usize = 1;

/// Per-point inlier classification, one entry per data row.
pub type InlierMask = Vec<bool>;

/// Row indices flagged as inliers in `mask`.
pub fn inlier_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &inlier)| inlier.then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::inlier_indices;

    #[test]
    fn inlier_indices_follow_mask_order() {
        assert_eq!(inlier_indices(&[false, true, true, false, true]), vec![1, 2, 4]);
        assert!(inlier_indices(&[]).is_empty());
    }
}
