//! Validated (x, y) sample storage.

use nalgebra::DMatrixView;
use num_traits::ToPrimitive;

use crate::error::{Axis, Error, Result};
use crate::types::{DataMatrix, X_COL, Y_COL};

/// Immutable set of 2D samples.
///
/// Built only through [`Dataset::new`], which checks both columns before
/// storing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: DataMatrix,
}

impl Dataset {
    /// Validate and copy two numeric sequences into an N×2 data matrix.
    ///
    /// Any primitive integer or float type is accepted. Values that cannot be
    /// represented as a finite `f64` are rejected with
    /// [`Error::InvalidInputType`]; sequences of unequal length with
    /// [`Error::LengthMismatch`].
    pub fn new<X, Y>(x: &[X], y: &[Y]) -> Result<Self>
    where
        X: ToPrimitive,
        Y: ToPrimitive,
    {
        let xs = to_finite(Axis::X, x)?;
        let ys = to_finite(Axis::Y, y)?;
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }

        let mut points = DataMatrix::zeros(xs.len(), 2);
        for (i, (x, y)) in xs.into_iter().zip(ys).enumerate() {
            points[(i, X_COL)] = x;
            points[(i, Y_COL)] = y;
        }
        Ok(Self { points })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that there are at least `order + 1` points.
    ///
    /// An order whose point count does not fit in `usize` is never satisfiable
    /// and reports `required` as `usize::MAX`.
    pub fn ensure_fits_order(&self, order: usize) -> Result<()> {
        match order.checked_add(1) {
            Some(required) if self.len() >= required => Ok(()),
            required => Err(Error::InsufficientData {
                order,
                required: required.unwrap_or(usize::MAX),
                available: self.len(),
            }),
        }
    }

    /// Underlying N×2 matrix shared with the RANSAC components.
    pub fn points(&self) -> &DataMatrix {
        &self.points
    }

    pub fn x(&self) -> DMatrixView<'_, f64> {
        self.points.columns(X_COL, 1)
    }

    pub fn y(&self) -> DMatrixView<'_, f64> {
        self.points.columns(Y_COL, 1)
    }
}

fn to_finite<T: ToPrimitive>(axis: Axis, values: &[T]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| match v.to_f64() {
            Some(f) if f.is_finite() => Ok(f),
            _ => Err(Error::InvalidInputType { axis, index }),
        })
        .collect()
}
