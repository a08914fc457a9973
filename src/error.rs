//! Error types for robust polynomial fitting.
//!
//! Every failure the fitter can report is a variant of [`Error`]; nothing is
//! printed from inside the library.

use std::fmt;

/// Which input column a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Errors that can occur while configuring the fitter or running a fit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// `fit` was requested before any data set was accepted.
    #[error("no data available; provide the data points with `set_data` first")]
    UninitializedData,

    /// An input element is not a finite real number.
    #[error("invalid {axis} value at index {index}: elements must be finite real numbers")]
    InvalidInputType {
        /// Column holding the offending value
        axis: Axis,
        /// Position of the offending value
        index: usize,
    },

    /// The x and y sequences differ in length.
    #[error("x and y must have the same length [x: {x_len}, y: {y_len}]")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// The data set has fewer points than the polynomial order requires.
    #[error("a polynomial of order {order} needs at least {required} points, got {available}")]
    InsufficientData {
        order: usize,
        required: usize,
        available: usize,
    },

    /// A sample cannot determine a unique polynomial of the requested order.
    ///
    /// Raised per trial and recovered by the trial loop, so `fit` never
    /// returns it.
    #[error("sample cannot determine a unique polynomial of order {order}")]
    DegenerateSample { order: usize },

    /// No trial reached the consensus threshold.
    #[error("unable to fit the data points with the current settings ({trials} trials)")]
    NoFitFound { trials: usize },

    /// A configuration value is outside its valid range.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings {
        field: &'static str,
        reason: String,
    },
}

/// Result type for robust polynomial fitting.
pub type Result<T> = std::result::Result<T, Error>;
