//! Estimators for curve models.
//!
//! Only polynomial models of a fixed order are provided; the
//! [`Estimator`](crate::core::Estimator) trait is the extension point for
//! other curve families.

pub mod polynomial;

pub use polynomial::PolynomialEstimator;
