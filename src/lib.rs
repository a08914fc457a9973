//! # Inlier-poly - Robust Polynomial Fitting with RANSAC
//!
//! `inlier-poly` fits a polynomial of order `k` to noisy 2D samples while
//! tolerating an unknown fraction of outliers. Every trial draws `k + 1`
//! random points, fits the interpolating polynomial, and counts the points
//! within a residual tolerance. The best consensus set is refit by least
//! squares once all trials have run.
//!
//! ## Quick Start
//!
//! ```rust
//! use inlier_poly::{PolynomialRansac, RansacSettings};
//!
//! let x: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
//! let mut y: Vec<f64> = x.iter().map(|x| 1.0 - x + 0.2 * x * x).collect();
//! y[3] += 25.0;
//! y[17] -= 40.0;
//!
//! let settings = RansacSettings::new(200, 0.1, 0.5).unwrap().with_seed(7);
//! let mut ransac = PolynomialRansac::new(settings).unwrap();
//! ransac.set_data(&x, &y).unwrap();
//! ransac.fit(2).unwrap();
//!
//! let mask = ransac.inlier_mask().unwrap();
//! assert!(!mask[3] && !mask[17]);
//! assert!((ransac.coefficients().unwrap()[2] - 0.2).abs() < 1e-6);
//! ```
//!
//! ## Extending the Library
//!
//! The pipeline in [`core`](crate::core) is generic over its components:
//!
//! - **[`Estimator`](crate::core::Estimator)**: builds a model from a sample of rows
//! - **[`Sampler`](crate::core::Sampler)**: draws the sample of each trial
//! - **[`Scoring<M>`](crate::core::Scoring)**: classifies every point against a model
//! - **[`LocalOptimizer<M>`](optimisers::LocalOptimizer)**: refines the winner
//!
//! ## Modules
//!
//! - **[`api`]**: one-shot fitting functions and [`FitResult`]
//! - **[`fitter`]**: the stateful [`PolynomialRansac`] fitter
//! - **[`core`](crate::core)**: core traits and the [`Ransac`](crate::core::Ransac) pipeline
//! - **[`dataset`]**: validated sample storage
//! - **[`estimators`]**, **[`samplers`]**, **[`scoring`]**, **[`optimisers`]**:
//!   built-in components
//! - **[`settings`]**: configuration
//!
//! ## Features
//!
//! - `parallel`: evaluate trials on the rayon thread pool (same results as
//!   the sequential loop for a given seed)
//! - `serde`: `Serialize`/`Deserialize` for [`RansacSettings`]

pub mod api;
pub mod core;
pub mod dataset;
pub mod error;
pub mod estimators;
pub mod fitter;
pub mod models;
pub mod optimisers;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod types;
pub mod utils;

// Re-export high-level API
pub use api::{estimate_polynomial, fit_polynomial, FitResult};
pub use fitter::PolynomialRansac;

// Re-export core traits for easy access
pub use crate::core::{Consensus, Estimator, Ransac, Sampler, Scoring};

pub use dataset::Dataset;
pub use error::{Axis, Error, Result};
pub use models::Polynomial;
pub use settings::RansacSettings;
