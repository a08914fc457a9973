//! Sampling strategies.
//!
//! Samplers implement the shared [`Sampler`](crate::core::Sampler) trait and
//! draw the row indices each trial fits its hypothesis from.

pub mod uniform;

pub use uniform::UniformRandomSampler;
