//! Filter operations
//!
//! Gaussian kernel synthesis and replicated-border separable smoothing.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;

pub use kernels::{gaussian_kernel, GaussianKernel};
