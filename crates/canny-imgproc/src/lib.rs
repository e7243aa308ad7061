#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod border;

/// canny edge detection pipeline module.
pub mod canny;

/// edge strength, suppression and hysteresis module.
pub mod edges;

/// image filtering module.
pub mod filter;

/// image derivatives module.
pub mod gradient;

/// module containing parallization utilities.
pub mod parallel;
