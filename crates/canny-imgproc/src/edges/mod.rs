//! Edge strength, non-maximum suppression and hysteresis.

mod hysteresis;
pub use hysteresis::*;
pub(crate) use hysteresis::check_thresholds;

mod nms;
pub use nms::*;

mod strength;
pub use strength::*;
