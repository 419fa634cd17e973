//! Adapters layer: Concrete implementations of ports and ambient plumbing.
//!
//! - `clock`: system and fixed clocks
//! - `sanitize`: PII filtering for logs

pub mod clock;
pub mod sanitize;

pub use clock::{FixedClock, SystemClock};
