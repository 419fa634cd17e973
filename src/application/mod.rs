//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the screening evaluation use case.

mod screening;

pub use screening::{ScreeningReport, ScreeningService};
