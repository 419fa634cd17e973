//! Ports layer: Trait definitions for external inputs.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the screening logic and its environment.

mod clock;

pub use clock::Clock;
