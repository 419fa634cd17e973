//! Clock port: Source of "today" for age computation.
//!
//! The evaluation date is the only time-dependent input to a screening
//! evaluation, so it is injected rather than read inside the domain.

use chrono::NaiveDate;

/// Trait for obtaining the current calendar date.
pub trait Clock: Send + Sync {
    /// The date against which ages are computed.
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
