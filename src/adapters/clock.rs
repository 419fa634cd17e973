//! Clock adapters: system local date and a fixed date.

use chrono::NaiveDate;

use crate::ports::Clock;

/// Reads the local calendar date from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always returns the same date. Used for reproducible runs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Parse a `YYYY-MM-DD` date.
    ///
    /// # Errors
    /// Returns the chrono parse error for malformed input.
    pub fn parse(date: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map(Self::new)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}
