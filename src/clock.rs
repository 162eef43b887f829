//! Source of the current time.
//!
//! Open shifts (no clock-out yet) accrue until "now". The engine never reads
//! the system clock directly; callers pass a [`Clock`] so calculations are
//! reproducible in tests.

use chrono::{Local, NaiveDateTime};

/// Provides the current local date and time.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// A [`Clock`] backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A [`Clock`] frozen at a fixed instant.
///
/// # Example
///
/// ```
/// use payroll_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDateTime;
///
/// let instant = NaiveDateTime::parse_from_str("2025-10-15 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}
