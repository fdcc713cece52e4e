//! Date source for anything that depends on "today".
//!
//! The estimator never reads the system clock directly; callers pass a
//! [`Clock`] so projections are reproducible in tests.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// Current calendar date in the bookkeeper's local time
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// `None` when the date does not exist
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
