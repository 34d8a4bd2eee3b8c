//! Time source and whole-day arithmetic.
//!
//! Pacing only reads "now" in the CPM proration branch, but it does so
//! through a [`Clock`] so callers can pin it for reproducible results.

use chrono::{DateTime, NaiveDate, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Clock pinned to UTC midnight of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date_start(date))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// UTC midnight at the start of a calendar date.
pub fn date_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// Ceiling of the day count between two instants.
///
/// Any partial day counts as a whole one (`0.1` days -> `1`). Negative spans
/// round toward zero, so an instant slightly before `from` yields `0`.
pub fn ceil_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let ms = (to - from).num_milliseconds();
    let whole = ms.div_euclid(MS_PER_DAY);
    if ms.rem_euclid(MS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Whole days between two calendar dates.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
