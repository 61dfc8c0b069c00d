//! Reference time for a projection run
//!
//! `now` is captured exactly once per run and threaded through every
//! calculation, together with the UTC offset that defines calendar days.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Milliseconds in a day
pub const DAY_MILLIS: i64 = 24 * 3600 * 1000;

/// Milliseconds in a week
pub const WEEK_MILLIS: i64 = 7 * DAY_MILLIS;

/// The single wall-clock reference of a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTime {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl ReferenceTime {
    /// Reference time with an explicit calendar offset
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Reference time where calendar days are UTC days
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `instant` in this run's offset
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Today's calendar date
    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    /// Whether `instant` falls on today's calendar date
    pub fn is_today(&self, instant: DateTime<Utc>) -> bool {
        self.local_date(instant) == self.today()
    }

    /// Whole calendar days from today until the day of `instant`
    pub fn days_until(&self, instant: DateTime<Utc>) -> i64 {
        (self.local_date(instant) - self.today()).num_days()
    }
}

// ============================================================================
// TESTS
// ============================================================================
