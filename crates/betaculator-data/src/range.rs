//! Historical window covered by an estimation.

use crate::error::{DataError, Result};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weeks per year used when converting a trailing window into dates.
pub const WEEKS_PER_YEAR: i64 = 52;

/// Half-open date range `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidDateRange`] unless `start` is strictly before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(DataError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range of `years` years ending at `end`.
    ///
    /// The window spans `52 * years + 1` weeks so that a weekly series over it
    /// yields `52 * years` returns.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidDateRange`] if the span or the start date
    /// falls outside the calendar.
    pub fn trailing_years(end: NaiveDate, years: u32) -> Result<Self> {
        let weeks = WEEKS_PER_YEAR * i64::from(years) + 1;
        let start = TimeDelta::try_weeks(weeks)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or(DataError::InvalidDateRange {
                start: NaiveDate::MIN,
                end,
            })?;
        Self::new(start, end)
    }

    /// First date of the range (inclusive).
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the range (exclusive).
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
