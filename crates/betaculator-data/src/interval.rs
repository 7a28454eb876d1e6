//! Sampling interval of a price history.

use crate::error::DataError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval shared by the security and market series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One observation per trading day.
    Daily,
    /// One observation per calendar week, keyed by its Monday.
    #[default]
    Weekly,
    /// One observation per calendar month, keyed by its first day.
    Monthly,
}

impl Interval {
    /// All supported intervals.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Human readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Provider code used by quote services (`1d`, `1wk`, `1mo`).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }

    /// Date that identifies the period containing `date`.
    ///
    /// Daily periods are the date itself; weekly periods start on Monday and
    /// monthly periods on the first of the month.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interval {
    type Err = DataError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "1d" => Ok(Self::Daily),
            "weekly" | "week" | "1wk" => Ok(Self::Weekly),
            "monthly" | "month" | "1mo" => Ok(Self::Monthly),
            other => Err(DataError::UnknownInterval(other.to_string())),
        }
    }
}
