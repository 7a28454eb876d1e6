//! Estimation requests.

use crate::error::Result;
use crate::index::MarketIndexTable;
use betaculator_data::{DateRange, Interval};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trailing window length used when no dates are given.
pub const DEFAULT_TRAILING_YEARS: u32 = 2;

/// Historical window of a request, validated only when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Window {
    /// Explicit `[start, end)` dates.
    Between {
        /// First date (inclusive)
        start: NaiveDate,
        /// Last date (exclusive)
        end: NaiveDate,
    },
    /// `years` years ending at `end`.
    Trailing {
        /// Number of years
        years: u32,
        /// Last date (exclusive)
        end: NaiveDate,
    },
}

impl Window {
    /// Resolve to a concrete date range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BetaError::InvalidDateRange`] unless start is strictly
    /// before end.
    pub fn resolve(&self) -> Result<DateRange> {
        let range = match *self {
            Self::Between { start, end } => DateRange::new(start, end)?,
            Self::Trailing { years, end } => DateRange::trailing_years(end, years)?,
        };
        Ok(range)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Between { start, end } => write!(f, "{start} to {end}"),
            Self::Trailing { years, end } => write!(f, "{years}y to {end}"),
        }
    }
}

/// Immutable description of one beta estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionRequest {
    /// Security ticker (regressand)
    pub security: String,
    /// Market index ticker (regressor)
    pub market: String,
    /// Historical window
    pub window: Window,
    /// Sampling interval of both price histories
    pub interval: Interval,
}

impl RegressionRequest {
    /// Request over explicit dates at the default weekly interval.
    pub fn new(
        security: impl Into<String>,
        market: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            security: security.into(),
            market: market.into(),
            window: Window::Between { start, end },
            interval: Interval::default(),
        }
    }

    /// Request over the `years` years ending at `end`.
    pub fn trailing(
        security: impl Into<String>,
        market: impl Into<String>,
        years: u32,
        end: NaiveDate,
    ) -> Self {
        Self {
            security: security.into(),
            market: market.into(),
            window: Window::Trailing { years, end },
            interval: Interval::default(),
        }
    }

    /// Request whose market index is inferred from the security's currency.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BetaError::UnknownCurrency`] when `indices` has no entry.
    pub fn for_currency(
        security: impl Into<String>,
        currency: &str,
        indices: &MarketIndexTable,
        window: Window,
    ) -> Result<Self> {
        Ok(Self {
            security: security.into(),
            market: indices.market_for(currency)?.to_string(),
            window,
            interval: Interval::default(),
        })
    }

    /// Same request at a different sampling interval.
    #[must_use]
    pub fn with_interval(self, interval: Interval) -> Self {
        Self { interval, ..self }
    }

    /// Validated date range of the request.
    ///
    /// # Errors
    ///
    /// See [`Window::resolve`].
    pub fn resolve_range(&self) -> Result<DateRange> {
        self.window.resolve()
    }
}
