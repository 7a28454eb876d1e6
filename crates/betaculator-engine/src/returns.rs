//! Return Series Builder
//!
//! Turns two adjusted-close histories into paired percentage returns.
//!
//! Each series is differenced on its own: `r[i] = (p[i] / p[i-1] - 1) * 100`.
//! The two return series are then matched observation by observation. A pair
//! survives only when both returns end on the same date *and* start on the
//! same date; a date missing from one calendar therefore knocks out the
//! return spanning it on the other side, exactly as if both price series had
//! been laid on a shared calendar before differencing. Pairs with a
//! non-finite return on either side (zero or missing prices) are dropped too.

use crate::error::{EstimationError, Result};
use betaculator_data::PriceSeries;
use chrono::NaiveDate;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Minimum number of aligned pairs a regression needs.
pub const MIN_OBSERVATIONS: usize = 2;

/// Percentage change from `previous` to `current`.
///
/// Not finite when `previous` is zero or either price is NaN.
pub fn percentage_change(previous: f64, current: f64) -> f64 {
    (current / previous - 1.0) * 100.0
}

/// Return over one sampling period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    /// Date of the price the return is measured from.
    pub from: NaiveDate,
    /// Date of the price the return is measured to.
    pub date: NaiveDate,
    /// Return in percent.
    pub value: f64,
}

/// Period-over-period percentage returns of one instrument.
///
/// Always one element shorter than its source prices. Non-finite values are
/// kept here and only dropped during alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    symbol: String,
    observations: Vec<ReturnObservation>,
}

impl ReturnSeries {
    /// Difference a price series.
    pub fn from_prices(prices: &PriceSeries) -> Self {
        let observations = prices
            .points()
            .windows(2)
            .map(|pair| ReturnObservation {
                from: pair[0].date,
                date: pair[1].date,
                value: percentage_change(pair[0].price, pair[1].price),
            })
            .collect();

        Self {
            symbol: prices.symbol().to_string(),
            observations,
        }
    }

    /// Ticker symbol of the source prices.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Observations in date order.
    pub fn observations(&self) -> &[ReturnObservation] {
        &self.observations
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observation end dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Return values in percent.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }
}

/// Why return observations were left out of the aligned pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Security returns ending on a date the market series lacks.
    pub security_only: usize,
    /// Market returns ending on a date the security series lacks.
    pub market_only: usize,
    /// Same end date, but one side spans a calendar gap the other does not.
    pub period_mismatch: usize,
    /// Matching periods where either return is NaN or infinite.
    pub non_finite: usize,
}

impl AlignmentReport {
    /// Drops caused by the two trading calendars diverging.
    pub const fn calendar_gaps(&self) -> usize {
        self.security_only + self.market_only + self.period_mismatch
    }

    /// Drops caused by unusable values.
    pub const fn data_quality(&self) -> usize {
        self.non_finite
    }

    /// Whether nothing was dropped.
    pub const fn is_clean(&self) -> bool {
        self.calendar_gaps() == 0 && self.data_quality() == 0
    }
}

/// Security and market returns restricted to their common, finite observations.
///
/// Both sides share one date sequence, strictly increasing, with at least
/// [`MIN_OBSERVATIONS`] entries.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedReturns {
    security_symbol: String,
    market_symbol: String,
    dates: Vec<NaiveDate>,
    security: Array1<f64>,
    market: Array1<f64>,
    report: AlignmentReport,
}

impl AlignedReturns {
    /// Align two return series.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError::InsufficientData`] when fewer than
    /// [`MIN_OBSERVATIONS`] pairs survive.
    pub fn align(security: &ReturnSeries, market: &ReturnSeries) -> Result<Self> {
        let sec = security.observations();
        let mkt = market.observations();

        let mut report = AlignmentReport::default();
        let mut dates = Vec::with_capacity(sec.len().min(mkt.len()));
        let mut security_values = Vec::with_capacity(dates.capacity());
        let mut market_values = Vec::with_capacity(dates.capacity());

        let (mut i, mut j) = (0, 0);
        while i < sec.len() && j < mkt.len() {
            let (s, m) = (&sec[i], &mkt[j]);
            match s.date.cmp(&m.date) {
                Ordering::Less => {
                    report.security_only += 1;
                    i += 1;
                }
                Ordering::Greater => {
                    report.market_only += 1;
                    j += 1;
                }
                Ordering::Equal => {
                    if s.from != m.from {
                        report.period_mismatch += 1;
                    } else if !s.value.is_finite() || !m.value.is_finite() {
                        report.non_finite += 1;
                    } else {
                        dates.push(s.date);
                        security_values.push(s.value);
                        market_values.push(m.value);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        report.security_only += sec.len() - i;
        report.market_only += mkt.len() - j;

        debug!(
            security = security.symbol(),
            market = market.symbol(),
            aligned = dates.len(),
            security_only = report.security_only,
            market_only = report.market_only,
            period_mismatch = report.period_mismatch,
            non_finite = report.non_finite,
            "Aligned return series"
        );
        if report.non_finite > 0 {
            warn!(
                security = security.symbol(),
                market = market.symbol(),
                dropped = report.non_finite,
                "Dropped non-finite returns"
            );
        }

        if dates.len() < MIN_OBSERVATIONS {
            return Err(EstimationError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: dates.len(),
            });
        }

        Ok(Self {
            security_symbol: security.symbol().to_string(),
            market_symbol: market.symbol().to_string(),
            dates,
            security: Array1::from_vec(security_values),
            market: Array1::from_vec(market_values),
            report,
        })
    }

    /// Wrap returns the caller has already aligned.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError::LengthMismatch`] when the three sequences
    /// differ in length, [`EstimationError::InvalidAlignment`] for unordered
    /// dates or non-finite values, and [`EstimationError::InsufficientData`]
    /// below [`MIN_OBSERVATIONS`].
    pub fn from_parts(
        security_symbol: impl Into<String>,
        market_symbol: impl Into<String>,
        dates: Vec<NaiveDate>,
        security: Vec<f64>,
        market: Vec<f64>,
    ) -> Result<Self> {
        if security.len() != market.len() {
            return Err(EstimationError::LengthMismatch {
                security: security.len(),
                market: market.len(),
            });
        }
        if dates.len() != security.len() {
            return Err(EstimationError::InvalidAlignment(format!(
                "{} dates for {} observations",
                dates.len(),
                security.len()
            )));
        }
        if dates.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EstimationError::InvalidAlignment(
                "dates must be strictly increasing".to_string(),
            ));
        }
        if security.iter().chain(market.iter()).any(|v| !v.is_finite()) {
            return Err(EstimationError::InvalidAlignment(
                "returns must be finite".to_string(),
            ));
        }
        if dates.len() < MIN_OBSERVATIONS {
            return Err(EstimationError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: dates.len(),
            });
        }

        Ok(Self {
            security_symbol: security_symbol.into(),
            market_symbol: market_symbol.into(),
            dates,
            security: Array1::from_vec(security),
            market: Array1::from_vec(market),
            report: AlignmentReport::default(),
        })
    }

    /// Ticker of the security (dependent variable).
    pub fn security_symbol(&self) -> &str {
        &self.security_symbol
    }

    /// Ticker of the market index (independent variable).
    pub fn market_symbol(&self) -> &str {
        &self.market_symbol
    }

    /// Shared observation dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Security returns in percent.
    pub const fn security(&self) -> &Array1<f64> {
        &self.security
    }

    /// Market returns in percent.
    pub const fn market(&self) -> &Array1<f64> {
        &self.market
    }

    /// Drop accounting from alignment.
    pub const fn report(&self) -> &AlignmentReport {
        &self.report
    }

    /// Number of aligned pairs.
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a constructed value; present for API symmetry.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate `(date, market return, security return)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64, f64)> + '_ {
        self.dates
            .iter()
            .zip(self.market.iter())
            .zip(self.security.iter())
            .map(|((&date, &x), &y)| (date, x, y))
    }
}

/// Build aligned percentage returns from a security and a market price history.
///
/// # Errors
///
/// Returns [`EstimationError::InsufficientData`] when either input has fewer
/// than two prices or fewer than [`MIN_OBSERVATIONS`] pairs survive alignment.
pub fn build_aligned_returns(
    security_prices: &PriceSeries,
    market_prices: &PriceSeries,
) -> Result<AlignedReturns> {
    for prices in [security_prices, market_prices] {
        if prices.len() < 2 {
            return Err(EstimationError::InsufficientData {
                required: 2,
                actual: prices.len(),
            });
        }
    }

    let security = ReturnSeries::from_prices(security_prices);
    let market = ReturnSeries::from_prices(market_prices);
    AlignedReturns::align(&security, &market)
}
