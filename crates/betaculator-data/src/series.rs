//! Adjusted-close price histories.

use crate::error::{DataError, Result};
use crate::interval::Interval;
use crate::range::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single adjusted-close observation.
///
/// A missing price is carried as `f64::NAN` rather than dropped so that the
/// return builder can tell calendar gaps from bad values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Adjusted close price.
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub const fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Ordered price history of one instrument.
///
/// Dates are strictly increasing; construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a price series, validating the symbol and date ordering.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSymbol`] for a blank symbol and
    /// [`DataError::UnorderedDates`] when dates are not strictly increasing.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataError::UnorderedDates {
                    symbol,
                    date: pair[1].date,
                    previous: pair[0].date,
                });
            }
        }

        Ok(Self { symbol, points })
    }

    /// Create a price series from `(date, price)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`].
    pub fn from_pairs<I>(symbol: impl Into<String>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let points = pairs
            .into_iter()
            .map(|(date, price)| PricePoint::new(date, price))
            .collect();
        Self::new(symbol, points)
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observation dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Prices in date order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Keep only observations inside `range`.
    pub fn restrict(&self, range: &DateRange) -> Self {
        Self {
            symbol: self.symbol.clone(),
            points: self
                .points
                .iter()
                .filter(|p| range.contains(p.date))
                .copied()
                .collect(),
        }
    }

    /// Downsample to `interval`.
    ///
    /// Each period keeps its last finite price (NaN if it has none) and is
    /// keyed by [`Interval::period_start`], so two instruments resampled to
    /// the same interval share period dates regardless of their trading
    /// calendars.
    pub fn resample(&self, interval: Interval) -> Self {
        if interval == Interval::Daily {
            return self.clone();
        }

        let mut points: Vec<PricePoint> = Vec::new();
        for point in &self.points {
            let key = interval.period_start(point.date);
            match points.last_mut() {
                Some(last) if last.date == key => {
                    if point.price.is_finite() || !last.price.is_finite() {
                        last.price = point.price;
                    }
                }
                _ => points.push(PricePoint::new(key, point.price)),
            }
        }

        Self {
            symbol: self.symbol.clone(),
            points,
        }
    }
}
