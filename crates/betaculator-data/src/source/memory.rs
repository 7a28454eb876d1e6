//! In-memory price source.

use super::PriceHistorySource;
use crate::error::{DataError, Result};
use crate::interval::Interval;
use crate::range::DateRange;
use crate::series::PriceSeries;
use std::collections::HashMap;

/// Price source backed by series held in memory, keyed by symbol.
///
/// Stored series are treated as daily closes and resampled on request.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a series under its own symbol.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series
            .insert(series.symbol().to_ascii_uppercase(), series);
    }

    /// Builder-style [`InMemoryPriceSource::insert`].
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    /// Symbols held by this source.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.series.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

impl PriceHistorySource for InMemoryPriceSource {
    fn price_history(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries> {
        let series = self
            .series
            .get(&symbol.to_ascii_uppercase())
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "Symbol not loaded".to_string(),
            })?;

        Ok(series.restrict(range).resample(interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let source = InMemoryPriceSource::new().with_series(
            PriceSeries::from_pairs("aapl", [(date(2024, 1, 2), 1.0)]).unwrap(),
        );
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap();

        let series = source
            .price_history("AAPL", &range, Interval::Daily)
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(source.symbols(), vec!["AAPL".to_string()]);
    }

    #[test]
    fn test_unknown_symbol() {
        let source = InMemoryPriceSource::new();
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap();

        let result = source.price_history("NOPE", &range, Interval::Weekly);
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }

    #[test]
    fn test_range_and_interval_applied() {
        let source = InMemoryPriceSource::new().with_series(
            PriceSeries::from_pairs(
                "SPY",
                [
                    (date(2023, 12, 29), 1.0),
                    (date(2024, 1, 2), 2.0),
                    (date(2024, 1, 5), 3.0),
                    (date(2024, 1, 8), 4.0),
                ],
            )
            .unwrap(),
        );
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 8)).unwrap();

        let series = source
            .price_history("SPY", &range, Interval::Weekly)
            .unwrap();
        assert_eq!(series.dates(), vec![date(2024, 1, 1)]);
        assert_eq!(series.prices(), vec![3.0]);
    }
}
