//! Price-history sources.
//!
//! A source hands out the adjusted-close history of one instrument over a
//! window at a sampling interval. Where the prices come from is up to the
//! implementation; the estimation engine only ever sees [`PriceSeries`].

pub mod csv;
pub mod memory;

pub use self::csv::{CsvPriceSource, CsvSourceConfig};
pub use memory::InMemoryPriceSource;

use crate::error::Result;
use crate::interval::Interval;
use crate::range::DateRange;
use crate::series::PriceSeries;

/// Trait for price-history providers.
pub trait PriceHistorySource {
    /// Fetch the price history of `symbol` restricted to `range` and sampled at `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DataError::MissingData`] when the source knows nothing
    /// about `symbol`, or a source-specific error when reading fails.
    fn price_history(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries>;
}

impl<S: PriceHistorySource + ?Sized> PriceHistorySource for &S {
    fn price_history(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries> {
        (**self).price_history(symbol, range, interval)
    }
}
