//! CSV directory price source.
//!
//! Reads one `<SYMBOL>.csv` file per instrument, in the layout produced by
//! the usual quote download pages (`Date,Open,High,Low,Close,Adj Close,Volume`)
//! or the pipeline's own `date,adjusted_close` export. Only the date and
//! adjusted close columns are used.

use super::PriceHistorySource;
use crate::error::{DataError, Result};
use crate::interval::Interval;
use crate::range::DateRange;
use crate::series::{PricePoint, PriceSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for [`CsvPriceSource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvSourceConfig {
    /// Directory holding one CSV file per symbol (default: "prices")
    pub directory: PathBuf,
    /// chrono format of the date column (default: "%Y-%m-%d")
    pub date_format: String,
}

impl Default for CsvSourceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("prices"),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Accepted headers of the date column.
const DATE_COLUMNS: [&str; 2] = ["date", "Date"];

/// Accepted headers of the adjusted close column.
const PRICE_COLUMNS: [&str; 3] = ["adjusted_close", "Adj Close", "adj_close"];

/// Raw CSV row; unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(rename = "date", alias = "Date")]
    date: String,
    #[serde(rename = "adjusted_close", alias = "Adj Close", alias = "adj_close")]
    adjusted_close: Option<String>,
}

/// Price source reading daily closes from CSV files.
#[derive(Debug, Clone, Default)]
pub struct CsvPriceSource {
    config: CsvSourceConfig,
}

impl CsvPriceSource {
    /// Create a source reading from `directory` with the default date format.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_config(CsvSourceConfig {
            directory: directory.into(),
            ..CsvSourceConfig::default()
        })
    }

    /// Create a source with a custom configuration.
    pub const fn with_config(config: CsvSourceConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub const fn config(&self) -> &CsvSourceConfig {
        &self.config
    }

    /// Path of the file holding `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSymbol`] for blank symbols or symbols that
    /// would escape the directory.
    pub fn path_for(&self, symbol: &str) -> Result<PathBuf> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }
        if symbol.contains(['/', '\\']) || symbol.contains("..") {
            return Err(DataError::InvalidSymbol(symbol.to_string()));
        }
        Ok(self.config.directory.join(format!("{symbol}.csv")))
    }

    /// Load the full daily history stored for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingData`] when no file exists for `symbol`,
    /// [`DataError::Parse`] when the file lacks a date or adjusted close
    /// column or holds an unparseable date, and [`DataError::UnorderedDates`]
    /// for duplicated dates.
    pub fn load(&self, symbol: &str) -> Result<PriceSeries> {
        let path = self.path_for(symbol)?;
        if !path.exists() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: format!("No price file at {}", path.display()),
            });
        }

        let points = self.read_points(&path)?;
        debug!(symbol, rows = points.len(), path = %path.display(), "Loaded price file");
        PriceSeries::new(symbol.trim(), points)
    }

    fn read_points(&self, path: &Path) -> Result<Vec<PricePoint>> {
        let mut reader = ::csv::Reader::from_path(path)?;
        let headers = reader.headers()?;
        let required: [(&[&str], &str); 2] = [
            (&DATE_COLUMNS, "date"),
            (&PRICE_COLUMNS, "adjusted close"),
        ];
        for (accepted, kind) in required {
            if !headers.iter().any(|h| accepted.contains(&h)) {
                return Err(DataError::Parse(format!(
                    "{} has no {} column (expected one of: {})",
                    path.display(),
                    kind,
                    accepted.join(", ")
                )));
            }
        }

        let mut points = Vec::new();

        for record in reader.deserialize() {
            let record: PriceRecord = record?;
            let date = NaiveDate::parse_from_str(record.date.trim(), &self.config.date_format)
                .map_err(|e| DataError::Parse(format!("Invalid date {}: {}", record.date, e)))?;
            points.push(PricePoint::new(date, parse_price(record.adjusted_close.as_deref())));
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

/// Parse a price cell; blanks and markers such as `null` become NaN.
fn parse_price(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

impl PriceHistorySource for CsvPriceSource {
    fn price_history(
        &self,
        symbol: &str,
        range: &DateRange,
        interval: Interval,
    ) -> Result<PriceSeries> {
        Ok(self.load(symbol)?.restrict(range).resample(interval))
    }
}
