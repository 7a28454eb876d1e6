//! Conversion between price series and Polars DataFrames.
//!
//! Frames use the column layout of the quote pipeline:
//! `symbol`, `date` (Date), `adjusted_close` (Float64).

use crate::error::{DataError, Result};
use crate::series::{PricePoint, PriceSeries};
use chrono::NaiveDate;
use polars::prelude::*;

impl PriceSeries {
    /// Convert to a DataFrame with columns: symbol, date, adjusted_close.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self.points().iter().map(|p| p.date.to_string()).collect();
        let prices: Vec<f64> = self.prices();

        let mut df = DataFrame::new(vec![
            Series::new("date".into(), dates).into(),
            Series::new("adjusted_close".into(), prices).into(),
        ])?;

        let symbol_col: Column =
            Series::new("symbol".into(), vec![self.symbol(); df.height()]).into();
        df.with_column(symbol_col)?;

        let df = df
            .lazy()
            .with_column(col("date").cast(DataType::Date))
            .select([col("symbol"), col("date"), col("adjusted_close")])
            .collect()?;

        Ok(df)
    }

    /// Build a price series from a frame with `date` and `adjusted_close` columns.
    ///
    /// Rows are sorted by date first. Null prices become NaN so they surface
    /// as non-finite returns downstream.
    pub fn from_frame(symbol: &str, df: &DataFrame) -> Result<Self> {
        let sorted = df
            .clone()
            .lazy()
            .sort(["date"], SortMultipleOptions::default())
            .collect()?;

        let dates = sorted.column("date")?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let prices = sorted.column("adjusted_close")?.cast(&DataType::Float64)?;
        let prices = prices.f64()?;

        let mut points = Vec::with_capacity(sorted.height());
        for i in 0..sorted.height() {
            let raw = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing date".to_string()))?;
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| DataError::Parse(format!("Invalid date {raw}: {e}")))?;
            let price = prices.get(i).unwrap_or(f64::NAN);
            points.push(PricePoint::new(date, price));
        }

        Self::new(symbol, points)
    }
}
