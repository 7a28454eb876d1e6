//! Security market line data.
//!
//! One point per aligned observation: the actual pair of returns plus the
//! fitted security return and its residual. Presentation layers draw the
//! scatter and the fitted line from these; nothing here renders.

use betaculator_engine::{AlignedReturns, FitResult};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A single observation on the security market line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScatterPoint {
    /// Observation date.
    pub date: NaiveDate,

    /// Market return in percent (x axis).
    pub market_return: f64,

    /// Security return in percent (y axis).
    pub security_return: f64,

    /// Security return predicted by the fit.
    pub fitted_return: f64,

    /// Actual minus fitted security return.
    pub residual: f64,
}

/// Build the scatter points for an aligned sample and its fit.
pub fn security_market_line(aligned: &AlignedReturns, fit: &FitResult) -> Vec<ScatterPoint> {
    aligned
        .iter()
        .map(|(date, x, y)| {
            let fitted = fit.fitted(x);
            ScatterPoint {
                date,
                market_return: x,
                security_return: y,
                fitted_return: fitted,
                residual: y - fitted,
            }
        })
        .collect()
}

/// Column label for an instrument's returns, e.g. `"AAPL returns %"`.
pub fn returns_label(symbol: &str) -> String {
    format!("{symbol} returns %")
}

/// Market and security return column names; suffixed with their role when
/// both symbols are the same.
fn return_columns(market: &str, security: &str) -> (String, String) {
    let (market_label, security_label) = (returns_label(market), returns_label(security));
    if market_label == security_label {
        (
            format!("{market_label} (market)"),
            format!("{security_label} (security)"),
        )
    } else {
        (market_label, security_label)
    }
}

/// Convert the scatter points to a DataFrame.
///
/// Columns: `date`, `<MARKET> returns %`, `<SECURITY> returns %`, `fitted`, `residual`.
/// When both symbols match, the return columns end in ` (market)` and ` (security)`.
pub fn scatter_frame(aligned: &AlignedReturns, fit: &FitResult) -> PolarsResult<DataFrame> {
    let points = security_market_line(aligned, fit);

    let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
    let market: Vec<f64> = points.iter().map(|p| p.market_return).collect();
    let security: Vec<f64> = points.iter().map(|p| p.security_return).collect();
    let fitted: Vec<f64> = points.iter().map(|p| p.fitted_return).collect();
    let residuals: Vec<f64> = points.iter().map(|p| p.residual).collect();

    let (market_label, security_label) =
        return_columns(aligned.market_symbol(), aligned.security_symbol());

    let df = DataFrame::new(vec![
        Series::new("date".into(), dates).into(),
        Series::new(market_label.into(), market).into(),
        Series::new(security_label.into(), security).into(),
        Series::new("fitted".into(), fitted).into(),
        Series::new("residual".into(), residuals).into(),
    ])?;

    df.lazy()
        .with_column(col("date").cast(DataType::Date))
        .collect()
}
