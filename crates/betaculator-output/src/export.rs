//! CSV and JSON export of beta results.

use crate::report::BetaReport;
use crate::scatter::ScatterPoint;
use crate::summary::BetaSummary;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension (`csv` or `json`).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(format!(
                "unsupported extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// One `metric,value` row of a flattened summary.
#[derive(Debug, Serialize)]
struct MetricRecord<'a> {
    security: &'a str,
    market: &'a str,
    metric: &'static str,
    value: f64,
}

impl BetaSummary {
    fn to_flat_records(&self) -> Vec<MetricRecord<'_>> {
        let fit = &self.fit;
        [
            ("adjusted_beta", fit.adjusted_beta),
            ("raw_beta", fit.raw_beta),
            ("r_squared", fit.r_squared),
            ("intercept", fit.intercept),
            ("observations", fit.observations as f64),
        ]
        .into_iter()
        .map(|(metric, value)| MetricRecord {
            security: &self.security,
            market: &self.market,
            metric,
            value,
        })
        .collect()
    }
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

fn points_csv(points: &[ScatterPoint]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for point in points {
        wtr.serialize(point)?;
    }
    finish_csv(wtr)
}

impl Exporter for BetaSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self.to_flat_records() {
                    wtr.serialize(&record)?;
                }
                finish_csv(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<ScatterPoint> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => points_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for BetaReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let summary = &self.summary;
                let mut output = String::new();

                // Header information as comments
                output.push_str(&format!(
                    "# Beta: {} vs {}\n",
                    summary.security, summary.market
                ));
                output.push_str(&format!(
                    "# Period: {} to {} ({})\n",
                    summary.period_start, summary.period_end, summary.interval
                ));
                for (label, value) in summary.headline() {
                    output.push_str(&format!("# {}: {}\n", label, value));
                }
                output.push_str(&format!("# Intercept: {}\n", summary.fit.intercept));
                output.push_str(&format!("# Generated: {}\n", self.timestamp.to_rfc3339()));

                output.push_str(&points_csv(&self.points)?);
                Ok(output)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use betaculator_data::{DateRange, Interval};
    use betaculator_engine::{AlignedReturns, estimate_beta};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn report() -> BetaReport {
        let aligned = AlignedReturns::from_parts(
            "MSFT",
            "^GSPC",
            vec![d(6), d(13), d(20), d(27)],
            vec![2.0, 3.0, 5.0, 4.0],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let fit = estimate_beta(&aligned).unwrap();
        let range = DateRange::new(d(1), d(31)).unwrap();
        BetaReport::new(&aligned, fit, &range, Interval::Weekly)
    }

    #[rstest]
    #[case(ExportFormat::Csv, "csv")]
    #[case(ExportFormat::Json, "json")]
    #[case(ExportFormat::PrettyJson, "json")]
    fn test_extension(#[case] format: ExportFormat, #[case] ext: &str) {
        assert_eq!(format.extension(), ext);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/beta.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("beta.json")).unwrap(),
            ExportFormat::PrettyJson
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("beta.xlsx")),
            Err(ExportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_summary_csv() {
        let csv = report().summary.export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "security,market,metric,value");
        assert!(lines[1].starts_with("MSFT,^GSPC,adjusted_beta,0.866"));
        assert_eq!(lines[2], "MSFT,^GSPC,raw_beta,0.8");
        assert!(lines[3].starts_with("MSFT,^GSPC,r_squared,0.6"));
        assert_eq!(lines[4], "MSFT,^GSPC,intercept,1.5");
        assert_eq!(lines[5], "MSFT,^GSPC,observations,4.0");
    }

    #[test]
    fn test_summary_json() {
        let json = report().summary.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"MSFT\""));
        assert!(json.contains("\"raw_beta\":0.8"));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_points_csv() {
        let csv = report().points.export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("date,market_return,security_return,fitted_return,residual")
        );
        assert!(lines.next().unwrap().starts_with("2024-05-06,1.0,2.0,"));
        assert_eq!(csv.lines().count(), 5);
    }

    #[test]
    fn test_report_csv_has_comment_header() {
        let csv = report().export_to_string(ExportFormat::Csv).unwrap();

        assert!(csv.starts_with("# Beta: MSFT vs ^GSPC\n"));
        assert!(csv.contains("# Period: 2024-05-01 to 2024-05-31 (weekly)"));
        assert!(csv.contains("# Raw Beta: 0.8"));
        assert!(csv.contains("date,market_return,security_return,fitted_return,residual"));
    }

    #[test]
    fn test_report_pretty_json() {
        let json = report().export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("  "));
        assert!(json.contains("\"summary\""));
    }
}
