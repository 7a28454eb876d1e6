//! Full beta reports.

use crate::scatter::{ScatterPoint, security_market_line};
use crate::summary::BetaSummary;
use betaculator_data::{DateRange, Interval};
use betaculator_engine::{AlignedReturns, FitResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required builder field was not set.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary plus the security market line behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetaReport {
    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Headline results.
    pub summary: BetaSummary,

    /// Scatter points with fitted values.
    pub points: Vec<ScatterPoint>,
}

impl BetaReport {
    /// Create a new report stamped with the current time.
    pub fn new(
        aligned: &AlignedReturns,
        fit: FitResult,
        range: &DateRange,
        interval: Interval,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            summary: BetaSummary::new(aligned, fit, range, interval),
            points: security_market_line(aligned, &fit),
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder<'a> {
    aligned: Option<&'a AlignedReturns>,
    fit: Option<FitResult>,
    range: Option<DateRange>,
    interval: Interval,
    timestamp: Option<DateTime<Utc>>,
}

impl<'a> ReportBuilder<'a> {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the aligned returns.
    pub const fn aligned(mut self, aligned: &'a AlignedReturns) -> Self {
        self.aligned = Some(aligned);
        self
    }

    /// Set the regression output.
    pub const fn fit(mut self, fit: FitResult) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Set the requested window.
    pub const fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Set the sampling interval (default weekly).
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Pin the report timestamp instead of using the current time.
    pub const fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<BetaReport, ReportError> {
        let aligned = self.aligned.ok_or(ReportError::MissingField("aligned"))?;
        let fit = self.fit.ok_or(ReportError::MissingField("fit"))?;
        let range = self.range.ok_or(ReportError::MissingField("range"))?;

        let mut report = BetaReport::new(aligned, fit, &range, self.interval);
        if let Some(timestamp) = self.timestamp {
            report.timestamp = timestamp;
        }
        Ok(report)
    }
}
