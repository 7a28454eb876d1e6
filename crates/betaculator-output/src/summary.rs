//! Beta summary table.
//!
//! The headline view of an estimation: adjusted beta, raw beta and R-squared,
//! plus the intercept, sample size and window needed to read them.

use betaculator_data::{DateRange, Interval};
use betaculator_engine::{AlignedReturns, AlignmentReport, FitResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline results of one beta estimation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BetaSummary {
    /// Security symbol.
    pub security: String,

    /// Market index symbol.
    pub market: String,

    /// Sampling interval of the returns.
    pub interval: Interval,

    /// Start date of the requested window.
    pub period_start: NaiveDate,

    /// End date of the requested window (exclusive).
    pub period_end: NaiveDate,

    /// Regression output.
    pub fit: FitResult,

    /// Observations dropped during alignment.
    pub alignment: AlignmentReport,
}

impl BetaSummary {
    /// Create a summary from an aligned sample and its fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use betaculator_data::{DateRange, Interval};
    /// use betaculator_engine::{AlignedReturns, estimate_beta};
    /// use betaculator_output::BetaSummary;
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    /// let aligned = AlignedReturns::from_parts(
    ///     "AAPL",
    ///     "^GSPC",
    ///     vec![d(8), d(15), d(22)],
    ///     vec![1.0, 3.0, 2.0],
    ///     vec![0.5, 1.5, 1.0],
    /// )
    /// .unwrap();
    /// let fit = estimate_beta(&aligned).unwrap();
    /// let range = DateRange::new(d(1), d(29)).unwrap();
    ///
    /// let summary = BetaSummary::new(&aligned, fit, &range, Interval::Weekly);
    /// assert_eq!(summary.security, "AAPL");
    /// assert!((summary.fit.raw_beta - 2.0).abs() < 1e-12);
    /// ```
    pub fn new(
        aligned: &AlignedReturns,
        fit: FitResult,
        range: &DateRange,
        interval: Interval,
    ) -> Self {
        Self {
            security: aligned.security_symbol().to_string(),
            market: aligned.market_symbol().to_string(),
            interval,
            period_start: range.start(),
            period_end: range.end(),
            fit,
            alignment: *aligned.report(),
        }
    }

    /// The three headline metrics, in display order.
    pub const fn headline(&self) -> [(&'static str, f64); 3] {
        [
            ("Adjusted Beta", self.fit.adjusted_beta),
            ("Raw Beta", self.fit.raw_beta),
            ("R-squared", self.fit.r_squared),
        ]
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nBeta Estimate: {} vs {}\n",
            self.security, self.market
        ));
        output.push_str(&format!(
            "Period: {} to {} ({} returns)\n",
            self.period_start, self.period_end, self.interval
        ));
        output.push_str(&"=".repeat(48));
        output.push('\n');

        for (label, value) in self.headline() {
            output.push_str(&format!("  {:<22} {:>20.4}\n", label, value));
        }
        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "  {:<22} {:>19.4}%\n",
            "Intercept", self.fit.intercept
        ));
        output.push_str(&format!(
            "  {:<22} {:>20}\n",
            "Observations", self.fit.observations
        ));

        if !self.alignment.is_clean() {
            output.push_str(&format!(
                "  {:<22} {:>20}\n",
                "Calendar gaps",
                self.alignment.calendar_gaps()
            ));
            output.push_str(&format!(
                "  {:<22} {:>20}\n",
                "Invalid returns",
                self.alignment.data_quality()
            ));
        }

        output.push_str(&"=".repeat(48));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# Beta Estimate: {} vs {}\n\n",
            self.security, self.market
        ));
        output.push_str(&format!(
            "**Period:** {} to {} ({} returns, {} observations)\n\n",
            self.period_start, self.period_end, self.interval, self.fit.observations
        ));
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        for (label, value) in self.headline() {
            output.push_str(&format!("| {} | {:.4} |\n", label, value));
        }
        output.push_str(&format!("| Intercept | {:.4}% |\n", self.fit.intercept));

        output
    }
}

impl fmt::Display for BetaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Beta: {} vs {} ({} to {}, {})",
            self.security, self.market, self.period_start, self.period_end, self.interval
        )?;
        writeln!(f, "  Adjusted Beta: {:.4}", self.fit.adjusted_beta)?;
        writeln!(f, "  Raw Beta: {:.4}", self.fit.raw_beta)?;
        writeln!(f, "  R-squared: {:.4}", self.fit.r_squared)?;
        Ok(())
    }
}
