//! Beta Regressor
//!
//! Ordinary least squares of security returns (Y) on market returns (X):
//!
//! ```text
//! raw_beta  = Sxy / Sxx
//! intercept = mean(Y) - raw_beta * mean(X)
//! r_squared = 1 - SS_res / SS_tot
//! ```
//!
//! The raw slope is then shrunk toward the market beta of 1 with fixed 2/3
//! and 1/3 weights (the Blume adjustment quoted by most terminal vendors).
//! All sums run in observation order, so identical input gives bit-identical
//! output.

use crate::error::{EstimationError, Result};
use crate::returns::{AlignedReturns, MIN_OBSERVATIONS};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weight on the raw OLS beta in the adjusted beta.
pub const ADJUSTED_BETA_WEIGHT: f64 = 2.0 / 3.0;

/// Weight on the market beta in the adjusted beta.
pub const PRIOR_BETA_WEIGHT: f64 = 1.0 / 3.0;

/// Beta of the market against itself; the shrinkage target.
pub const MARKET_BETA: f64 = 1.0;

/// Shrink a raw beta toward [`MARKET_BETA`].
pub fn adjust_beta(raw_beta: f64) -> f64 {
    ADJUSTED_BETA_WEIGHT * raw_beta + PRIOR_BETA_WEIGHT * MARKET_BETA
}

/// Outcome of one beta regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// OLS slope of security returns on market returns.
    pub raw_beta: f64,
    /// OLS intercept, in percent per period.
    pub intercept: f64,
    /// Coefficient of determination in `[0, 1]`.
    pub r_squared: f64,
    /// Raw beta shrunk toward 1.
    pub adjusted_beta: f64,
    /// Number of aligned pairs used in the fit.
    pub observations: usize,
}

impl FitResult {
    /// Expected security return for a market return of `market_return`.
    pub fn fitted(&self, market_return: f64) -> f64 {
        self.raw_beta * market_return + self.intercept
    }

    /// Fitted security returns along the aligned market returns.
    pub fn fitted_values(&self, aligned: &AlignedReturns) -> Array1<f64> {
        aligned.market().mapv(|x| self.fitted(x))
    }

    /// Actual minus fitted security returns.
    pub fn residuals(&self, aligned: &AlignedReturns) -> Array1<f64> {
        aligned.security() - &self.fitted_values(aligned)
    }
}

/// Configuration for the beta regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorConfig {
    /// Minimum number of aligned pairs required (default: 2, never lower)
    pub min_observations: usize,
}

impl Default for RegressorConfig {
    fn default() -> Self {
        Self {
            min_observations: MIN_OBSERVATIONS,
        }
    }
}

/// Single-factor OLS beta estimator
#[derive(Debug, Clone, Default)]
pub struct BetaRegressor {
    config: RegressorConfig,
}

impl BetaRegressor {
    /// Create a regressor with a custom configuration
    pub const fn new(config: RegressorConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub const fn config(&self) -> &RegressorConfig {
        &self.config
    }

    /// Fit beta on aligned returns
    ///
    /// # Errors
    /// * [`EstimationError::InsufficientData`] below the configured minimum
    /// * [`EstimationError::DegenerateInput`] when market returns are constant
    pub fn estimate(&self, aligned: &AlignedReturns) -> Result<FitResult> {
        let x = aligned.market();
        let y = aligned.security();
        let n = x.len();

        let required = self.config.min_observations.max(MIN_OBSERVATIONS);
        if n < required {
            return Err(EstimationError::InsufficientData {
                required,
                actual: n,
            });
        }

        let n_obs = n as f64;
        let mean_x = x.sum() / n_obs;
        let mean_y = y.sum() / n_obs;

        let dx = x.mapv(|v| v - mean_x);
        let dy = y.mapv(|v| v - mean_y);

        let sxx = dx.dot(&dx);
        let sxy = dx.dot(&dy);
        let ss_tot = dy.dot(&dy);

        // Means of identical values can round, leaving tiny non-zero deviations
        if is_negligible(sxx, x) {
            return Err(EstimationError::DegenerateInput {
                variance: sxx / n_obs,
            });
        }

        let raw_beta = sxy / sxx;
        let intercept = mean_y - raw_beta * mean_x;

        let ss_res: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| {
                let r = yi - (raw_beta * xi + intercept);
                r * r
            })
            .sum();

        let r_squared = if is_negligible(ss_tot, y) {
            0.0
        } else {
            (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
        };

        let fit = FitResult {
            raw_beta,
            intercept,
            r_squared,
            adjusted_beta: adjust_beta(raw_beta),
            observations: n,
        };

        debug!(
            security = aligned.security_symbol(),
            market = aligned.market_symbol(),
            observations = n,
            raw_beta,
            intercept,
            r_squared,
            "Fitted beta"
        );

        Ok(fit)
    }
}

/// Whether a sum of squared deviations is zero up to rounding of `values`.
fn is_negligible(sum_sq_dev: f64, values: &Array1<f64>) -> bool {
    sum_sq_dev <= f64::EPSILON * values.dot(values)
}

/// Fit beta with the default configuration.
///
/// # Errors
///
/// See [`BetaRegressor::estimate`].
pub fn estimate_beta(aligned: &AlignedReturns) -> Result<FitResult> {
    BetaRegressor::default().estimate(aligned)
}
