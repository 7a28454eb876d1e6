//! Beta estimation pipeline.
//!
//! Resolves the request window, fetches both price histories from a
//! [`PriceHistorySource`], builds aligned returns and fits beta. The window is
//! validated before the source is consulted.

use crate::error::Result;
use crate::request::RegressionRequest;
use betaculator_data::{DateRange, PriceHistorySource};
use betaculator_engine::{
    AlignedReturns, BetaRegressor, FitResult, RegressorConfig, build_aligned_returns,
};
use betaculator_output::{BetaReport, BetaSummary, ScatterPoint, security_market_line};
use tracing::{debug, info};

/// Everything produced by one estimation.
#[derive(Debug, Clone)]
pub struct BetaEstimate {
    /// The request that produced this estimate
    pub request: RegressionRequest,
    /// Resolved date range
    pub range: DateRange,
    /// Aligned return pairs used in the fit
    pub aligned: AlignedReturns,
    /// Regression output
    pub fit: FitResult,
}

impl BetaEstimate {
    /// Headline summary table.
    pub fn summary(&self) -> BetaSummary {
        BetaSummary::new(&self.aligned, self.fit, &self.range, self.request.interval)
    }

    /// Security market line points.
    pub fn scatter(&self) -> Vec<ScatterPoint> {
        security_market_line(&self.aligned, &self.fit)
    }

    /// Full report stamped with the current time.
    pub fn report(&self) -> BetaReport {
        BetaReport::new(&self.aligned, self.fit, &self.range, self.request.interval)
    }
}

/// Runs [`RegressionRequest`]s against a price-history source.
#[derive(Debug, Clone)]
pub struct BetaEstimator<S> {
    source: S,
    regressor: BetaRegressor,
}

impl<S: PriceHistorySource> BetaEstimator<S> {
    /// Create an estimator with the default regressor configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, RegressorConfig::default())
    }

    /// Create an estimator with a custom regressor configuration.
    pub const fn with_config(source: S, config: RegressorConfig) -> Self {
        Self {
            source,
            regressor: BetaRegressor::new(config),
        }
    }

    /// Underlying price-history source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Regressor configuration.
    pub const fn config(&self) -> &RegressorConfig {
        self.regressor.config()
    }

    /// Estimate beta for a request.
    ///
    /// # Errors
    ///
    /// * [`crate::BetaError::InvalidDateRange`] before any data is fetched
    /// * [`crate::BetaError::Data`] when a price history cannot be retrieved
    /// * [`crate::BetaError::InsufficientData`] for too few prices or pairs
    /// * [`crate::BetaError::DegenerateInput`] for constant market returns
    pub fn estimate(&self, request: RegressionRequest) -> Result<BetaEstimate> {
        let range = request.resolve_range()?;
        debug!(
            security = %request.security,
            market = %request.market,
            %range,
            interval = %request.interval,
            "Fetching price histories"
        );

        let security = self
            .source
            .price_history(&request.security, &range, request.interval)?;
        let market = self
            .source
            .price_history(&request.market, &range, request.interval)?;

        let aligned = build_aligned_returns(&security, &market)?;
        let fit = self.regressor.estimate(&aligned)?;

        info!(
            security = %request.security,
            market = %request.market,
            observations = fit.observations,
            adjusted_beta = fit.adjusted_beta,
            raw_beta = fit.raw_beta,
            r_squared = fit.r_squared,
            "Estimated beta"
        );

        Ok(BetaEstimate {
            request,
            range,
            aligned,
            fit,
        })
    }
}

/// Estimate beta with the default configuration.
///
/// # Errors
///
/// See [`BetaEstimator::estimate`].
pub fn estimate<S: PriceHistorySource>(
    request: RegressionRequest,
    source: S,
) -> Result<BetaEstimate> {
    BetaEstimator::new(source).estimate(request)
}
