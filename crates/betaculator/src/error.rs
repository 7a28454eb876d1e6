//! Unified error type for the estimation pipeline.

use betaculator_data::DataError;
use betaculator_engine::EstimationError;
use chrono::NaiveDate;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, BetaError>;

/// Errors surfaced to callers of [`crate::BetaEstimator`].
#[derive(Debug, Error)]
pub enum BetaError {
    /// Start date not strictly before end date
    #[error("Invalid date range: start {start} must be before end {end}")]
    InvalidDateRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },

    /// Too few prices or aligned return pairs
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Market returns have zero variance
    #[error("Degenerate input: market returns have zero variance ({variance:e})")]
    DegenerateInput {
        /// Population variance of the market returns
        variance: f64,
    },

    /// No market index configured for a currency
    #[error("No market index configured for currency {0}")]
    UnknownCurrency(String),

    /// Price history retrieval failed
    #[error(transparent)]
    Data(DataError),

    /// Estimation failed for a reason other than data shortage or degeneracy
    #[error(transparent)]
    Estimation(EstimationError),

    /// Index table could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DataError> for BetaError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidDateRange { start, end } => Self::InvalidDateRange { start, end },
            other => Self::Data(other),
        }
    }
}

impl From<EstimationError> for BetaError {
    fn from(err: EstimationError) -> Self {
        match err {
            EstimationError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            EstimationError::DegenerateInput { variance } => Self::DegenerateInput { variance },
            other => Self::Estimation(other),
        }
    }
}
