//! Error types for beta estimation.

use thiserror::Error;

/// Result type for estimation operations.
pub type Result<T> = std::result::Result<T, EstimationError>;

/// Errors that can occur while aligning returns or fitting beta.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// Too few usable observations
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Market returns have no variance, so the slope is undefined
    #[error("Degenerate input: market returns have zero variance ({variance:e})")]
    DegenerateInput {
        /// Population variance of the market returns
        variance: f64,
    },

    /// Paired inputs of different lengths
    #[error("Length mismatch: security has {security} observations, market has {market}")]
    LengthMismatch {
        /// Security observation count
        security: usize,
        /// Market observation count
        market: usize,
    },

    /// Pre-aligned input that breaks an alignment invariant
    #[error("Invalid aligned returns: {0}")]
    InvalidAlignment(String),
}
