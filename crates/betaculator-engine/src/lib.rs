#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/betaculator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod regression;
pub mod returns;

// Re-export main types
pub use error::{EstimationError, Result};
pub use regression::{
    ADJUSTED_BETA_WEIGHT, BetaRegressor, FitResult, MARKET_BETA, PRIOR_BETA_WEIGHT,
    RegressorConfig, adjust_beta, estimate_beta,
};
pub use returns::{
    AlignedReturns, AlignmentReport, MIN_OBSERVATIONS, ReturnObservation, ReturnSeries,
    build_aligned_returns, percentage_change,
};
