#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/betaculator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod estimator;
pub mod index;
pub mod request;

// Re-export main types from sub-crates
pub use betaculator_data as data;
pub use betaculator_engine as engine;
pub use betaculator_output as output;

pub use error::{BetaError, Result};
pub use estimator::{BetaEstimate, BetaEstimator, estimate};
pub use index::{DEFAULT_INDICES, MarketIndexTable};
pub use request::{DEFAULT_TRAILING_YEARS, RegressionRequest, Window};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
