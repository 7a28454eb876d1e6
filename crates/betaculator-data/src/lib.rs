#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/betaculator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod interval;
pub mod range;
pub mod series;
pub mod source;

pub use error::{DataError, Result};
pub use interval::Interval;
pub use range::DateRange;
pub use series::{PricePoint, PriceSeries};
pub use source::{CsvPriceSource, CsvSourceConfig, InMemoryPriceSource, PriceHistorySource};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
