#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/betaculator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod scatter;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{BetaReport, ReportBuilder, ReportError};
pub use scatter::{ScatterPoint, returns_label, scatter_frame, security_market_line};
pub use summary::BetaSummary;
