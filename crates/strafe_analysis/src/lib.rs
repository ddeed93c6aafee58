//! STRAFE Movement Analysis
//!
//! Consumes the demo event stream and accumulates per-player movement-input
//! statistics: opposing-key overlaps per axis, clean direction switches,
//! total move time, and airborne turn quality.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod report;
pub mod session;
pub mod state;

pub use report::{write_report, ReportRow, REPORT_HEADER};
pub use session::AnalysisSession;
pub use state::{AnalyzerConfig, PlayerMoveState};
