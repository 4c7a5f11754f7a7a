//! Output module for survey reports
//!
//! This module handles:
//! - The streamed image report and the failed-website report
//! - Record types persisted to both
//! - Run statistics printed at the end of a survey

mod csv_report;
pub mod stats;
mod traits;

pub use csv_report::ReportWriter;
pub use stats::{format_statistics, print_statistics, RunStats};
pub use traits::{FailureRecord, ImageReportRow, OutputError, OutputResult, ReportSink};
