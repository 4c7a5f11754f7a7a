//! Report record types and the report sink trait
//!
//! This module defines the rows persisted by a survey run and the trait
//! interface the coordinator writes them through.

use crate::crawler::ImageDetails;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One qualifying image, as written to the image report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReportRow {
    /// The page entry the image was found on, as given in the URL list
    pub website: String,

    /// Resolved absolute image URL
    pub image: String,

    /// Exact body length in bytes
    pub bytes: u64,

    /// Pixel width, empty when undecodable
    pub width: Option<u32>,

    /// Pixel height, empty when undecodable
    pub height: Option<u32>,
}

impl ImageReportRow {
    pub const HEADER: [&'static str; 5] = ["website", "image", "bytes", "width", "height"];
}

/// A page whose fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    /// The original input entry, possibly without a scheme
    pub url: String,

    /// Error description including the fetched URL and the cause
    pub error: String,
}

impl FailureRecord {
    pub const HEADER: [&'static str; 2] = ["url", "error"];
}

/// Destination for the records a survey run produces
///
/// Image rows are offered as they are probed; failures arrive once, when the
/// run is finalized.
pub trait ReportSink {
    /// Offers a probed image; returns whether it met the threshold and was written
    fn offer_image(&mut self, website: &str, details: &ImageDetails) -> OutputResult<bool>;

    /// Writes every failure record and flushes both reports
    fn finalize(&mut self, failures: &[FailureRecord]) -> OutputResult<()>;
}
