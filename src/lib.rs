//! Image-Survey: a page-by-page image size surveyor
//!
//! This crate reads a list of webpages, extracts the images each page embeds,
//! probes every image for its byte size and pixel dimensions, and writes a CSV
//! report of the large ones alongside a report of pages that failed to load.

pub mod config;
pub mod crawler;
pub mod dimensions;
pub mod output;
pub mod source;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Image-Survey operations
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read URL list {path}: {source}")]
    InputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Image-Survey operations
pub type Result<T> = std::result::Result<T, SurveyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{FetchResult, ImageDetails, Surveyor};
pub use output::{FailureRecord, ImageReportRow, ReportWriter, RunStats};
pub use source::{read_url_list, PageTarget};
pub use url::{ensure_scheme, resolve_reference};
