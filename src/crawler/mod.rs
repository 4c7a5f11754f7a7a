//! Crawler module for page fetching and image probing
//!
//! This module contains the survey pipeline:
//! - HTTP fetching of pages
//! - HTML parsing and image reference extraction
//! - Image probing (size and dimensions)
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod parser;
mod prober;

pub use coordinator::Surveyor;
pub use fetcher::{build_http_client, fetch_page, FailureKind, FetchResult};
pub use parser::{extract_image_references, IMAGE_SOURCE_ATTRIBUTES};
pub use prober::{ImageDetails, ImageProber, ProbeError};

use crate::config::Config;
use crate::output::{ReportWriter, RunStats};
use crate::source::read_url_list;
use crate::SurveyError;
use std::path::Path;

/// Runs a complete survey
///
/// This is the main entry point. It will:
/// 1. Read the URL list (an unreadable list aborts before any report exists)
/// 2. Create both report files
/// 3. Process every page in order
/// 4. Write the failure report
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `url_list` - Path to the newline-delimited page list
/// * `output_dir` - Directory for relative report paths (current directory if None)
pub async fn survey(
    config: &Config,
    url_list: &Path,
    output_dir: Option<&Path>,
) -> Result<RunStats, SurveyError> {
    let targets = read_url_list(url_list)?;

    let (image_report, failed_websites) = config.report.paths_in(output_dir);
    let mut writer = ReportWriter::create(
        &image_report,
        &failed_websites,
        config.report.min_image_bytes,
    )?;

    let surveyor = Surveyor::new(config)?;
    surveyor.run(&targets, &mut writer).await
}
