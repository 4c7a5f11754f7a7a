use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Browser-like User-Agent sent with every page and image request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Images at or above this many bytes are written to the image report (100 KiB)
pub const DEFAULT_MIN_IMAGE_BYTES: u64 = 100 * 1024;

/// Main configuration structure for Image-Survey
///
/// Every key is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub report: ReportConfig,
}

/// HTTP request configuration shared by page fetches and image probes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of redirect hops followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Inclusive byte threshold for the image report
    #[serde(rename = "min-image-bytes")]
    pub min_image_bytes: u64,

    /// Path of the qualifying-image CSV
    #[serde(rename = "image-report")]
    pub image_report: String,

    /// Path of the failed-website CSV
    #[serde(rename = "failed-websites")]
    pub failed_websites: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_image_bytes: DEFAULT_MIN_IMAGE_BYTES,
            image_report: "image_report.csv".to_string(),
            failed_websites: "failed_websites.csv".to_string(),
        }
    }
}

impl ReportConfig {
    /// Report paths, with relative ones placed under `dir` when given
    pub fn paths_in(&self, dir: Option<&Path>) -> (PathBuf, PathBuf) {
        let place = |file: &str| match dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };
        (place(&self.image_report), place(&self.failed_websites))
    }
}
