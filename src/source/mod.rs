//! URL source for a survey run
//!
//! Reads the newline-delimited list of page URLs. Entries are trimmed and blank
//! lines dropped; no URL validation happens here.

use crate::SurveyError;
use std::path::Path;

/// A single page URL exactly as it appeared in the input list (trimmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget(String);

impl PageTarget {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The original input entry, possibly without a scheme
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the URL list at `path`
///
/// # Returns
///
/// * `Ok(Vec<PageTarget>)` - Non-empty trimmed lines in file order
/// * `Err(SurveyError::InputFile)` - The file could not be read; the run must abort
pub fn read_url_list(path: &Path) -> Result<Vec<PageTarget>, SurveyError> {
    let content = std::fs::read_to_string(path).map_err(|source| SurveyError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let targets = parse_url_list(&content);
    tracing::debug!("Read {} URLs from {}", targets.len(), path.display());
    Ok(targets)
}

/// Splits list text into page targets, skipping blank lines
pub fn parse_url_list(content: &str) -> Vec<PageTarget> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PageTarget::new)
        .collect()
}
