//! Run statistics
//!
//! Counters collected while a survey runs, printed once the reports are
//! finalized.

use crate::crawler::FailureKind;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Counters for one survey run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages taken from the URL list
    pub pages_processed: u64,

    /// Pages recorded in the failure report
    pub pages_failed: u64,

    /// Failed pages by cause
    pub failures_by_kind: BTreeMap<FailureKind, u64>,

    /// Unique image references extracted across all pages
    pub references_found: u64,

    /// Images fetched successfully
    pub images_probed: u64,

    /// Images dropped because the fetch failed
    pub probe_failures: u64,

    /// Probed images whose dimensions could not be read
    pub images_without_dimensions: u64,

    /// Rows written to the image report
    pub qualifying_images: u64,
}

impl RunStats {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_processed: 0,
            pages_failed: 0,
            failures_by_kind: BTreeMap::new(),
            references_found: 0,
            images_probed: 0,
            probe_failures: 0,
            images_without_dimensions: 0,
            qualifying_images: 0,
        }
    }

    pub fn record_failure(&mut self, kind: FailureKind) {
        self.pages_failed += 1;
        *self.failures_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Elapsed seconds, if the run has finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::start()
    }
}

/// Formats statistics as printable lines
pub fn format_statistics(stats: &RunStats) -> String {
    let mut out = String::new();

    out.push_str("=== Survey Statistics ===\n");
    out.push_str(&format!("Started: {}\n", stats.started_at.to_rfc3339()));
    if let Some(finished) = stats.finished_at {
        out.push_str(&format!("Finished: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = stats.duration_seconds() {
        out.push_str(&format!("Duration: {:.1}s\n", duration));
    }

    out.push_str(&format!(
        "Pages: {} processed, {} failed\n",
        stats.pages_processed, stats.pages_failed
    ));
    for (kind, count) in &stats.failures_by_kind {
        out.push_str(&format!("  {}: {}\n", kind, count));
    }

    out.push_str(&format!(
        "Images: {} found, {} probed, {} dropped, {} without dimensions\n",
        stats.references_found,
        stats.images_probed,
        stats.probe_failures,
        stats.images_without_dimensions
    ));
    out.push_str(&format!("Qualifying images: {}\n", stats.qualifying_images));

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStats) {
    print!("{}", format_statistics(stats));
}
