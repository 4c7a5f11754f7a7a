//! Survey coordinator - main orchestration logic
//!
//! Pages are processed strictly one at a time, and images within a page one at
//! a time in discovery order. The run has two phases:
//! - Processing: fetch each page, extract references, probe each image and
//!   stream qualifying rows to the report
//! - Finalization: hand the accumulated failure records to the report

use crate::config::Config;
use crate::crawler::parser::extract_image_references;
use crate::crawler::prober::ImageProber;
use crate::crawler::{build_http_client, fetch_page, FetchResult};
use crate::output::{FailureRecord, ReportSink, RunStats};
use crate::source::PageTarget;
use crate::SurveyError;
use reqwest::Client;

/// Main survey coordinator
pub struct Surveyor {
    client: Client,
    prober: ImageProber,
}

impl Surveyor {
    /// Creates a surveyor with an HTTP client built from `config`
    pub fn new(config: &Config) -> Result<Self, SurveyError> {
        let client = build_http_client(&config.http)?;
        Ok(Self::with_client(client))
    }

    /// Creates a surveyor around an existing client
    pub fn with_client(client: Client) -> Self {
        let prober = ImageProber::new(client.clone());
        Self { client, prober }
    }

    /// Runs both phases over `targets`
    ///
    /// Page and image failures never abort the run; only a report write error
    /// does.
    pub async fn run<S: ReportSink>(
        &self,
        targets: &[PageTarget],
        sink: &mut S,
    ) -> Result<RunStats, SurveyError> {
        let mut stats = RunStats::start();
        let mut failures = Vec::new();

        tracing::info!("Surveying {} pages", targets.len());

        for target in targets {
            self.process_page(target, sink, &mut failures, &mut stats)
                .await?;
        }

        tracing::debug!("Writing {} failure records", failures.len());
        sink.finalize(&failures)?;

        stats.finish();
        Ok(stats)
    }

    /// Processes one page: fetch, extract, probe
    ///
    /// A failed fetch appends exactly one record to `failures` and extracts
    /// nothing.
    async fn process_page<S: ReportSink>(
        &self,
        target: &PageTarget,
        sink: &mut S,
        failures: &mut Vec<FailureRecord>,
        stats: &mut RunStats,
    ) -> Result<(), SurveyError> {
        tracing::info!("Processing {}...", target);
        stats.pages_processed += 1;

        let (final_url, body) = match fetch_page(&self.client, target.as_str()).await {
            FetchResult::Success { final_url, body } => (final_url, body),
            FetchResult::Failure { kind, error } => {
                tracing::error!("{}", error);
                stats.record_failure(kind);
                failures.push(FailureRecord {
                    url: target.to_string(),
                    error,
                });
                return Ok(());
            }
        };

        let references = extract_image_references(&body, &final_url);
        tracing::debug!("Found {} image references on {}", references.len(), final_url);
        stats.references_found += references.len() as u64;

        for reference in &references {
            let details = match self.prober.probe(reference).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!("{}", e);
                    stats.probe_failures += 1;
                    continue;
                }
            };

            stats.images_probed += 1;
            if details.dimensions.is_none() {
                stats.images_without_dimensions += 1;
            }

            if sink.offer_image(target.as_str(), &details)? {
                stats.qualifying_images += 1;
            }
        }

        Ok(())
    }
}
