//! Image prober
//!
//! Fetches an image in full, measures its length, and sniffs its pixel
//! dimensions. A probe either yields [`ImageDetails`] or fails as a whole; an
//! unreadable format only leaves the dimensions empty.

use crate::dimensions::{default_sniffers, sniff_dimensions, DimensionSniffer, Dimensions};
use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Measured properties of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDetails {
    pub url: Url,

    /// Exact body length in bytes
    pub size_bytes: u64,

    /// None when no sniffer recognized the body
    pub dimensions: Option<Dimensions>,
}

/// Reasons a probe produced nothing
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Error processing {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Probes images with a shared client and sniffer table
pub struct ImageProber {
    client: Client,
    sniffers: Vec<Box<dyn DimensionSniffer>>,
}

impl ImageProber {
    pub fn new(client: Client) -> Self {
        Self::with_sniffers(client, default_sniffers())
    }

    pub fn with_sniffers(client: Client, sniffers: Vec<Box<dyn DimensionSniffer>>) -> Self {
        Self { client, sniffers }
    }

    /// Fetches `url` and measures it
    ///
    /// # Returns
    ///
    /// * `Ok(ImageDetails)` - The body was read; dimensions may be absent
    /// * `Err(ProbeError)` - Network fault, 4xx/5xx status, or unreadable body
    pub async fn probe(&self, url: &Url) -> Result<ImageDetails, ProbeError> {
        let http_error = |source| ProbeError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(http_error)?;

        let body = response.bytes().await.map_err(http_error)?;
        let dimensions = sniff_dimensions(&self.sniffers, &body);

        if dimensions.is_none() {
            tracing::debug!("No dimensions for {} ({} bytes)", url, body.len());
        }

        Ok(ImageDetails {
            url: url.clone(),
            size_bytes: body.len() as u64,
            dimensions,
        })
    }
}
