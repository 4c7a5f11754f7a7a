//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the surveyor, including:
//! - Building the shared HTTP client (User-Agent, timeout, redirect policy)
//! - GET requests for pages, with scheme defaulting
//! - Error classification into failure kinds
//!
//! There are no retries: any failure is final for that page.

use crate::config::HttpConfig;
use crate::url::ensure_scheme;
use reqwest::{redirect::Policy, Client};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Cause of a failed page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    /// The entry could not be turned into a request URL
    InvalidUrl,
    /// The request timed out
    Timeout,
    /// DNS failure, connection refused, TLS failure
    Connect,
    /// Redirect limit exceeded
    Redirect,
    /// Terminal response had a 4xx/5xx status
    Status,
    /// The body could not be read or decoded
    Body,
    /// Anything else reported by the HTTP client
    Other,
}

impl FailureKind {
    /// Classifies an HTTP client error
    pub fn classify(error: &reqwest::Error) -> Self {
        if error.is_builder() {
            Self::InvalidUrl
        } else if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect
        } else if error.is_redirect() {
            Self::Redirect
        } else if error.is_status() {
            Self::Status
        } else if error.is_body() || error.is_decode() {
            Self::Body
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidUrl => "invalid url",
            Self::Timeout => "timeout",
            Self::Connect => "connection failed",
            Self::Redirect => "too many redirects",
            Self::Status => "http status",
            Self::Body => "unreadable body",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects, the base for resolving references
        final_url: Url,
        /// Page body as text
        body: String,
    },

    /// The page could not be fetched
    Failure {
        kind: FailureKind,
        /// `Error fetching <url>: <cause>`
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use image_survey::config::HttpConfig;
/// use image_survey::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page entry
///
/// # Request Flow
///
/// 1. Prepend `http://` when the entry has no HTTP(S) scheme
/// 2. Send GET, following redirects up to the client's limit
/// 3. Any 4xx/5xx terminal status is a failure
/// 4. Read the body as text
///
/// Every failure carries `Error fetching <url>: <cause>`, where `<url>` is the
/// scheme-defaulted entry.
pub async fn fetch_page(client: &Client, raw_url: &str) -> FetchResult {
    let url = ensure_scheme(raw_url);

    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => return failure(&url, &e),
    };

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => return failure(&url, &e),
    };

    let final_url = response.url().clone();
    if final_url.as_str() != url {
        tracing::debug!("{} resolved to {}", url, final_url);
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => failure(&url, &e),
    }
}

fn failure(url: &str, error: &reqwest::Error) -> FetchResult {
    FetchResult::Failure {
        kind: FailureKind::classify(error),
        error: format!("Error fetching {}: {}", url, error),
    }
}
