//! HTTP fetcher implementation
//!
//! This module defines the page-fetching seam of the crawler:
//! - The `PageFetcher` trait the coordinator drives
//! - `FetchResult`, the explicit success/failure outcome of a fetch
//! - `HttpFetcher`, the reqwest-backed implementation
//!
//! Network errors, timeouts and non-success statuses all come back as
//! `FetchResult::Failure`; the coordinator never sees a fetch error type.

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::crawler::parser;
use reqwest::Client;
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The page could not be retrieved
    Failure {
        /// Human-readable reason (network error, timeout, HTTP status)
        reason: String,
    },
}

impl FetchResult {
    /// Returns true for [`FetchResult::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Collaborator that retrieves pages and derives their text and links
///
/// Only `fetch` touches the network. `parse_text` and `extract_links` default
/// to the HTML parser in [`crate::crawler::parser`].
pub trait PageFetcher {
    /// Retrieves the HTML of `url`
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;

    /// Extracts the visible text of an HTML document
    fn parse_text(&self, html: &str) -> String {
        parser::parse_text(html)
    }

    /// Extracts absolute links on the same host and port as `base_url`
    fn extract_links(&self, html: &str, base_url: &Url) -> BTreeSet<String> {
        parser::extract_links(html, base_url)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetcher` - Timeout settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use keyword_crawler::config::{FetcherConfig, UserAgentConfig};
/// use keyword_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(fetcher.timeout_secs);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    pub fn new(user_agent: &UserAgentConfig, fetcher: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, fetcher)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// # Outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx with readable body | `Success` |
/// | Any other HTTP status | `Failure` ("HTTP <code>") |
/// | Timeout | `Failure` ("Request timeout") |
/// | Connection refused / DNS | `Failure` ("Connection failed") |
/// | Body decode error | `Failure` |
///
/// Redirects are followed by the client. Failed fetches are never retried.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let reason = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::Failure { reason };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::Failure {
            reason: format!("HTTP {}", status.as_u16()),
        };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::Failure {
            reason: format!("Failed to read body: {}", e),
        },
    }
}
