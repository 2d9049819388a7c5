//! Page fetch strategies
//!
//! This module defines the [`PageFetcher`] capability the crawl session pulls
//! content through, plus the plain HTTP implementation:
//! - Building HTTP clients with a fixed user agent string
//! - GET requests to fetch page content
//! - Error classification (transport failure vs. non-2xx status)

use crate::config::CrawlerConfig;
use crate::crawler::browser::RenderError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors produced while fetching a single page
///
/// These never abort a crawl; the session logs them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Rendering failed for {url}: {source}")]
    Render { url: String, source: RenderError },
}

/// A strategy for turning a URL into page content
///
/// Implementations must report problems through the returned `Result` (or an
/// empty string) rather than panicking, so the session can treat every
/// strategy uniformly.
#[async_trait]
pub trait PageFetcher: Send {
    /// Short name used in logs and run metadata
    fn name(&self) -> &'static str;

    /// Fetches the content of `url`
    ///
    /// An empty string means "no content"; the page is skipped.
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError>;

    /// Releases any resources held by the fetcher
    ///
    /// Must be safe to call more than once.
    async fn close(&mut self) {}
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use site_digest::config::CrawlerConfig;
/// use site_digest::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with a plain GET request
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a fetcher with a client built from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}
