//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the crawler's user agent and timeout
//! - Gating dispatches through the shared rate limiter
//! - GET requests and extraction of link and asset references
//!
//! Failures are not retried. Non-2xx responses are not errors: their body is
//! processed like any other.

use crate::config::{Config, UserAgentConfig};
use crate::crawler::parser::parse_html;
use crate::crawler::throttle::Throttle;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// References extracted from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// Raw link references, in document order
    pub links: Vec<String>,

    /// Raw asset references, in document order
    pub assets: Vec<String>,
}

/// Fetches one page and extracts its references
///
/// The crawler only depends on this trait, so tests can substitute an
/// in-memory site for the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total time allowed for one request, body included
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sumi_trace::config::UserAgentConfig;
/// use sumi_trace::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10));
/// assert!(client.is_ok());
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher backed by `reqwest`
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    throttle: Option<Throttle>,
}

impl HttpFetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Identification sent with every request
    /// * `timeout` - Per-fetch timeout
    /// * `requests_per_second` - Global dispatch rate (0 = unlimited)
    pub fn new(
        user_agent: &UserAgentConfig,
        timeout: Duration,
        requests_per_second: u32,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, timeout)?;
        let throttle = Throttle::per_second(requests_per_second);

        match &throttle {
            Some(throttle) => tracing::info!(
                "Rate limit: {} requests/sec (one dispatch every {:?})",
                requests_per_second,
                throttle.interval()
            ),
            None => tracing::warn!("No outbound request rate limit"),
        }

        Ok(Self { client, throttle })
    }

    /// Creates a fetcher from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.user_agent,
            config.crawler.timeout(),
            config.crawler.requests_per_second,
        )
    }

    async fn get_body(&self, url: &str) -> Result<String, reqwest::Error> {
        if let Some(throttle) = &self.throttle {
            throttle.wait().await;
        }

        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        response.text().await
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let body = self
            .get_body(url)
            .await
            .map_err(|source| FetchError::FetchFailed {
                url: url.to_string(),
                source,
            })?;

        let result = parse_html(&body);
        tracing::debug!(
            "Extracted {} links and {} assets from {}",
            result.links.len(),
            result.assets.len(),
            url
        );

        Ok(result)
    }
}
