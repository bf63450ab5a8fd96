use crate::output::OutputFormat;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Trace
///
/// Every section is optional; missing values fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of fetches in flight at any instant
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Outbound request rate limit (0 = unlimited)
    #[serde(rename = "requests-per-second")]
    pub requests_per_second: u32,

    /// Timeout for a single fetch (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Key the seed by its canonical form instead of its raw text
    #[serde(rename = "canonicalize-seed")]
    pub canonicalize_seed: bool,
}

impl CrawlerConfig {
    /// Returns the per-fetch timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 512,
            requests_per_second: 0,
            request_timeout: 10,
            canonicalize_seed: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `CrawlerName/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiTrace".to_string(),
            crawler_version: "1.0".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format of the written artifacts
    pub format: OutputFormat,

    /// Directory the artifacts are written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Dot,
            directory: ".".to_string(),
        }
    }
}
