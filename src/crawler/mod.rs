//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind a shared rate gate
//! - HTML parsing and reference extraction
//! - Scope filtering of discovered references
//! - Overall crawl coordination and result aggregation

mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod result;
mod throttle;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, FetchResult, Fetcher, HttpFetcher};
pub use filter::filter;
pub use parser::parse_html;
pub use result::CrawlResult;
pub use throttle::Throttle;

use crate::config::Config;

/// Runs a complete crawl of `seed` over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed
/// 2. Build the HTTP client and rate gate
/// 3. Crawl every reachable page on the seed's host
///
/// # Arguments
///
/// * `seed` - Start URL
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed
/// * `Err(TraceError)` - Invalid seed or HTTP client setup failed
pub async fn crawl(seed: &str, config: &Config) -> crate::Result<CrawlResult> {
    let crawler = Crawler::from_config(seed, config)?;
    Ok(crawler.crawl().await?)
}
