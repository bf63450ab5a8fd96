//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl is a dynamically growing tree of tokio tasks, one per URL. Each
//! task:
//! - Claims its URL in the visited set (losers of a race stop here)
//! - Records a skip for paths outside the extension whitelist
//! - Fetches the page while holding a permit of the global fetch semaphore
//! - Filters the page's links down to in-scope canonical children
//! - Records the page and hands its children back to the root
//!
//! The root owns the task group and spawns one task per returned child until
//! the group is empty, which is exactly when the whole tree has finished.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::filter::filter;
use crate::crawler::result::CrawlResult;
use crate::state::PageRecord;
use crate::storage::{ResultsStore, VisitedSet};
use crate::url::{canonicalize, parse_seed, path_extension, CanonicalUrl};
use crate::CrawlError;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Path extensions eligible for fetching
const FETCH_WHITELIST: &[&str] = &["", ".html"];

/// Single-host crawler
pub struct Crawler {
    seed: Url,
    seed_key: String,
    fetcher: Arc<dyn Fetcher>,
    max_concurrent_fetches: usize,
}

/// State shared by every task of one crawl
struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    permits: Semaphore,
    visited: VisitedSet,
    results: ResultsStore,
}

impl Crawler {
    /// Creates a crawler for `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - Start URL; must have a scheme and a host
    /// * `config` - Crawler settings (concurrency bound, seed keying)
    /// * `fetcher` - Page fetcher used by every task
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlError::InvalidSeed)` - The seed cannot be crawled
    pub fn new(
        seed: &str,
        config: &CrawlerConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, CrawlError> {
        let url = parse_seed(seed).map_err(|e| CrawlError::InvalidSeed {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;

        // The seed is keyed by its raw text unless configured otherwise
        let seed_key = if config.canonicalize_seed {
            canonicalize(&url).into_string()
        } else {
            seed.to_string()
        };

        Ok(Self {
            seed: url,
            seed_key,
            fetcher,
            max_concurrent_fetches: config.max_concurrent_fetches.max(1) as usize,
        })
    }

    /// Creates a crawler that fetches over HTTP according to `config`
    pub fn from_config(seed: &str, config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Self::new(seed, &config.crawler, Arc::new(fetcher))
    }

    /// Returns the key the seed is recorded under
    pub fn seed_key(&self) -> &str {
        &self.seed_key
    }

    /// Crawls every page reachable from the seed on the seed's host
    ///
    /// Per-page fetch failures are logged and reported in the result's
    /// `failed` set; they never abort the crawl.
    pub async fn crawl(&self) -> Result<CrawlResult, CrawlError> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting crawl of {} (max {} concurrent fetches)",
            self.seed_key,
            self.max_concurrent_fetches
        );

        let context = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            permits: Semaphore::new(self.max_concurrent_fetches),
            visited: VisitedSet::new(),
            results: ResultsStore::new(),
        });

        let mut tasks = JoinSet::new();
        tasks.spawn(visit(
            Arc::clone(&context),
            self.seed_key.clone(),
            self.seed.clone(),
        ));

        while let Some(joined) = tasks.join_next().await {
            let children = match joined {
                Ok(children) => children,
                Err(e) => {
                    tracing::error!("Crawl task did not complete: {}", e);
                    continue;
                }
            };

            for child in children {
                let key = child.as_str().to_string();
                if context.visited.contains(&key) {
                    continue;
                }
                let url = child.url().clone();
                tasks.spawn(visit(Arc::clone(&context), key, url));
            }
        }

        let mut result = CrawlResult::from_snapshot(
            self.seed_key.clone(),
            context.visited.snapshot(),
            context.results.snapshot(),
        );
        result.started_at = started_at;
        result.finished_at = Utc::now();

        tracing::info!(
            "Finished crawling {}: {} pages ({} skipped, {} failed) in {:.2}s",
            self.seed_key,
            result.pages().count(),
            result.skipped.len(),
            result.failed.len(),
            result.duration().num_milliseconds() as f64 / 1000.0
        );

        Ok(result)
    }
}

/// Returns true if a page with this path should be fetched
fn is_fetchable(path: &str) -> bool {
    FETCH_WHITELIST.contains(&path_extension(path))
}

/// Processes one URL and returns the children to visit next
async fn visit(context: Arc<CrawlContext>, key: String, url: Url) -> Vec<CanonicalUrl> {
    if !context.visited.claim_if_absent(key.clone(), ()) {
        tracing::trace!("Already claimed: {}", key);
        return Vec::new();
    }

    if !is_fetchable(url.path()) {
        tracing::debug!("Skipping {} (extension not whitelisted)", key);
        context.results.set(key, PageRecord::Skipped);
        return Vec::new();
    }

    let fetched = {
        let _permit = match context.permits.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!("Fetch semaphore closed before {}: {}", key, e);
                return Vec::new();
            }
        };

        context.fetcher.fetch(&key).await
    };

    let page = match fetched {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("{}", e);
            return Vec::new();
        }
    };

    let children = filter(&url, &page.links);
    tracing::debug!(
        "{} children of {}: {:?}",
        children.len(),
        key,
        children.iter().map(CanonicalUrl::as_str).collect::<Vec<_>>()
    );

    tracing::info!(
        "Crawled {} ({} links, {} assets)",
        key,
        children.len(),
        page.assets.len()
    );

    context.results.set(
        key,
        PageRecord::Crawled {
            links: children.iter().map(|c| c.as_str().to_string()).collect(),
            assets: page.assets,
        },
    );

    children
}
