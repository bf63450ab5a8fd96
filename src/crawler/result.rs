//! Aggregated crawl result
//!
//! Built once, after every crawl task has joined, from snapshots of the
//! visited set and the results store.

use crate::state::{PageOutcome, PageRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use url::Url;

/// Immutable outcome of one crawl run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    /// The seed exactly as it was keyed
    pub seed: String,

    /// Page → followed canonical child URLs
    ///
    /// Crawled and skipped pages appear here; skipped pages have no links.
    pub links: BTreeMap<String, Vec<String>>,

    /// Page → raw asset references
    pub assets: BTreeMap<String, Vec<String>>,

    /// Pages not fetched because of the extension whitelist
    pub skipped: BTreeSet<String>,

    /// Pages claimed but never recorded (fetch failed)
    pub failed: BTreeSet<String>,

    #[serde(skip)]
    pub started_at: DateTime<Utc>,

    #[serde(skip)]
    pub finished_at: DateTime<Utc>,
}

impl CrawlResult {
    /// Creates an empty result for `seed`
    pub fn new(seed: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            seed: seed.into(),
            links: BTreeMap::new(),
            assets: BTreeMap::new(),
            skipped: BTreeSet::new(),
            failed: BTreeSet::new(),
            started_at: now,
            finished_at: now,
        }
    }

    /// Builds the result from the final contents of the crawl stores
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed key
    /// * `visited` - Every URL claimed during the run
    /// * `records` - Page records written by finished tasks
    pub fn from_snapshot(
        seed: String,
        visited: HashMap<String, ()>,
        records: HashMap<String, PageRecord>,
    ) -> Self {
        let mut result = Self::new(seed);

        for url in visited.into_keys() {
            if !records.contains_key(&url) {
                result.failed.insert(url);
            }
        }

        // Skipped pages appear in both maps with empty lists
        for (url, record) in records {
            if record.outcome() == PageOutcome::Skipped {
                result.skipped.insert(url.clone());
            }
            result.links.insert(url.clone(), record.links().to_vec());
            result.assets.insert(url, record.assets().to_vec());
        }

        result
    }

    /// Returns the outcome of `url`, or `None` if it was never claimed
    pub fn outcome(&self, url: &str) -> Option<PageOutcome> {
        if self.failed.contains(url) {
            Some(PageOutcome::Failed)
        } else if self.skipped.contains(url) {
            Some(PageOutcome::Skipped)
        } else if self.links.contains_key(url) {
            Some(PageOutcome::Crawled)
        } else {
            None
        }
    }

    /// Returns every claimed URL: recorded pages first, then failed ones
    pub fn pages(&self) -> impl Iterator<Item = &String> {
        self.links.keys().chain(self.failed.iter())
    }

    /// Returns the seed's host, used to name output files
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.seed)
            .ok()?
            .host_str()
            .map(str::to_string)
    }

    /// Returns the wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
