//! Statistics generation from a crawl result
//!
//! This module provides functionality for extracting and displaying
//! crawl statistics once the crawl has finished.

use crate::crawler::CrawlResult;
use crate::state::PageOutcome;
use std::collections::{BTreeMap, HashSet};

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of pages claimed
    pub total_pages: u64,

    /// Count of pages by outcome
    pub pages_by_outcome: BTreeMap<&'static str, u64>,

    /// Total number of page → child edges
    pub total_links: u64,

    /// Number of distinct asset references
    pub unique_assets: u64,

    /// Wall-clock duration of the run
    pub duration_seconds: f64,
}

impl CrawlStatistics {
    /// Computes statistics for a finished crawl
    pub fn from_result(result: &CrawlResult) -> Self {
        let mut pages_by_outcome = BTreeMap::new();
        for outcome in PageOutcome::all() {
            pages_by_outcome.insert(outcome.as_str(), 0);
        }
        for page in result.pages() {
            if let Some(outcome) = result.outcome(page) {
                *pages_by_outcome.entry(outcome.as_str()).or_insert(0) += 1;
            }
        }

        let total_links = result.links.values().map(|l| l.len() as u64).sum();
        let unique_assets = result
            .assets
            .values()
            .flatten()
            .collect::<HashSet<_>>()
            .len() as u64;

        Self {
            total_pages: result.pages().count() as u64,
            pages_by_outcome,
            total_links,
            unique_assets,
            duration_seconds: result.duration().num_milliseconds() as f64 / 1000.0,
        }
    }

    /// Returns the number of pages with the given outcome
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.pages_by_outcome
            .get(outcome.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Returns the share of claimed pages that were crawled, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.count(PageOutcome::Crawled) as f64 / self.total_pages as f64 * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total pages: {}", stats.total_pages);
    println!("  Total links followed: {}", stats.total_links);
    println!("  Unique assets: {}", stats.unique_assets);
    println!("  Duration: {:.2}s", stats.duration_seconds);
    println!();

    println!("Pages by Outcome:");
    for outcome in PageOutcome::all() {
        let count = stats.count(outcome);
        let percentage = if stats.total_pages > 0 {
            (count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages crawled)",
        stats.success_rate(),
        stats.count(PageOutcome::Crawled),
        stats.total_pages
    );
}
