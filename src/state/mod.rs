//! State module for per-page crawl outcomes
//!
//! # Components
//!
//! - `PageRecord`: What the crawler stores for a finished URL (skipped, or its links and assets)
//! - `PageOutcome`: The queryable outcome of any claimed URL (crawled, skipped, failed)

mod page_state;

// Re-export main types
pub use page_state::{PageOutcome, PageRecord};
