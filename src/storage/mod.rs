//! Storage module for in-memory crawl state
//!
//! Crawl state lives only for the duration of a run: the visited set and the
//! per-page results are both held in a [`SharedStore`], which every crawl
//! task mutates concurrently.

mod shared;

pub use shared::SharedStore;

use crate::state::PageRecord;

/// Set of canonical URL strings already claimed for crawling
pub type VisitedSet = SharedStore<String, ()>;

/// Mapping from canonical URL string to its page record
pub type ResultsStore = SharedStore<String, PageRecord>;
