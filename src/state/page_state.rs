//! Page record and outcome definitions
//!
//! A URL claimed by the crawler ends in exactly one of three outcomes. Two of
//! them leave a [`PageRecord`] in the results store; a failed fetch leaves
//! nothing, which is how it stays distinguishable from a deliberate skip.
use serde::Serialize;
use std::fmt;

/// Per-URL record written once by the task that finished the URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRecord {
    /// Not fetched: the path extension is outside the fetch whitelist
    Skipped,

    /// Fetched and processed
    Crawled {
        /// Canonical child URLs the crawler chose to follow, first-occurrence order
        links: Vec<String>,

        /// Raw asset references, document order
        assets: Vec<String>,
    },
}

impl PageRecord {
    /// Returns the outcome this record represents
    pub fn outcome(&self) -> PageOutcome {
        match self {
            Self::Skipped => PageOutcome::Skipped,
            Self::Crawled { .. } => PageOutcome::Crawled,
        }
    }

    /// Returns the followed links, empty for a skipped page
    pub fn links(&self) -> &[String] {
        match self {
            Self::Skipped => &[],
            Self::Crawled { links, .. } => links,
        }
    }

    /// Returns the extracted assets, empty for a skipped page
    pub fn assets(&self) -> &[String] {
        match self {
            Self::Skipped => &[],
            Self::Crawled { assets, .. } => assets,
        }
    }
}

/// Final outcome of a claimed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    /// Page was fetched and its links and assets recorded
    Crawled,

    /// Page was deliberately not fetched (extension whitelist)
    Skipped,

    /// Fetch was attempted and failed; outcome unknown
    Failed,
}

impl PageOutcome {
    /// Returns the string used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawled => "crawled",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> [Self; 3] {
        [Self::Crawled, Self::Skipped, Self::Failed]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcome() {
        assert_eq!(PageRecord::Skipped.outcome(), PageOutcome::Skipped);

        let crawled = PageRecord::Crawled {
            links: vec![],
            assets: vec![],
        };
        assert_eq!(crawled.outcome(), PageOutcome::Crawled);
    }

    #[test]
    fn test_skipped_has_no_content() {
        assert!(PageRecord::Skipped.links().is_empty());
        assert!(PageRecord::Skipped.assets().is_empty());
    }

    #[test]
    fn test_crawled_accessors() {
        let record = PageRecord::Crawled {
            links: vec!["http://a.com/x".to_string()],
            assets: vec!["/img.png".to_string(), "/app.js".to_string()],
        };

        assert_eq!(record.links(), ["http://a.com/x"]);
        assert_eq!(record.assets().len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(PageOutcome::Crawled.to_string(), "crawled");
        assert_eq!(PageOutcome::Skipped.to_string(), "skipped");
        assert_eq!(PageOutcome::Failed.to_string(), "failed");
    }

    #[test]
    fn test_all_outcomes_distinct() {
        let all = PageOutcome::all();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }
}
