//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl,
//! including run information, statistics, and the pages that were skipped
//! or failed.

use crate::crawler::CrawlResult;
use crate::output::stats::CrawlStatistics;
use crate::output::traits::{file_stem, OutputFile, OutputHandler, OutputResult};
use crate::state::PageOutcome;
use std::collections::BTreeSet;

/// Maximum number of URLs listed per section
const MAX_LISTED: usize = 50;

/// Writes `<host>_summary.md`
#[derive(Debug, Default)]
pub struct MarkdownOutputHandler;

impl OutputHandler for MarkdownOutputHandler {
    fn render(&self, result: &CrawlResult) -> OutputResult<Vec<OutputFile>> {
        let name = format!("{}_summary.md", file_stem(result));
        Ok(vec![OutputFile::new(name, format_markdown_summary(result))])
    }
}

/// Formats a crawl result as markdown
///
/// # Arguments
///
/// * `result` - The finished crawl
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(result: &CrawlResult) -> String {
    let stats = CrawlStatistics::from_result(result);
    let mut md = String::new();

    // Title
    md.push_str("# Sumi-Trace Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", result.seed));
    md.push_str(&format!(
        "- **Started**: {}\n",
        result.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        result.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n\n",
        stats.duration_seconds
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total Pages**: {}\n", stats.total_pages));
    md.push_str(&format!("- **Total Links**: {}\n", stats.total_links));
    md.push_str(&format!("- **Unique Assets**: {}\n", stats.unique_assets));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Outcome breakdown
    md.push_str("## Page Outcome Breakdown\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    for outcome in PageOutcome::all() {
        md.push_str(&format!("| {} | {} |\n", outcome, stats.count(outcome)));
    }
    md.push('\n');

    push_url_list(&mut md, "Skipped Pages", &result.skipped);
    push_url_list(&mut md, "Failed Pages", &result.failed);

    md
}

/// Appends a bounded list of URLs under a heading, if there are any
fn push_url_list(md: &mut String, title: &str, urls: &BTreeSet<String>) {
    if urls.is_empty() {
        return;
    }

    md.push_str(&format!("## {} ({})\n\n", title, urls.len()));
    for url in urls.iter().take(MAX_LISTED) {
        md.push_str(&format!("- {}\n", url));
    }
    if urls.len() > MAX_LISTED {
        md.push_str(&format!("\n... and {} more\n", urls.len() - MAX_LISTED));
    }
    md.push('\n');
}
