//! Output module for writing crawl results and reports
//!
//! This module handles:
//! - Exporting the crawl result as JSON or as DOT graph descriptions
//! - Generating markdown summaries of a run
//! - Computing and printing crawl statistics

mod dot;
mod json;
mod markdown;
pub mod stats;
mod traits;

pub use dot::DotOutputHandler;
pub use json::JsonOutputHandler;
pub use markdown::{format_markdown_summary, MarkdownOutputHandler};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputFile, OutputFormat, OutputHandler, OutputResult};

use std::path::{Path, PathBuf};

/// Returns the handler for an output format
pub fn handler_for(format: OutputFormat) -> Box<dyn OutputHandler> {
    match format {
        OutputFormat::Json => Box::new(JsonOutputHandler),
        OutputFormat::Dot => Box::new(DotOutputHandler),
        OutputFormat::Markdown => Box::new(MarkdownOutputHandler),
    }
}

/// Writes rendered artifacts into `dir`, creating it if needed
///
/// # Arguments
///
/// * `dir` - Output directory
/// * `files` - Rendered artifacts
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written files, in input order
/// * `Err(OutputError)` - Failed to create the directory or write a file
pub fn write_to_dir(dir: &Path, files: &[OutputFile]) -> OutputResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        std::fs::write(&path, &file.contents)?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlResult;
    use tempfile::TempDir;

    #[test]
    fn test_write_to_dir() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested");
        let files = vec![
            OutputFile::new("one.txt", "1"),
            OutputFile::new("two.txt", "2"),
        ];

        let written = write_to_dir(&target, &files).unwrap();

        assert_eq!(written, vec![target.join("one.txt"), target.join("two.txt")]);
        assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "2");
    }

    #[test]
    fn test_handler_for_each_format() {
        let result = CrawlResult::new("http://abcd.com");

        let count = |format| handler_for(format).render(&result).unwrap().len();
        assert_eq!(count(OutputFormat::Json), 1);
        assert_eq!(count(OutputFormat::Dot), 2);
        assert_eq!(count(OutputFormat::Markdown), 1);
    }
}
