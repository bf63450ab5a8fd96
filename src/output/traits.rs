//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! artifacts they produce.

use crate::crawler::CrawlResult;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Format of the artifacts written after a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document with the links and assets maps
    Json,

    /// Graphviz descriptions of the link graph and the asset graph
    Dot,

    /// Human-readable run summary
    Markdown,
}

impl OutputFormat {
    /// Returns the name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Dot => "dot",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rendered artifact, not yet written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name, relative to the output directory
    pub name: String,

    /// File contents
    pub contents: String,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Trait for turning a crawl result into artifacts
///
/// Rendering is kept separate from writing so handlers can be tested
/// without touching the filesystem.
pub trait OutputHandler {
    /// Renders the artifacts for a finished crawl
    ///
    /// # Arguments
    ///
    /// * `result` - The finished crawl
    fn render(&self, result: &CrawlResult) -> OutputResult<Vec<OutputFile>>;
}

/// Returns the base name of the artifacts for a crawl: the seed's host
pub fn file_stem(result: &CrawlResult) -> String {
    result.host().unwrap_or_else(|| "crawl".to_string())
}
