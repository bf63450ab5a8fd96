//! Configuration module for Sumi-Trace
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: every value has a default and the command
//! line can override the crawler and output settings.
//!
//! # Example
//!
//! ```no_run
//! use sumi_trace::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sumi-trace.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.request_timeout);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
