//! URL handling module for Sumi-Trace
//!
//! This module provides canonicalization, scope checks, the extension helper
//! used by the fetch whitelist, and seed validation.

mod normalize;
mod scope;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use normalize::{canonicalize, CanonicalUrl};
pub use scope::{is_http_scheme, path_extension, same_authority};

/// Parses and validates a seed URL
///
/// A seed must carry both a non-empty scheme and a non-empty host.
///
/// # Examples
///
/// ```
/// use sumi_trace::url::parse_seed;
///
/// assert!(parse_seed("http://example.com").is_ok());
/// assert!(parse_seed("example.com/path").is_err());
/// assert!(parse_seed("mailto:someone@example.com").is_err());
/// ```
pub fn parse_seed(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw).map_err(|source| UrlError::Parse {
        url: raw.to_string(),
        source,
    })?;

    if url.scheme().is_empty() {
        return Err(UrlError::MissingScheme(raw.to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost(raw.to_string())),
    }
}
