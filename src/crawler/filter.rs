//! Scope filter for discovered references
//!
//! Decides which raw references found on a page are followed. A reference is
//! kept when, after resolution against its parent page, it stays on the
//! parent's host and uses HTTP(S). Kept references are canonicalized and
//! deduplicated, preserving first-occurrence order.

use crate::url::{canonicalize, is_http_scheme, same_authority, CanonicalUrl};
use crate::{UrlError, UrlResult};
use std::collections::HashSet;
use url::{ParseError, Url};

/// Filters raw child references of `parent` down to in-scope canonical URLs
///
/// # Arguments
///
/// * `parent` - The page the references were extracted from
/// * `children` - Raw references, in document order
///
/// # Returns
///
/// Canonical in-scope URLs in first-occurrence order, without duplicates
///
/// # Example
///
/// ```
/// use sumi_trace::crawler::filter;
/// use url::Url;
///
/// let parent = Url::parse("http://example.com/docs/").unwrap();
/// let children = vec![
///     "intro".to_string(),
///     "http://other.com/".to_string(),
///     "/docs/intro#top".to_string(),
/// ];
///
/// let kept: Vec<String> = filter(&parent, &children)
///     .into_iter()
///     .map(|url| url.into_string())
///     .collect();
/// assert_eq!(kept, vec!["http://example.com/docs/intro"]);
/// ```
pub fn filter(parent: &Url, children: &[String]) -> Vec<CanonicalUrl> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::new();

    for child in children {
        let url = match resolve(parent, child) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Dropping reference on {}: {}", parent, e);
                continue;
            }
        };

        // A reference without a host inherits the parent's
        if url.host_str().is_some() && !same_authority(parent, &url) {
            tracing::trace!("Out of scope (host): {}", url);
            continue;
        }

        if !is_http_scheme(url.scheme()) {
            tracing::trace!("Out of scope (scheme): {}", url);
            continue;
        }

        let canonical = canonicalize(&url);
        if seen.insert(canonical.as_str().to_string()) {
            accepted.push(canonical);
        }
    }

    tracing::debug!(
        "Filtered {} references on {} down to {}",
        children.len(),
        parent,
        accepted.len()
    );

    accepted
}

/// Parses a reference, resolving it against the parent when it is relative
fn resolve(parent: &Url, child: &str) -> UrlResult<Url> {
    let parsed = match Url::parse(child) {
        Err(ParseError::RelativeUrlWithoutBase) => parent.join(child),
        other => other,
    };

    parsed.map_err(|source| UrlError::Parse {
        url: child.to_string(),
        source,
    })
}
