use std::fmt;
use url::Url;

/// A URL reduced to its canonical textual form
///
/// The canonical string is the identity key used by the crawler: two
/// references that canonicalize to the same string are the same crawl unit.
/// The parsed [`Url`] is kept alongside for scope checks and fetching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl {
    canonical: String,
    url: Url,
}

impl CanonicalUrl {
    /// Returns the canonical string
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Returns the parsed form of the canonical URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Consumes the value, returning the canonical string
    pub fn into_string(self) -> String {
        self.canonical
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

/// Canonicalizes a URL according to Sumi-Trace's normalization rules
///
/// # Normalization Steps
///
/// 1. Lowercase the scheme and the host
/// 2. Remove the fragment (everything after #)
/// 3. Collapse duplicate consecutive slashes in the path
/// 4. Remove a single trailing slash (the root path `/` becomes empty)
/// 5. Sort query parameters by key, keeping the order of repeated keys
/// 6. Remove an empty query string (trailing ?)
///
/// User info and non-default ports are preserved.
///
/// # Examples
///
/// ```
/// use sumi_trace::url::canonicalize;
/// use url::Url;
///
/// let url = Url::parse("HTTP://Example.COM//docs/?b=2&a=1#intro").unwrap();
/// assert_eq!(canonicalize(&url).as_str(), "http://example.com/docs?a=1&b=2");
///
/// let root = Url::parse("http://example.com/").unwrap();
/// assert_eq!(canonicalize(&root).as_str(), "http://example.com");
/// ```
pub fn canonicalize(url: &Url) -> CanonicalUrl {
    let path = normalize_path(url.path());
    let query = url.query().map(sort_query).filter(|q| !q.is_empty());

    let mut canonical = String::with_capacity(url.as_str().len());
    canonical.push_str(&url.scheme().to_ascii_lowercase());
    canonical.push(':');

    if let Some(host) = url.host_str() {
        canonical.push_str("//");

        if !url.username().is_empty() || url.password().is_some() {
            canonical.push_str(url.username());
            if let Some(password) = url.password() {
                canonical.push(':');
                canonical.push_str(password);
            }
            canonical.push('@');
        }

        canonical.push_str(&host.to_ascii_lowercase());

        if let Some(port) = url.port() {
            canonical.push(':');
            canonical.push_str(&port.to_string());
        }
    }

    canonical.push_str(&path);

    if let Some(query) = &query {
        canonical.push('?');
        canonical.push_str(query);
    }

    let mut parsed = url.clone();
    parsed.set_fragment(None);
    parsed.set_path(&path);
    parsed.set_query(query.as_deref());

    CanonicalUrl {
        canonical,
        url: parsed,
    }
}

/// Collapses duplicate slashes and strips one trailing slash
fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());

    for c in path.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }

    if normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Sorts query parameters by key; empty `&&` segments are dropped
fn sort_query(query: &str) -> String {
    let mut pairs: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();

    // Stable sort keeps repeated keys in their original order
    pairs.sort_by(|a, b| query_key(a).cmp(query_key(b)));

    pairs.join("&")
}

fn query_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(key, _)| key)
}
