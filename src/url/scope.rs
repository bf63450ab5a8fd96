use url::Url;

/// Returns true if both URLs share the same host and explicit port
///
/// Default ports are dropped by the URL parser, so `http://a.com` and
/// `http://a.com:80` are the same authority.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_trace::url::same_authority;
///
/// let a = Url::parse("http://example.com/a").unwrap();
/// let b = Url::parse("https://EXAMPLE.com/b").unwrap();
/// let c = Url::parse("http://sub.example.com/").unwrap();
/// assert!(same_authority(&a, &b));
/// assert!(!same_authority(&a, &c));
/// ```
pub fn same_authority(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

/// Returns true for the schemes the crawler is willing to follow
pub fn is_http_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

/// Returns the extension of the last path segment, including the dot
///
/// The extension is the suffix starting at the last `.` after the last `/`.
/// Returns an empty string when the last segment has no dot.
///
/// # Examples
///
/// ```
/// use sumi_trace::url::path_extension;
///
/// assert_eq!(path_extension("/docs/report.pdf"), ".pdf");
/// assert_eq!(path_extension("/archive.d/index"), "");
/// assert_eq!(path_extension(""), "");
/// ```
pub fn path_extension(path: &str) -> &str {
    let segment = match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    };

    match segment.rfind('.') {
        Some(i) => &segment[i..],
        None => "",
    }
}
