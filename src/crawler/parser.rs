//! HTML parser for extracting link and asset references
//!
//! The document is run through the HTML tokenizer only, never the tree
//! builder, so every start tag is seen exactly once and in source order.
//! Each start tag is checked against two fixed tag → attribute-priority
//! tables. For a listed tag the first attribute present with a non-empty
//! value contributes one reference; other tags are ignored. References are
//! returned raw: not resolved, filtered, or canonicalized.
//!
//! The tokenizer is error-tolerant, so malformed or truncated markup never
//! fails the parse; whatever was recognized is returned.

use crate::crawler::fetcher::FetchResult;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, Tag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts, TokenizerResult,
};

/// Link-bearing tags and the attributes checked, in priority order
const LINK_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href"]),
    ("head", &["profile"]),
    ("iframe", &["longdesc", "src"]),
    ("q", &["cite"]),
];

/// Asset-bearing tags and the attributes checked, in priority order
const ASSET_TAGS: &[(&str, &[&str])] = &[
    ("link", &["href"]),
    ("img", &["src"]),
    ("script", &["src"]),
];

/// Parses HTML content and extracts link and asset references
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Returns
///
/// Links and assets in document order
///
/// # Example
///
/// ```
/// use sumi_trace::crawler::parse_html;
///
/// let html = r#"<a href="/about">About</a><img src="/logo.png">"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.links, vec!["/about".to_string()]);
/// assert_eq!(parsed.assets, vec!["/logo.png".to_string()]);
/// ```
pub fn parse_html(html: &str) -> FetchResult {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from(html));

    let mut tokenizer = Tokenizer::new(ReferenceSink::default(), TokenizerOpts::default());
    while let TokenizerResult::Script(()) = tokenizer.feed(&mut input) {}
    tokenizer.end();

    tokenizer.sink.result
}

/// Token sink collecting references from start tags
#[derive(Default)]
struct ReferenceSink {
    result: FetchResult,
}

impl TokenSink for ReferenceSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let tag = match token {
            TagToken(tag) if tag.kind == StartTag => tag,
            _ => return TokenSinkResult::Continue,
        };

        if let Some(link) = extract_attr(&tag, LINK_TAGS) {
            self.result.links.push(link);
        }

        if let Some(asset) = extract_attr(&tag, ASSET_TAGS) {
            self.result.assets.push(asset);
        }

        text_mode(&tag)
    }
}

/// Returns the first non-empty attribute listed for this tag
fn extract_attr(tag: &Tag, tags: &[(&str, &[&str])]) -> Option<String> {
    let (_, attributes) = tags.iter().find(|(name, _)| *name == &*tag.name)?;

    attributes
        .iter()
        .filter_map(|wanted| {
            tag.attrs
                .iter()
                .find(|attr| &*attr.name.local == *wanted)
        })
        .map(|attr| &*attr.value)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Switches the tokenizer to raw text after elements whose content is not markup
fn text_mode(tag: &Tag) -> TokenSinkResult<()> {
    match &*tag.name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_tag_kinds() {
        let html = r#"
            <head profile="http://head.profile">
            <a href="http://a.href"> </a>
            <iframe src="http://iframe.src"> </iframe>
            <q cite="http://q.cite"></q>

            <link href="http://link.href">
            <img src="http://img.src">
            <script src="http://script.src">
        "#;

        let parsed = parse_html(html);

        assert_eq!(
            parsed.links,
            vec![
                "http://head.profile",
                "http://a.href",
                "http://iframe.src",
                "http://q.cite",
            ]
        );
        assert_eq!(
            parsed.assets,
            vec!["http://link.href", "http://img.src", "http://script.src"]
        );
    }

    #[test]
    fn test_attribute_priority() {
        let html = r#"<iframe src="/src" longdesc="/desc"></iframe>"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/desc"]);
    }

    #[test]
    fn test_empty_attribute_falls_through() {
        let html = r#"<iframe longdesc="" src="/frame"></iframe>"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/frame"]);
    }

    #[test]
    fn test_tag_without_attribute_contributes_nothing() {
        let html = r#"<a name="anchor">x</a><a href="">y</a><img alt="none"><script>var x;</script>"#;
        let parsed = parse_html(html);
        assert!(parsed.links.is_empty());
        assert!(parsed.assets.is_empty());
    }

    #[test]
    fn test_unlisted_tags_ignored() {
        let html = r#"<form action="/post"></form><video src="/clip.mp4"></video><area href="/map">"#;
        let parsed = parse_html(html);
        assert!(parsed.links.is_empty());
        assert!(parsed.assets.is_empty());
    }

    #[test]
    fn test_references_kept_raw() {
        let html = r##"<a href="mailto:x@y.com">m</a><a href="#top">t</a><a href="../up/">u</a>"##;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["mailto:x@y.com", "#top", "../up/"]);
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let html = r#"
            <body>
                <a href="/one">1</a>
                <img src="/a.png">
                <a href="/two">2</a>
                <a href="/one">1 again</a>
                <img src="/a.png">
            </body>
        "#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/one", "/two", "/one"]);
        assert_eq!(parsed.assets, vec!["/a.png", "/a.png"]);
    }

    #[test]
    fn test_misnested_table_content_keeps_source_order() {
        let html = r#"<table><tr><td><a href="/first"><img src="/a.png"></td></tr><a href="/second"><img src="/b.png"></table>"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/first", "/second"]);
        assert_eq!(parsed.assets, vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn test_unclosed_anchor_counted_once() {
        let html = r#"<p><a href="/x">t</p><p>more</p>"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/x"]);
    }

    #[test]
    fn test_late_head_tag_still_seen() {
        let html = r#"<body><a href="/x"><head profile="/prof">"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/x", "/prof"]);
    }

    #[test]
    fn test_script_and_style_content_not_parsed() {
        let html = r#"<script src="/app.js">document.write('<a href="/fake">');</script>
            <style>a::after { content: "<img src='/nope.png'>"; }</style>
            <title><a href="/in-title"></title>
            <a href="/real">real</a>"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links, vec!["/real"]);
        assert_eq!(parsed.assets, vec!["/app.js"]);
    }

    #[test]
    fn test_truncated_markup_returns_partial_results() {
        let html = r#"<html><body><a href="/complete">ok</a><a href="/trunc"#;
        let parsed = parse_html(html);
        assert_eq!(parsed.links.first().map(String::as_str), Some("/complete"));
    }

    #[test]
    fn test_empty_document() {
        let parsed = parse_html("");
        assert!(parsed.links.is_empty());
        assert!(parsed.assets.is_empty());
    }
}
