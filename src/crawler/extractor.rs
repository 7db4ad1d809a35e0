//! Link discovery
//!
//! Turns a fetched document into the set of same-origin addresses worth
//! scheduling. The output is a sorted set, so a batch of discoveries arrives
//! at the engine deduplicated and in ascending lexical order.

use crate::url::same_origin;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Schemes an anchor can carry that are never crawlable
const SKIPPED_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Extracts the same-origin link set from a document
///
/// Anchors are read from `a[href]` elements. Each href is resolved against
/// `base`, stripped of its fragment, and kept only if it shares `base`'s
/// origin (scheme + host + port). `mailto:`, `tel:`, `javascript:` and pure
/// in-page fragments are discarded before resolution.
///
/// Malformed documents degrade to whatever anchors the parser can salvage —
/// in the worst case an empty set. Extraction never fails the crawl step.
pub fn extract_links(base: &Url, body: &str) -> BTreeSet<Url> {
    let document = Html::parse_document(body);

    let Ok(selector) = Selector::parse("a[href]") else {
        return BTreeSet::new();
    };

    let mut links = BTreeSet::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(address) = resolve_href(base, href) {
            links.insert(address);
        }
    }

    links
}

/// Resolves one href to a crawlable same-origin address
///
/// Returns None for skipped schemes, fragment-only hrefs, unresolvable
/// values, and anything that lands outside `base`'s origin.
fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let mut address = base.join(href).ok()?;
    address.set_fragment(None);

    same_origin(base, &address).then_some(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://a.example/x").unwrap()
    }

    fn links_of(body: &str) -> Vec<String> {
        extract_links(&base(), body)
            .into_iter()
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_relative_href_resolves_against_base() {
        let links = links_of(r#"<a href="/about">About</a>"#);
        assert_eq!(links, vec!["https://a.example/about"]);
    }

    #[test]
    fn test_same_origin_absolute_href_kept() {
        let links = links_of(r#"<a href="https://a.example/deep/page">Deep</a>"#);
        assert_eq!(links, vec!["https://a.example/deep/page"]);
    }

    #[test]
    fn test_cross_origin_href_excluded() {
        let links = links_of(r#"<a href="https://b.example/y">Other</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_subdomain_excluded() {
        let links = links_of(r#"<a href="https://www.a.example/y">Www</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_protocol_relative_cross_origin_excluded() {
        let links = links_of(r#"<a href="//b.example/y">Other</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_mailto_tel_javascript_skipped() {
        let body = r#"
            <a href="mailto:me@a.example">Mail</a>
            <a href="tel:+15551234">Call</a>
            <a href="javascript:void(0)">JS</a>
        "#;
        assert!(links_of(body).is_empty());
    }

    #[test]
    fn test_fragment_only_href_skipped() {
        assert!(links_of(r##"<a href="#section">Jump</a>"##).is_empty());
    }

    #[test]
    fn test_fragment_stripped_from_kept_links() {
        let links = links_of(r##"<a href="/page#part">Part</a>"##);
        assert_eq!(links, vec!["https://a.example/page"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let body = r##"
            <a href="/page">One</a>
            <a href="/page#top">Two</a>
            <a href="https://a.example/page">Three</a>
        "##;
        assert_eq!(links_of(body), vec!["https://a.example/page"]);
    }

    #[test]
    fn test_output_is_sorted() {
        let body = r#"
            <a href="/c">C</a>
            <a href="/a">A</a>
            <a href="/b">B</a>
        "#;
        assert_eq!(
            links_of(body),
            vec![
                "https://a.example/a",
                "https://a.example/b",
                "https://a.example/c"
            ]
        );
    }

    #[test]
    fn test_idempotent_on_same_input() {
        let body = r#"<a href="/a">A</a><a href="/b">B</a>"#;
        assert_eq!(extract_links(&base(), body), extract_links(&base(), body));
    }

    #[test]
    fn test_garbage_input_yields_empty_set() {
        assert!(links_of("not html at all {{{ <<>>").is_empty());
        assert!(links_of("").is_empty());
    }

    #[test]
    fn test_truncated_html_still_salvages_anchors() {
        // The parser is lenient; a broken tail must not lose earlier anchors
        let body = r#"<a href="/ok">Ok</a><div><a href="/also"#;
        assert!(links_of(body).contains(&"https://a.example/ok".to_string()));
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        assert!(links_of(r#"<a name="top">Top</a>"#).is_empty());
    }
}
