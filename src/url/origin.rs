use url::Url;

/// Checks whether two addresses share an origin (scheme + host + port)
///
/// This is the boundary of the crawl: only addresses with the seed's exact
/// origin are ever scheduled, so the crawler never expands across hosts,
/// subdomains, or scheme changes.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Renders an address's origin as a display string, e.g. `https://example.com`
pub fn origin_label(url: &Url) -> String {
    url.origin().ascii_serialization()
}
