use crate::AddressError;
use url::Url;

/// Normalizes an address string into the canonical form used for equality
///
/// Every address that enters the frontier or the visited set goes through
/// this function first, so byte-equality of the serialized `Url` is the
/// crawl-wide notion of "same page".
///
/// # Normalization Steps
///
/// 1. Parse the string as an absolute URL; reject if malformed
/// 2. Reject schemes other than http and https
/// 3. Reject addresses without a host
/// 4. Remove the fragment (everything after #)
///
/// The host is lowercased and default ports are elided by the `url` crate's
/// own serialization, so those never produce spurious inequality.
///
/// # Examples
///
/// ```
/// use tidepool::normalize_address;
///
/// let url = normalize_address("https://Example.com/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_address(raw: &str) -> Result<Url, AddressError> {
    let mut url = Url::parse(raw).map_err(|e| AddressError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AddressError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(AddressError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
