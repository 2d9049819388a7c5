use crate::UrlError;
use url::Url;

/// Normalizes a URL for use as a frontier / visited-set key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Accept only `http` and `https`
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
///
/// Host lowercasing and dot-segment removal are done by the parser itself.
///
/// # Examples
///
/// ```
/// use site_digest::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/docs/../page#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Resolves an `href` against the page it was found on
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
pub fn resolve_href(base_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_parsed(absolute).ok()
}

fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url)
}
