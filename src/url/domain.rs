use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_digest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the host plus any explicit port, e.g. `example.com:8080`
///
/// This is the name used for output directories and for reconstructing page
/// URLs from stored artifacts.
pub fn site_label(url: &Url) -> Option<String> {
    let domain = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", domain, port),
        None => domain,
    })
}

/// Checks whether two URLs belong to the same site
///
/// Hosts are compared case-insensitively together with any non-default port,
/// so `http://example.com/` and `https://example.com:443/` match while
/// `sub.example.com` does not match `example.com`.
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(ha), Some(hb)) => ha == hb && a.port() == b.port(),
        _ => false,
    }
}
