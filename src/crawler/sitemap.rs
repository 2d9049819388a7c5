//! Sitemap expansion
//!
//! Resolves `sitemap.xml` documents into page URLs. Sitemap indexes are
//! followed recursively; every failure is logged and contributes nothing.

use crate::url::normalize_url;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use reqwest::Client;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use url::Url;

/// XML namespace every sitemap element must be bound to
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Errors while fetching or parsing a single sitemap document
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("XML parse error: {0}")]
    Xml(String),
}

/// Parses a sitemap or sitemap index and returns every `<loc>` value
///
/// Only `<loc>` elements in the sitemap namespace count; values are trimmed
/// and empty ones dropped.
///
/// # Example
///
/// ```
/// use site_digest::crawler::parse_sitemap;
///
/// let xml = r#"<?xml version="1.0"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/a</loc></url>
/// </urlset>"#;
/// assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/a"]);
/// ```
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = NsReader::from_str(xml);
    let mut locs = Vec::new();
    let mut in_loc = false;
    let mut current = String::new();

    loop {
        match reader.read_resolved_event() {
            Ok((ResolveResult::Bound(Namespace(ns)), Event::Start(e)))
                if ns == SITEMAP_NS.as_bytes() && e.local_name().as_ref() == b"loc" =>
            {
                in_loc = true;
                current.clear();
            }
            Ok((_, Event::Text(e))) if in_loc => {
                let text = e.unescape().map_err(|e| SitemapError::Xml(e.to_string()))?;
                current.push_str(&text);
            }
            Ok((_, Event::CData(e))) if in_loc => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok((_, Event::End(e))) if in_loc && e.local_name().as_ref() == b"loc" => {
                in_loc = false;
                let loc = current.trim();
                if !loc.is_empty() {
                    locs.push(loc.to_string());
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(locs)
}

/// Returns true if a `<loc>` points at another sitemap rather than a page
fn is_nested_sitemap(loc: &str) -> bool {
    loc.ends_with(".xml")
}

/// Expands sitemaps into page URLs over HTTP
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    client: Client,
}

impl SitemapResolver {
    /// Creates a resolver that fetches with the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Resolves a sitemap (or sitemap index) into the set of page URLs
    ///
    /// Nested sitemaps are resolved recursively and unioned. A sitemap that
    /// fails to fetch or parse is logged and contributes an empty set; each
    /// sitemap URL is fetched at most once, so cyclic indexes terminate.
    pub async fn resolve(&self, sitemap_url: &Url) -> BTreeSet<Url> {
        let mut pending = vec![sitemap_url.clone()];
        let mut seen = HashSet::new();
        let mut urls = BTreeSet::new();

        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }

            let locs = match self.fetch_locs(&current).await {
                Ok(locs) => locs,
                Err(e) => {
                    tracing::warn!("Failed to process sitemap {}: {}", current, e);
                    continue;
                }
            };

            tracing::debug!("Sitemap {} lists {} entries", current, locs.len());

            for loc in locs {
                match normalize_url(&loc) {
                    Ok(url) if is_nested_sitemap(&loc) => pending.push(url),
                    Ok(url) => {
                        urls.insert(url);
                    }
                    Err(e) => tracing::debug!("Skipping sitemap entry {}: {}", loc, e),
                }
            }
        }

        tracing::info!("Sitemap {} resolved to {} URLs", sitemap_url, urls.len());
        urls
    }

    async fn fetch_locs(&self, url: &Url) -> Result<Vec<String>, SitemapError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitemapError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_sitemap(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>
      https://example.com/about
  </loc></url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            vec!["https://example.com/", "https://example.com/about"]
        );
    }

    #[test]
    fn test_parse_sitemap_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/posts.xml</loc></sitemap>
  <sitemap><loc>https://example.com/pages.xml</loc></sitemap>
</sitemapindex>"#;
        let locs = parse_sitemap(xml).unwrap();
        assert_eq!(locs.len(), 2);
        assert!(locs.iter().all(|l| is_nested_sitemap(l)));
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/search?a=1&amp;b=2</loc></url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            vec!["https://example.com/search?a=1&b=2"]
        );
    }

    #[test]
    fn test_parse_prefixed_namespace() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sm:url><sm:loc>https://example.com/x</sm:loc></sm:url>
</sm:urlset>"#;
        assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/x"]);
    }

    #[test]
    fn test_parse_ignores_foreign_namespace() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/page</loc>
    <image:image><image:loc>https://example.com/photo.jpg</image:loc></image:image>
  </url>
</urlset>"#;
        assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/page"]);
    }

    #[test]
    fn test_parse_without_namespace_finds_nothing() {
        let xml = "<urlset><url><loc>https://example.com/</loc></url></urlset>";
        assert!(parse_sitemap(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_xml() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>x</url></urlset>"#;
        assert!(matches!(parse_sitemap(xml), Err(SitemapError::Xml(_))));
    }

    #[test]
    fn test_is_nested_sitemap() {
        assert!(is_nested_sitemap("https://example.com/sitemap-posts.xml"));
        assert!(!is_nested_sitemap("https://example.com/posts/"));
    }
}
