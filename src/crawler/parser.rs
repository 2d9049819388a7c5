//! HTML parser for extracting same-site links
//!
//! Links come from `<a href="...">` tags only. Every href is resolved against
//! the page URL and kept only if it stays on the seed's site.

use crate::url::{resolve_href, same_site};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracts all same-site links from a page
///
/// Malformed hrefs, non-HTTP(S) schemes and links to other hosts are skipped
/// silently. Fragments are removed so in-page anchors collapse onto the page
/// itself.
///
/// # Example
///
/// ```
/// use site_digest::crawler::extract_links;
/// use url::Url;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// let html = r#"<a href="/about">About</a><a href="https://other.com/">Other</a>"#;
/// let links = extract_links(&seed, &seed, html);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains(&Url::parse("https://example.com/about").unwrap()));
/// ```
pub fn extract_links(page_url: &Url, seed: &Url, html: &str) -> BTreeSet<Url> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_href(page_url, href) {
            Some(absolute_url) if same_site(&absolute_url, seed) => {
                links.insert(absolute_url);
            }
            Some(absolute_url) => {
                tracing::trace!("Skipping off-site link {}", absolute_url);
            }
            None => {}
        }
    }

    links
}
