//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - Fetch strategies (plain HTTP and browser rendering)
//! - Same-site link extraction
//! - Sitemap expansion
//! - Frontier bookkeeping and the pull-based crawl session

mod browser;
mod fetcher;
mod frontier;
mod parser;
mod session;
mod sitemap;

#[cfg(feature = "headless")]
pub use browser::ChromeDriver;
pub use browser::{BrowserDriver, RenderError, RenderedFetcher};
pub use fetcher::{build_http_client, FetchError, PageFetcher, StaticFetcher};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use session::{CrawlMode, CrawlOptions, CrawlSession, PageRecord};
pub use sitemap::{parse_sitemap, SitemapError, SitemapResolver, SITEMAP_NS};
