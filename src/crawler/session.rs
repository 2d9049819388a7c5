//! Crawl session - the main traversal loop
//!
//! A session owns the frontier and the fetch strategy for one crawl. The
//! consumer pulls pages one at a time with [`CrawlSession::next_page`]; each
//! pull fetches until a page with content is found or the crawl is over.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::crawler::sitemap::SitemapResolver;
use crate::state::{CrawlStats, PageOutcome};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// A fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: Url,
    pub content: String,
}

/// Traversal limits for a session
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Maximum number of pages visited; failed fetches do not count
    pub max_pages: usize,

    /// Pause after every attempt
    pub delay: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 50,
            delay: Duration::from_secs(1),
        }
    }
}

/// How the session finds pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlMode {
    /// Follow same-site links found in fetched pages
    Links,

    /// Visit the seed plus the sitemap entries; links are not followed
    Sitemap,
}

/// State for a single crawl
pub struct CrawlSession {
    seed: Url,
    mode: CrawlMode,
    fetcher: Box<dyn PageFetcher>,
    frontier: Frontier,
    delay: Duration,
    stats: CrawlStats,
    closed: bool,
}

impl CrawlSession {
    /// Starts a session that discovers pages by following links
    pub fn new(seed: Url, fetcher: Box<dyn PageFetcher>, options: CrawlOptions) -> Self {
        tracing::info!(
            "Starting crawl of {} with {} fetcher (max {} pages)",
            seed,
            fetcher.name(),
            options.max_pages
        );

        Self {
            frontier: Frontier::new(seed.clone(), options.max_pages),
            seed,
            mode: CrawlMode::Links,
            fetcher,
            delay: options.delay,
            stats: CrawlStats::default(),
            closed: false,
        }
    }

    /// Starts a session whose frontier is the seed plus the site's sitemap
    ///
    /// The sitemap is looked up at `sitemap.xml` relative to the seed. A
    /// missing or broken sitemap leaves only the seed in the frontier.
    pub async fn with_sitemap(
        seed: Url,
        fetcher: Box<dyn PageFetcher>,
        options: CrawlOptions,
        resolver: &SitemapResolver,
    ) -> Self {
        let mut session = Self::new(seed, fetcher, options);
        session.mode = CrawlMode::Sitemap;

        match session.seed.join("sitemap.xml") {
            Ok(sitemap_url) => {
                let urls = resolver.resolve(&sitemap_url).await;
                let added = session.frontier.extend(urls);
                tracing::info!("Added {} URLs from {}", added, sitemap_url);
            }
            Err(e) => tracing::warn!("Cannot build sitemap URL for {}: {}", session.seed, e),
        }

        session
    }

    /// Fetches until the next page with content, or returns None when the
    /// frontier is empty or the page budget is spent
    ///
    /// Once this returns None the fetcher has been closed and every later call
    /// returns None as well.
    pub async fn next_page(&mut self) -> Option<PageRecord> {
        if self.closed {
            return None;
        }

        loop {
            let Some(url) = self.frontier.next_url() else {
                self.finish().await;
                return None;
            };

            tracing::debug!("Processing URL: {}", url);

            let (outcome, page) = match self.fetcher.fetch(&url).await {
                Ok(content) if !content.trim().is_empty() => {
                    self.frontier.mark_visited(&url);
                    if self.mode == CrawlMode::Links {
                        let links = extract_links(&url, &self.seed, &content);
                        let added = self.frontier.extend(links);
                        tracing::debug!("Discovered {} new links on {}", added, url);
                    }
                    (PageOutcome::Emitted, Some(PageRecord { url, content }))
                }
                Ok(_) => {
                    self.frontier.mark_visited(&url);
                    tracing::info!("No content at {}, skipping", url);
                    (PageOutcome::Empty, None)
                }
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", url, e);
                    (PageOutcome::Failed, None)
                }
            };

            self.stats.record(outcome);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            if page.is_some() {
                return page;
            }
        }
    }

    /// Releases the fetcher; safe to call any number of times
    pub async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.fetcher.close().await;
        }
    }

    async fn finish(&mut self) {
        tracing::info!(
            "Crawl complete: {} pages emitted, {} empty, {} failed, {} left in frontier",
            self.stats.emitted,
            self.stats.empty,
            self.stats.failed,
            self.frontier.pending_len()
        );
        self.close().await;
    }

    /// The seed URL
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// How pages are discovered
    pub fn mode(&self) -> CrawlMode {
        self.mode
    }

    /// Name of the fetch strategy in use
    pub fn fetcher_name(&self) -> &'static str {
        self.fetcher.name()
    }

    /// Counters for the attempts made so far
    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    /// URLs that answered, with or without content; bounded by `max_pages`
    pub fn visited(&self) -> &HashSet<Url> {
        self.frontier.visited()
    }

    /// Every URL fetched so far, including failures
    pub fn attempted(&self) -> &HashSet<Url> {
        self.frontier.attempted()
    }

    /// Number of URLs waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.pending_len()
    }

    /// Returns true once the fetcher has been released
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
