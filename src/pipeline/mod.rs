//! Crawl-then-summarize pipeline
//!
//! A run crawls the site into an [`ArtifactStore`], summarizes every saved
//! page, writes the meta-summary and finally records the run metadata.

use crate::config::Config;
use crate::crawler::{
    build_http_client, CrawlOptions, CrawlSession, PageFetcher, SitemapResolver, StaticFetcher,
};
use crate::output::{create_meta_summary, CrawlMetadata};
use crate::storage::{ArtifactStore, FileStore};
use crate::summarizer::Summarizer;
use crate::text::extract_text;
use crate::{DigestError, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

/// Everything a run needs besides the configuration file
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub seed: Url,
    pub config: Config,

    /// Hash of the configuration file, recorded in the metadata
    pub config_hash: Option<String>,

    /// Render pages in a headless browser instead of plain GET requests
    pub use_rendering: bool,

    /// Seed the frontier from `sitemap.xml` and do not follow links
    pub use_sitemap: bool,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub metadata: CrawlMetadata,
}

/// Drains the session, saving every page it yields
///
/// A page that cannot be saved is logged and left out of the returned list;
/// the crawl carries on. The session is closed before returning.
pub async fn crawl_stage(session: &mut CrawlSession, store: &mut dyn ArtifactStore) -> Vec<Url> {
    let mut saved = Vec::new();
    while let Some(page) = session.next_page().await {
        match store.save_raw(&page.url, &page.content) {
            Ok(_) => {
                info!("Scraped: {}", page.url);
                saved.push(page.url);
            }
            Err(e) => warn!("Failed to save {}: {}", page.url, e),
        }
    }

    session.close().await;
    saved
}

/// Summarizes every saved page and writes the meta-summary
///
/// Returns the number of pages summarized. Fails with
/// [`DigestError::NoContentFound`] before writing anything when the store
/// holds no pages.
pub fn summarize_stage(
    store: &mut dyn ArtifactStore,
    summarizer: &Summarizer,
    ratio: f64,
) -> Result<usize> {
    let artifacts = store.list_raw_artifacts()?;
    info!("Found {} scraped files to summarize", artifacts.len());

    if artifacts.is_empty() {
        error!("No scraped content found. Cannot generate summary.");
        return Err(DigestError::NoContentFound {
            dir: store.location().display().to_string(),
        });
    }

    let mut summaries = BTreeMap::new();
    for artifact in &artifacts {
        info!("Summarizing {}...", artifact.name);
        let html = store.read_raw(artifact)?;
        let text = extract_text(&html);
        let summary = summarizer.summarize(&text, ratio);
        store.save_summary(&artifact.url, &summary)?;
        summaries.insert(artifact.url.to_string(), summary);
    }

    let path = store.save_meta_summary(&create_meta_summary(&summaries))?;
    info!(
        "Summary generated and saved to {}. Total summarized pages: {}",
        path.display(),
        artifacts.len()
    );
    Ok(artifacts.len())
}

/// Builds the fetch strategy selected on the command line
pub async fn build_fetcher(config: &Config, use_rendering: bool) -> Result<Box<dyn PageFetcher>> {
    if use_rendering {
        return build_rendered_fetcher(config).await;
    }
    Ok(Box::new(StaticFetcher::from_config(&config.crawler)?))
}

#[cfg(feature = "headless")]
async fn build_rendered_fetcher(config: &Config) -> Result<Box<dyn PageFetcher>> {
    use crate::crawler::{ChromeDriver, RenderError, RenderedFetcher};

    let user_agent = config.crawler.user_agent.clone();
    let driver = tokio::task::spawn_blocking(move || ChromeDriver::launch(&user_agent))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;
    Ok(Box::new(RenderedFetcher::new(driver, &config.crawler)))
}

#[cfg(not(feature = "headless"))]
async fn build_rendered_fetcher(_config: &Config) -> Result<Box<dyn PageFetcher>> {
    Err(crate::crawler::RenderError::Launch(
        "rendered fetching requires building with the `headless` feature".to_string(),
    )
    .into())
}

/// Runs the whole pipeline into a fresh output directory
pub async fn run(options: RunOptions) -> Result<RunReport> {
    let RunOptions {
        seed,
        config,
        config_hash,
        use_rendering,
        use_sitemap,
    } = options;
    let started_at = Utc::now();

    let mut store = FileStore::create(Path::new(&config.output.base_dir), &seed)?;
    info!("Writing output to {}", store.location().display());

    let fetcher = build_fetcher(&config, use_rendering).await?;
    let crawl_options = CrawlOptions {
        max_pages: config.crawler.max_pages,
        delay: Duration::from_millis(config.crawler.delay_ms),
    };

    let mut session = if use_sitemap {
        let resolver = SitemapResolver::new(build_http_client(&config.crawler)?);
        CrawlSession::with_sitemap(seed.clone(), fetcher, crawl_options, &resolver).await
    } else {
        CrawlSession::new(seed.clone(), fetcher, crawl_options)
    };

    let emitted = crawl_stage(&mut session, &mut store).await;

    info!("Starting website summarization...");
    let summarizer = Summarizer::new(&config.summarizer);
    let summarized = summarize_stage(&mut store, &summarizer, config.summarizer.ratio);

    let metadata = CrawlMetadata {
        seed_url: seed.to_string(),
        domain: store.site().to_string(),
        fetcher: session.fetcher_name().to_string(),
        use_sitemap,
        max_pages: config.crawler.max_pages,
        delay_ms: config.crawler.delay_ms,
        started_at,
        finished_at: Some(Utc::now()),
        visited: session.visited().len(),
        stats: session.stats(),
        emitted_urls: emitted.iter().map(Url::to_string).collect(),
        summarized_pages: *summarized.as_ref().unwrap_or(&0),
        config_hash,
    };
    store.save_metadata(&metadata)?;
    summarized?;

    Ok(RunReport {
        output_dir: store.location().to_path_buf(),
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::FetchError;
    use crate::storage::{RawArtifact, StoreError, StoreResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for MapFetcher {
        fn name(&self) -> &'static str {
            "map"
        }

        async fn fetch(&mut self, url: &Url) -> std::result::Result<String, FetchError> {
            self.pages
                .get(url.path())
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn session(pages: &[(&str, &str)]) -> CrawlSession {
        let fetcher = MapFetcher {
            pages: pages
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
        };
        CrawlSession::new(
            Url::parse("https://a.test/").unwrap(),
            Box::new(fetcher),
            CrawlOptions {
                max_pages: 10,
                delay: Duration::ZERO,
            },
        )
    }

    fn store(dir: &TempDir) -> FileStore {
        FileStore::create(dir.path(), &Url::parse("https://a.test/").unwrap()).unwrap()
    }

    /// Store whose writes always fail
    struct BrokenStore(PathBuf);

    impl ArtifactStore for BrokenStore {
        fn location(&self) -> &Path {
            &self.0
        }
        fn save_raw(&mut self, _: &Url, _: &str) -> StoreResult<PathBuf> {
            Err(StoreError::io(
                &self.0,
                std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            ))
        }
        fn read_raw(&self, _: &RawArtifact) -> StoreResult<String> {
            Ok(String::new())
        }
        fn list_raw_artifacts(&self) -> StoreResult<Vec<RawArtifact>> {
            Ok(Vec::new())
        }
        fn save_summary(&mut self, _: &Url, _: &str) -> StoreResult<PathBuf> {
            Ok(self.0.clone())
        }
        fn save_meta_summary(&mut self, _: &str) -> StoreResult<PathBuf> {
            Ok(self.0.clone())
        }
        fn meta_summary_exists(&self) -> bool {
            false
        }
        fn save_metadata(&mut self, _: &CrawlMetadata) -> StoreResult<PathBuf> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_crawl_stage_saves_pages() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut session = session(&[
            ("/", r#"<p>Home</p><a href="/about">About</a>"#),
            ("/about", "<p>About us</p>"),
        ]);

        let saved = crawl_stage(&mut session, &mut store).await;
        assert_eq!(saved.len(), 2);
        assert!(session.is_closed());

        let names: Vec<_> = store
            .list_raw_artifacts()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["about", "index"]);
    }

    #[tokio::test]
    async fn test_crawl_stage_continues_when_store_fails() {
        let mut store = BrokenStore(PathBuf::from("/nowhere"));
        let mut session = session(&[
            ("/", r#"<p>Home</p><a href="/next">Next</a>"#),
            ("/next", "<p>Next</p>"),
        ]);

        let saved = crawl_stage(&mut session, &mut store).await;
        assert!(saved.is_empty());
        assert_eq!(session.stats().emitted, 2);
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_crawl_stage_skips_unsavable_name() {
        // Percent-encoded slug longer than any file name the OS accepts
        let long_path = format!("/{}", "%D0%BF".repeat(50));
        let home = format!(r#"<p>Home</p><a href="{long_path}">Long</a><a href="/zz">ZZ</a>"#);

        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut session = session(&[
            ("/", home.as_str()),
            (long_path.as_str(), "<p>Cyrillic</p>"),
            ("/zz", "<p>Last</p>"),
        ]);

        let saved = crawl_stage(&mut session, &mut store).await;
        let paths: Vec<_> = saved.iter().map(|u| u.path().to_string()).collect();
        assert_eq!(paths, vec!["/", "/zz"]);
        assert_eq!(session.stats().emitted, 3);

        let names: Vec<_> = store
            .list_raw_artifacts()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["index", "zz"]);
    }

    #[test]
    fn test_summarize_stage_without_content_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);

        let result = summarize_stage(&mut store, &Summarizer::default(), 0.3);
        assert!(matches!(result, Err(DigestError::NoContentFound { .. })));
        assert!(!store.meta_summary_exists());
        let summaries = std::fs::read_dir(store.location().join("summaries")).unwrap();
        assert_eq!(summaries.count(), 0);
    }

    #[test]
    fn test_summarize_stage_writes_summaries_and_meta() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        store
            .save_raw(
                &Url::parse("https://a.test/").unwrap(),
                "<html><script>var hidden = 1;</script><p>Ferris the crab loves Rust.</p></html>",
            )
            .unwrap();
        store
            .save_raw(
                &Url::parse("https://a.test/docs/cargo").unwrap(),
                "<p>Cargo fetches crates from the registry.</p>",
            )
            .unwrap();

        let count = summarize_stage(&mut store, &Summarizer::default(), 0.3).unwrap();
        assert_eq!(count, 2);
        assert!(store.meta_summary_exists());

        let index = std::fs::read_to_string(
            store.location().join("summaries/index_summary.txt"),
        )
        .unwrap();
        assert!(index.starts_with("Summary:\n\nKey Phrases:\n"));
        assert!(index.contains("Ferris the crab loves Rust."));
        assert!(!index.contains("hidden"));

        let meta =
            std::fs::read_to_string(store.location().join("a.test_FULL_SUMMARY.txt")).unwrap();
        assert!(meta.starts_with("Website Meta-Summary:\n\nPage: https://a.test/\n"));
        assert!(meta.contains("Page: https://a.test/docs/cargo\n"));
    }
}
