//! Run metadata written to `metadata.json`

use crate::state::CrawlStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured record of one crawl-and-summarize run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlMetadata {
    pub seed_url: String,
    pub domain: String,

    /// Name of the fetch strategy ("static" or "rendered")
    pub fetcher: String,
    pub use_sitemap: bool,
    pub max_pages: usize,
    pub delay_ms: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of URLs that answered, with or without content
    pub visited: usize,
    pub stats: CrawlStats,
    pub emitted_urls: Vec<String>,
    pub summarized_pages: usize,

    /// SHA-256 of the configuration file, when one was loaded
    pub config_hash: Option<String>,
}

impl CrawlMetadata {
    /// Wall-clock duration of the run, once it has finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}
