//! Crawl progress tracking
//!
//! This module tracks what happened to each attempted URL and keeps the
//! per-session counters reported in the run metadata.

mod page_state;

pub use page_state::{CrawlStats, PageOutcome};
