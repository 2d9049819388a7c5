/// Outcome definitions for tracking crawl progress
///
/// Every URL the session attempts ends in exactly one of these outcomes.
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened when the session attempted a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Content was fetched and handed to the consumer
    Emitted,

    /// The fetcher returned no content (e.g. render timeout); page skipped
    Empty,

    /// The fetch failed (transport error or non-2xx status); page skipped
    Failed,
}

impl PageOutcome {
    /// Returns true if the page reached the consumer
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Emitted)
    }

    /// Converts the outcome to its string representation for logs and metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emitted => "emitted",
            Self::Empty => "empty",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Running counters for one crawl session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub emitted: usize,
    pub empty: usize,
    pub failed: usize,
}

impl CrawlStats {
    /// Records the outcome of one attempt
    pub fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Emitted => self.emitted += 1,
            PageOutcome::Empty => self.empty += 1,
            PageOutcome::Failed => self.failed += 1,
        }
    }

    /// Total number of URLs attempted
    pub fn attempted(&self) -> usize {
        self.emitted + self.empty + self.failed
    }
}
