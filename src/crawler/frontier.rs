//! Frontier and visited-set bookkeeping
//!
//! This module handles:
//! - The set of URLs waiting to be fetched
//! - The set of URLs already attempted this session
//! - The page budget that bounds the traversal

use std::collections::{BTreeSet, HashSet};
use url::Url;

/// Pending, attempted and visited URLs for one crawl session
///
/// The pending set is ordered, so URLs are handed out smallest-first and two
/// runs over the same site visit pages in the same order.
///
/// Every URL handed out is attempted exactly once. Only URLs the session
/// marks visited (pages that answered, with or without content) count toward
/// the page budget; a failed fetch does not.
#[derive(Debug, Clone)]
pub struct Frontier {
    /// URLs discovered but not yet attempted
    pending: BTreeSet<Url>,

    /// URLs already handed out; never retried, never shrinks
    attempted: HashSet<Url>,

    /// Attempted URLs that produced a page (possibly empty); bounded by `max_pages`
    visited: HashSet<Url>,

    /// Maximum number of visited URLs
    max_pages: usize,
}

impl Frontier {
    /// Creates a frontier containing only the seed URL
    pub fn new(seed: Url, max_pages: usize) -> Self {
        Self {
            pending: BTreeSet::from([seed]),
            attempted: HashSet::new(),
            visited: HashSet::new(),
            max_pages,
        }
    }

    /// Adds URLs that have not been attempted yet
    ///
    /// Returns the number of URLs that were not already pending.
    pub fn extend<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        let mut added = 0;
        for url in urls {
            if !self.attempted.contains(&url) && self.pending.insert(url) {
                added += 1;
            }
        }
        added
    }

    /// Takes the next URL to attempt
    ///
    /// Returns None when the frontier is empty or the page budget is spent.
    pub fn next_url(&mut self) -> Option<Url> {
        while !self.is_budget_spent() {
            let url = self.pending.pop_first()?;
            if self.attempted.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    /// Records that an attempted URL produced a page
    ///
    /// Returns false if the URL was never handed out or was already visited.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.attempted.contains(url) && self.visited.insert(url.clone())
    }

    /// Returns true once `max_pages` URLs have been visited
    pub fn is_budget_spent(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Returns true if no more URLs will be handed out
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty() || self.is_budget_spent()
    }

    /// URLs that produced a page
    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }

    /// Every URL handed out so far, including failed ones
    pub fn attempted(&self) -> &HashSet<Url> {
        &self.attempted
    }

    /// Returns true if the URL produced a page
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the URL has been handed out
    pub fn is_attempted(&self, url: &Url) -> bool {
        self.attempted.contains(url)
    }

    /// Number of URLs waiting to be attempted
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if the URL is waiting to be attempted
    pub fn is_pending(&self, url: &Url) -> bool {
        self.pending.contains(url)
    }
}
