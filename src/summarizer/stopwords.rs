//! Stopword filtering
//!
//! Wraps the English list from the `stop-words` crate.

use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// Creates a filter with the English stopword list
    pub fn english() -> Self {
        let stopwords = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        Self { stopwords }
    }

    /// Creates a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
