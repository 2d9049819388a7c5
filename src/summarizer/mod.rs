//! Extractive summarization
//!
//! Pages are summarized by selecting their highest-scoring sentences
//! verbatim. The pipeline is:
//! - normalise the text and split it into sentences
//! - score sentences with TF-IDF and keep the top `ceil(n * ratio)`
//! - extract bigram key phrases from the letter-only text
//! - bucket the kept sentences into sections and render them

mod phrases;
mod preprocess;
mod scoring;
mod sections;
mod stopwords;

pub use phrases::{extract_key_phrases, KeyPhrase};
pub use preprocess::{letters_only, normalize, split_sentences};
pub use scoring::{score_sentences, select_top, selection_size};
pub use sections::{Section, SectionedSummary};
pub use stopwords::StopwordFilter;

use crate::config::SummarizerConfig;
use tracing::debug;

/// Frequency-based extractive summarizer
#[derive(Debug, Clone)]
pub struct Summarizer {
    stopwords: StopwordFilter,
    key_phrases: usize,
    sentences_per_section: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(&SummarizerConfig::default())
    }
}

impl Summarizer {
    /// Creates a summarizer with the English stopword list
    pub fn new(config: &SummarizerConfig) -> Self {
        Self::with_stopwords(config, StopwordFilter::english())
    }

    pub fn with_stopwords(config: &SummarizerConfig, stopwords: StopwordFilter) -> Self {
        Self {
            stopwords,
            key_phrases: config.key_phrases,
            sentences_per_section: config.sentences_per_section,
        }
    }

    /// Summarizes `text`, keeping roughly `ratio` of its sentences
    pub fn summarize(&self, text: &str, ratio: f64) -> String {
        self.analyze(text, ratio).to_string()
    }

    /// Builds the structured summary that [`Summarizer::summarize`] renders
    pub fn analyze(&self, text: &str, ratio: f64) -> SectionedSummary {
        let normalized = normalize(text);
        let sentences = split_sentences(&normalized);
        if sentences.is_empty() {
            debug!("No sentences found, returning empty summary");
            return SectionedSummary::default();
        }

        let scores = score_sentences(&sentences, &self.stopwords);
        let k = selection_size(sentences.len(), ratio);
        let selected = select_top(&scores, k);
        debug!(
            "Selected {} of {} sentences (ratio {})",
            selected.len(),
            sentences.len(),
            ratio
        );

        let key_phrases = extract_key_phrases(
            &letters_only(&normalized),
            &self.stopwords,
            self.key_phrases,
        );

        let key_sentences = selected.into_iter().map(|i| sentences[i].clone());
        SectionedSummary::build(key_phrases, key_sentences, self.sentences_per_section)
    }

    /// Key sentences in document order, without sectioning
    pub fn key_sentences(&self, text: &str, ratio: f64) -> Vec<String> {
        let sentences = split_sentences(&normalize(text));
        let scores = score_sentences(&sentences, &self.stopwords);
        select_top(&scores, selection_size(sentences.len(), ratio))
            .into_iter()
            .map(|i| sentences[i].clone())
            .collect()
    }
}
