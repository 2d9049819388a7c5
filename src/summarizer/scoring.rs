//! TF-IDF sentence scoring and top-k selection

use crate::summarizer::preprocess::words;
use crate::summarizer::stopwords::StopwordFilter;
use std::collections::HashMap;

/// Scores each sentence by the sum of its L2-normalised TF-IDF weights
///
/// Each sentence is a document: term frequency is the raw count, idf is the
/// smoothed `ln((1 + n) / (1 + df)) + 1`. Stopwords and one-letter tokens are
/// not terms. A sentence without any term scores 0.
pub fn score_sentences(sentences: &[String], stopwords: &StopwordFilter) -> Vec<f64> {
    let term_counts: Vec<HashMap<String, usize>> = sentences
        .iter()
        .map(|sentence| {
            let mut counts = HashMap::new();
            for word in words(sentence) {
                if word.len() >= 2 && !stopwords.is_stopword(&word) {
                    *counts.entry(word).or_insert(0) += 1;
                }
            }
            counts
        })
        .collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for counts in &term_counts {
        for term in counts.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let n = sentences.len() as f64;
    term_counts
        .iter()
        .map(|counts| {
            let weights: Vec<f64> = counts
                .iter()
                .map(|(term, &tf)| {
                    let df = document_frequency[term.as_str()] as f64;
                    tf as f64 * (((1.0 + n) / (1.0 + df)).ln() + 1.0)
                })
                .collect();

            let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm == 0.0 {
                0.0
            } else {
                weights.iter().sum::<f64>() / norm
            }
        })
        .collect()
}

/// Number of sentences to keep for a given ratio: `ceil(total * ratio)`
///
/// The ratio is clamped to `[0, 1]`, so the result never exceeds `total`.
pub fn selection_size(total: usize, ratio: f64) -> usize {
    if total == 0 || ratio.is_nan() {
        return 0;
    }
    let raw = total as f64 * ratio.clamp(0.0, 1.0);
    // Absorb float noise such as 10 * 0.3 = 3.0000000000000004
    let k = (raw - 1e-9).ceil().max(0.0) as usize;
    k.min(total)
}

/// Indices of the `k` best-scoring sentences, in document order
///
/// Ties are broken in favour of the earlier sentence.
pub fn select_top(scores: &[f64], k: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    ranked.truncate(k);
    ranked.sort_unstable();
    ranked
}
