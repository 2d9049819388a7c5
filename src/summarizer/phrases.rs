//! Bigram key-phrase extraction

use crate::summarizer::stopwords::StopwordFilter;
use std::collections::HashMap;
use std::fmt;

/// Two adjacent content words, lowercased
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPhrase {
    pub first: String,
    pub second: String,
}

impl KeyPhrase {
    /// True when the sentence mentions both words of the phrase
    pub fn occurs_in(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        lower.contains(&self.first) && lower.contains(&self.second)
    }
}

impl fmt::Display for KeyPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Extracts up to `limit` of the most frequent bigrams
///
/// `letters` is the letter-only copy of the text. Stopwords and tokens of two
/// letters or fewer are removed before pairing, so a bigram may span a removed
/// word. Equal counts keep the order of first appearance.
pub fn extract_key_phrases(letters: &str, stopwords: &StopwordFilter, limit: usize) -> Vec<KeyPhrase> {
    let tokens: Vec<String> = letters
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.len() > 2 && !stopwords.is_stopword(w))
        .collect();

    // (count, first index) per bigram
    let mut counts: HashMap<(&str, &str), (usize, usize)> = HashMap::new();
    for (i, pair) in tokens.windows(2).enumerate() {
        let entry = counts
            .entry((pair[0].as_str(), pair[1].as_str()))
            .or_insert((0, i));
        entry.0 += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|((first, second), _)| KeyPhrase {
            first: first.to_string(),
            second: second.to_string(),
        })
        .collect()
}
