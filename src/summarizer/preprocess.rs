//! Text normalisation, sentence segmentation and tokenisation

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn non_letter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").unwrap())
}

/// Strips tag-like substrings and collapses whitespace to single spaces
pub fn normalize(text: &str) -> String {
    let without_tags = tag_re().replace_all(text, "");
    whitespace_re()
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Removes everything except ASCII letters and whitespace
///
/// Lossy; the result is only used for scoring and key phrases.
pub fn letters_only(text: &str) -> String {
    non_letter_re().replace_all(text, "").into_owned()
}

/// Splits normalised text into sentences on Unicode sentence boundaries
///
/// Sentences are trimmed; fragments without any letter are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

/// Lowercased letter-only words of a piece of text
pub fn words(text: &str) -> Vec<String> {
    letters_only(text)
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}
