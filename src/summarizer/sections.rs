//! Thematic grouping of key sentences and the plain-text summary layout

use crate::summarizer::phrases::KeyPhrase;
use std::collections::BTreeMap;
use std::fmt;

const FEATURE_KEYWORDS: [&str; 3] = ["feature", "benefit", "advantage"];

/// Thematic bucket of a key sentence, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    MainContent,
    Features,
    Details,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::MainContent => "Main Content",
            Section::Features => "Features",
            Section::Details => "Details",
        }
    }

    /// Picks the bucket for a sentence
    ///
    /// A sentence mentioning both words of any key phrase is main content;
    /// otherwise feature keywords decide, and everything else is detail.
    pub fn classify(sentence: &str, phrases: &[KeyPhrase]) -> Section {
        if phrases.iter().any(|p| p.occurs_in(sentence)) {
            return Section::MainContent;
        }
        let lower = sentence.to_lowercase();
        if FEATURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Section::Features
        } else {
            Section::Details
        }
    }
}

/// Key phrases plus bucketed key sentences of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionedSummary {
    pub key_phrases: Vec<KeyPhrase>,
    pub sections: BTreeMap<Section, Vec<String>>,
}

impl SectionedSummary {
    /// Buckets sentences in order, keeping at most `per_section` in each
    pub fn build(
        key_phrases: Vec<KeyPhrase>,
        sentences: impl IntoIterator<Item = String>,
        per_section: usize,
    ) -> Self {
        let mut sections: BTreeMap<Section, Vec<String>> = BTreeMap::new();
        for sentence in sentences {
            let section = Section::classify(&sentence, &key_phrases);
            let bucket = sections.entry(section).or_default();
            if bucket.len() < per_section {
                bucket.push(sentence);
            }
        }
        sections.retain(|_, bucket| !bucket.is_empty());

        Self {
            key_phrases,
            sections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key_phrases.is_empty() && self.sections.is_empty()
    }

    pub fn section(&self, section: Section) -> &[String] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for SectionedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f)?;
        writeln!(f, "Key Phrases:")?;
        for phrase in &self.key_phrases {
            writeln!(f, "- {phrase}")?;
        }
        writeln!(f)?;

        for (section, sentences) in &self.sections {
            writeln!(f, "{}:", section.title())?;
            for sentence in sentences {
                writeln!(f, "- {sentence}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
