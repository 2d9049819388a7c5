//! Site-wide meta-summary

use std::collections::BTreeMap;
use std::fmt::Write;

/// Concatenates per-page summaries into one document, in URL order
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use site_digest::output::create_meta_summary;
///
/// let mut summaries = BTreeMap::new();
/// summaries.insert("https://a.test/".to_string(), "Summary:".to_string());
/// assert_eq!(
///     create_meta_summary(&summaries),
///     "Website Meta-Summary:\n\nPage: https://a.test/\nSummary:\n\n"
/// );
/// ```
pub fn create_meta_summary(summaries: &BTreeMap<String, String>) -> String {
    let mut meta = String::from("Website Meta-Summary:\n\n");
    for (url, summary) in summaries {
        let _ = write!(meta, "Page: {url}\n{summary}\n\n");
    }
    meta
}
