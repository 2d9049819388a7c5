//! Plain-text extraction from raw HTML

use scraper::{Html, Node};

/// Elements whose entire subtree is dropped before text extraction
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Extracts readable plain text from an HTML document
///
/// Script and style subtrees are removed, every line is trimmed, lines are
/// split further on runs of two or more spaces (multi-column layouts), and
/// empty fragments are dropped. Fragments are joined with `\n`, so the output
/// never contains blank lines.
///
/// # Example
///
/// ```
/// use site_digest::text::extract_text;
///
/// let html = "<html><body><h1>Title</h1><script>var x = 1;</script><p>Body  text</p></body></html>";
/// assert_eq!(extract_text(html), "TitleBody\ntext");
/// ```
pub fn extract_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let raw = visible_text(html);

    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenates every text node that is not inside a hidden element
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        if let Node::Text(chunk) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                text.push_str(chunk);
            }
        }
    }

    text
}
