/*!
 * Citation to footnote conversion.
 *
 * Every `\cite{key}` becomes the footnote marker `[^key]`, and a block of
 * footnote definitions is appended to the document. Definitions are unique
 * and sorted, so their order does not depend on where keys are cited.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::bibliography::{Bibliography, BibliographyEntry};

// @const: Inline citation command
static CITATION_MATCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\cite\{(.*?)\}").unwrap());

/// Opening of the block holding the footnote definitions
pub const FOOTNOTE_BLOCK_OPEN: &str = "<div style=\"margin-top: 10rem\">\n";

/// Closing of the footnote block
pub const FOOTNOTE_BLOCK_CLOSE: &str = "\n</div>";

/// Render the footnote definition line for `key`
pub fn render_footnote(key: &str, entry: &BibliographyEntry) -> String {
    format!("[^{}]: <em> {} </em> -- {}", key, entry.title, entry.author)
}

/// Replace citations in `content` with footnote markers and append the
/// sorted, deduplicated footnote block.
///
/// Keys missing from the bibliography still get a footnote, with an empty
/// title and author.
pub fn resolve_citations(bibliography: &Bibliography, content: &str) -> String {
    let missing = BibliographyEntry::default();

    let mut footnotes: Vec<String> = CITATION_MATCH
        .captures_iter(content)
        .map(|caps| {
            let key = caps.get(1).map_or("", |m| m.as_str());
            let entry = bibliography.get(key).unwrap_or_else(|| {
                warn!("Citation key '{}' not found in bibliography", key);
                &missing
            });
            render_footnote(key, entry)
        })
        .collect();

    footnotes.sort();
    footnotes.dedup();
    debug!("Resolved {} distinct footnotes", footnotes.len());

    let body = CITATION_MATCH.replace_all(content, "[^$1]");

    let mut result = String::with_capacity(body.len() + FOOTNOTE_BLOCK_OPEN.len() + 64);
    result.push_str(&body);
    result.push_str(FOOTNOTE_BLOCK_OPEN);
    result.push_str(&footnotes.join("\n"));
    result.push_str(FOOTNOTE_BLOCK_CLOSE);
    result
}
