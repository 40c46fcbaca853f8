//! Result extraction from search page markup.
//!
//! The page is scanned with a single case-insensitive pattern rather than a
//! DOM parser: each `result-link` block yields one record, in source order
//! (the site's relevance ranking). Input that matches nothing produces an
//! empty set, never an error.

use std::sync::OnceLock;

use regex::Regex;

use soq_core::SearchResult;

const HIGHLIGHT_OPEN: &str = r#"<span class="result-highlight">"#;
const HIGHLIGHT_CLOSE: &str = "</span>";

/// One match per result block: link attribute, title attribute, excerpt
/// text up to the closing tag of the excerpt div. Lazy between anchors so
/// consecutive blocks don't bleed into each other.
fn result_block() -> &'static Regex {
    static RESULT_BLOCK: OnceLock<Regex> = OnceLock::new();
    RESULT_BLOCK.get_or_init(|| {
        Regex::new(
            r#"(?is)<div class="result-link">.+?<h3>.+?<a href="([^\s]*?)".+?title="(.*?)" class.+?>.+?<div class="excerpt">(.+?)</div>"#,
        )
        .expect("invalid result-block pattern")
    })
}

/// Extract result records from a raw search page body.
///
/// Link and title are captured verbatim; the excerpt is cleaned up via
/// [`clean_excerpt`] rules. Total function: malformed input yields an
/// empty vec.
pub fn extract_results(body: &str) -> Vec<SearchResult> {
    result_block()
        .captures_iter(body)
        .map(|caps| SearchResult {
            link: caps[1].to_string(),
            title: caps[2].to_string(),
            desc: clean_excerpt(&caps[3]),
        })
        .collect()
}

/// Clean a raw excerpt capture.
///
/// Trims first, then collapses double blank lines (the pass runs twice, so
/// four consecutive newlines fold to one), rewrites highlight spans to bold
/// tags, and collapses double spaces.
fn clean_excerpt(raw: &str) -> String {
    let collapsed = raw.trim().replace("\n\n", "\n").replace("\n\n", "\n");

    collapsed
        .replace(HIGHLIGHT_OPEN, "<b>")
        .replace(HIGHLIGHT_CLOSE, "</b>")
        .replace("  ", " ")
}
