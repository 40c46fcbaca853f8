//! The search result record.

use serde::{Deserialize, Serialize};

/// A single search result, in the shape it is cached and returned.
///
/// Field order is the persisted JSON field order. `desc` is cleaned excerpt
/// text and may contain `<b>`/`</b>` emphasis markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Link to the question, as it appears in the markup.
    pub link: String,
    /// Question title, captured verbatim.
    pub title: String,
    /// Cleaned excerpt text.
    pub desc: String,
}
