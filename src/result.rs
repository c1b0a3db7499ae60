//! Result type for extraction output.

use crate::tree::{NodeId, Tree};

/// Result of content extraction from a document tree.
///
/// Besides the formatted text, the result keeps the fully annotated tree
/// and the candidate reference so callers (debug printers, evaluation
/// harnesses) can inspect every per-node metric the pipeline computed.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Main content as plain text, one line per block.
    pub content_text: String,

    /// Cleaned text of the document's declared title, if one was present.
    pub title: Option<String>,

    /// The subtree selected as most likely to contain the main content.
    pub candidate: NodeId,

    /// The normalized, annotated tree the text was rendered from.
    pub tree: Tree,
}
