//! Per-node annotation reports for external inspection.
//!
//! The pipeline's value for debugging lies in the metrics it leaves on the
//! tree. This module snapshots them into a serializable record per node so
//! a debug printer (or the CLI's `--debug` mode) can render the annotated
//! tree without touching pipeline internals.

use serde::Serialize;

use crate::tree::{NodeId, NodeKind, Tree};

/// Snapshot of one node's computed annotations.
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    /// Element tag name, or `#text` for text nodes.
    pub name: String,
    /// Leading words of a text node's data, empty for elements.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Total word count beneath the node.
    pub words: usize,
    /// Words enclosed in anchors beneath the node.
    pub anchor_words: usize,
    /// Longest single text run beneath the node.
    pub longest_run: usize,
    /// Longest tag chain beneath the node.
    pub height: usize,
    /// Descendant element count.
    pub tag_count: usize,
    /// Repetitiveness score.
    pub score: f64,
    /// Marked as the document heading.
    pub title: bool,
    /// Subtree holds the matched heading.
    pub contains_title: bool,
    /// Flagged as boilerplate by the pruner.
    pub excluded: bool,
    /// Child reports in document order.
    pub children: Vec<NodeReport>,
}

const TEXT_PREVIEW_WORDS: usize = 8;

/// Build the report tree rooted at `id`.
#[must_use]
pub fn tree_report(tree: &Tree, id: NodeId) -> NodeReport {
    let (name, text) = match tree.kind(id) {
        NodeKind::Element { name, .. } => (name.clone(), String::new()),
        NodeKind::Text { data } => ("#text".to_string(), preview(data)),
        NodeKind::Comment(_) => ("#comment".to_string(), String::new()),
        NodeKind::Directive(_) => ("#directive".to_string(), String::new()),
    };
    let ann = tree.ann(id);
    NodeReport {
        name,
        text,
        words: ann.words,
        anchor_words: ann.anchor_words,
        longest_run: ann.longest_run,
        height: ann.height,
        tag_count: ann.tag_count,
        score: ann.score,
        title: ann.is_title,
        contains_title: ann.contains_title,
        excluded: ann.excluded,
        children: tree
            .children(id)
            .iter()
            .map(|&child| tree_report(tree, child))
            .collect(),
    }
}

fn preview(data: &str) -> String {
    let mut words = data.split_whitespace();
    let head: Vec<&str> = words.by_ref().take(TEXT_PREVIEW_WORDS).collect();
    let mut out = head.join(" ");
    if words.next().is_some() {
        out.push_str(" …");
    }
    out
}
