//! Plain-text rendering of the surviving candidate subtree.
//!
//! Concatenates text beneath the candidate, skipping excluded subtrees.
//! Block-level elements contribute a line break before and after their
//! content; a small inline set does not. The output never contains runs of
//! blank lines or leading/trailing ones, so each block-level element
//! renders as exactly one text block. Deterministic for a given pruned
//! tree.

use crate::tree::{NodeId, NodeKind, Tree};

/// Elements whose content flows inline, without line breaks around it.
const INLINE_TAGS: &[&str] = &[
    "a", "i", "b", "u", "strong", "em", "q", "sub", "sup", "abbr", "span", "cite", "s", "strike",
    "code",
];

/// Render the non-excluded text beneath `candidate`.
#[must_use]
pub fn format_text(tree: &Tree, candidate: NodeId) -> String {
    let mut raw = String::new();
    append_node(tree, candidate, &mut raw);
    collapse_newlines(&raw)
}

fn append_node(tree: &Tree, id: NodeId, out: &mut String) {
    match tree.kind(id) {
        NodeKind::Text { data } => push_text(out, data),
        NodeKind::Element { name, .. } => {
            if tree.ann(id).excluded {
                return;
            }
            let inline = INLINE_TAGS.contains(&name.as_str());
            if !inline {
                push_newline(out);
            }
            for &child in tree.children(id) {
                append_node(tree, child, out);
            }
            if !inline {
                push_newline(out);
            }
        }
        NodeKind::Comment(_) | NodeKind::Directive(_) => {}
    }
}

/// Append text, separating it from the previous fragment with one space
/// when neither side supplies whitespace of its own.
fn push_text(out: &mut String, data: &str) {
    if data.is_empty() {
        return;
    }
    if !out.is_empty()
        && !out.ends_with(char::is_whitespace)
        && !data.starts_with(char::is_whitespace)
    {
        out.push(' ');
    }
    out.push_str(data);
}

fn push_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Collapse newline runs to single breaks, trim line edges and drop empty
/// lines, including at the very start and end.
fn collapse_newlines(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
