//! Tree normalization and metric computation.
//!
//! The first pipeline stage. Walks the raw parsed tree depth-first
//! (children before parent) and leaves behind a cleaned, fully annotated
//! tree:
//!
//! - text nodes get entity decoding, whitespace collapsing and trimming;
//!   emptied nodes are deleted and adjacent survivors merged;
//! - noise elements (scripts, styles, frames, form options) disappear,
//!   along with comments and directives;
//! - `br`/`hr` turn into a newline spliced onto the preceding text sibling;
//! - purely textual inline wrappers are unwrapped into their parent;
//! - every surviving element is annotated with word/structure metrics, a
//!   structural pattern and a repetitiveness score;
//! - the first `<title>` element is captured into the document context and
//!   removed from the tree.
//!
//! Recursion depth is bounded because the parse front-end caps input depth.

use std::borrow::Cow;

use crate::extractor::signature;
use crate::extractor::DocContext;
use crate::tree::{NodeId, NodeKind, Tree};
use crate::Options;

/// Elements deleted outright: no text of interest, position preserved.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "iframe", "frame", "object", "noscript", "option",
];

/// Inline wrappers unwrapped when they contain only text.
const UNWRAP_INLINE_TAGS: &[&str] = &[
    "i", "b", "u", "em", "strong", "q", "sub", "sup", "abbr", "s", "strike",
];

/// The five common named entities plus the non-numeric apostrophe.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&nbsp;", " "),
    ("&apos;", "'"),
];

/// Normalize and annotate the tree below `root`.
pub fn normalize_tree(tree: &mut Tree, root: NodeId, ctx: &mut DocContext, options: &Options) {
    normalize_element(tree, root, ctx, options);
}

enum Child {
    Noise,
    Text,
    Elem(String),
}

fn normalize_element(tree: &mut Tree, id: NodeId, ctx: &mut DocContext, options: &Options) {
    let old_children = tree.children(id).to_vec();
    let mut kept: Vec<NodeId> = Vec::with_capacity(old_children.len());

    for child in old_children {
        let shape = match tree.kind(child) {
            NodeKind::Comment(_) | NodeKind::Directive(_) => Child::Noise,
            NodeKind::Text { .. } => Child::Text,
            NodeKind::Element { name, .. } => Child::Elem(name.clone()),
        };

        match shape {
            Child::Noise => {}
            Child::Text => {
                let cleaned = clean_text(tree.text(child).unwrap_or(""));
                if cleaned.is_empty() {
                    continue;
                }
                let words = cleaned.split_whitespace().count();
                tree.set_text(child, cleaned);
                let ann = tree.ann_mut(child);
                ann.words = words;
                ann.longest_run = words;
                kept.push(child);
            }
            Child::Elem(name) => {
                if NOISE_TAGS.contains(&name.as_str()) {
                    continue;
                }
                if name == "title" {
                    ctx.capture_title(&clean_text(&subtree_text(tree, child)));
                    continue;
                }
                if name == "br" || name == "hr" {
                    splice_linebreak(tree, &mut kept);
                    continue;
                }

                normalize_element(tree, child, ctx, options);

                if UNWRAP_INLINE_TAGS.contains(&name.as_str()) && tree.ann(child).height == 0 {
                    kept.extend_from_slice(tree.children(child));
                    continue;
                }
                kept.push(child);
            }
        }
    }

    let merged = merge_adjacent_text(tree, kept);
    tree.set_children(id, merged);

    compute_metrics(tree, id);
    let pattern = signature::build_pattern(tree, id, options.pattern_height_bound);
    tree.ann_mut(id).pattern = pattern;
    let score = signature::score_element(tree, id, options);
    tree.ann_mut(id).score = score;
}

/// Replace a deleted `br`/`hr` by a newline on the preceding text sibling,
/// creating an empty one when no text precedes.
fn splice_linebreak(tree: &mut Tree, kept: &mut Vec<NodeId>) {
    if let Some(&last) = kept.last() {
        if tree.is_text(last) {
            let mut data = tree.text(last).unwrap_or("").to_string();
            data.push('\n');
            tree.set_text(last, data);
            return;
        }
    }
    let nl = tree.new_text("\n");
    kept.push(nl);
}

/// Merge runs of adjacent text nodes into their first member, summing word
/// counts. A single space joins the parts unless the left side already ends
/// in whitespace (a spliced newline must not gain a trailing space).
fn merge_adjacent_text(tree: &mut Tree, kept: Vec<NodeId>) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(kept.len());
    for id in kept {
        if tree.is_text(id) {
            if let Some(&prev) = out.last() {
                if tree.is_text(prev) {
                    let left = tree.text(prev).unwrap_or("");
                    let right = tree.text(id).unwrap_or("");
                    let joined = if left.is_empty() || left.ends_with(char::is_whitespace) {
                        format!("{left}{right}")
                    } else {
                        format!("{left} {right}")
                    };
                    let words = tree.ann(prev).words + tree.ann(id).words;
                    tree.set_text(prev, joined);
                    let ann = tree.ann_mut(prev);
                    ann.words = words;
                    ann.longest_run = words;
                    continue;
                }
            }
        }
        out.push(id);
    }
    out
}

/// Bottom-up metrics for an element whose children are already annotated.
fn compute_metrics(tree: &mut Tree, id: NodeId) {
    let mut words = 0usize;
    let mut anchor_words = 0usize;
    let mut longest_run = 0usize;
    let mut height = 0usize;
    let mut tag_count = 0usize;

    for &child in tree.children(id) {
        let ann = tree.ann(child);
        words += ann.words;
        match tree.kind(child) {
            NodeKind::Text { .. } => {
                longest_run = longest_run.max(ann.words);
            }
            NodeKind::Element { name, .. } => {
                tag_count += 1 + ann.tag_count;
                height = height.max(ann.height + 1);
                longest_run = longest_run.max(ann.longest_run);
                anchor_words += if name == "a" { ann.words } else { ann.anchor_words };
            }
            _ => {}
        }
    }

    let ann = tree.ann_mut(id);
    ann.words = words;
    ann.anchor_words = anchor_words;
    ann.longest_run = longest_run;
    ann.height = height;
    ann.tag_count = tag_count;
}

/// Raw concatenated text beneath a node, used for `<title>` capture before
/// the subtree is discarded.
fn subtree_text(tree: &Tree, id: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![id];
    while let Some(n) = stack.pop() {
        if let Some(data) = tree.text(n) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(data);
        }
        for &c in tree.children(n).iter().rev() {
            stack.push(c);
        }
    }
    out
}

/// Decode the supported entities in one left-to-right pass. Decoded output
/// is never rescanned, so `&amp;lt;` yields the literal `&lt;`.
fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let mut matched = false;
        for (entity, replacement) in ENTITIES {
            if rest.starts_with(entity) {
                out.push_str(replacement);
                rest = &rest[entity.len()..];
                matched = true;
                break;
            }
        }
        if !matched {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Entity-decode, collapse whitespace runs to single spaces, trim.
/// Idempotent on already-clean text.
pub(crate) fn clean_text(raw: &str) -> String {
    let decoded = decode_entities(raw);
    let mut out = String::with_capacity(decoded.len());
    for token in decoded.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
