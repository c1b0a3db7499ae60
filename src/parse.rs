//! HTML parsing front-end.
//!
//! The core pipeline never parses markup itself; it consumes a [`Tree`]
//! forest. This module is the thin adapter that produces one from raw HTML
//! using `dom_query`, walking the parsed document with an explicit stack so
//! that pathologically nested input can neither blow the stack nor smuggle
//! unbounded depth into the later recursive stages: nodes deeper than
//! `options.max_depth` are dropped at this boundary.
//!
//! `dom_query` does not expose comment nodes, so this front-end only ever
//! emits `Text` and `Element` kinds; the `Comment`/`Directive` variants of
//! [`crate::tree::NodeKind`] exist for front-ends (and tests) that do.

use dom_query::{Document, NodeRef};
use tendril::StrTendril;
use tracing::debug;

use crate::tree::{NodeId, Tree};
use crate::Options;

/// Parse an HTML string into an input forest.
///
/// The result is the raw parsed shape: no cleaning, no annotation. Feed it
/// to [`crate::extract_from_tree`] to run the pipeline.
#[must_use]
pub fn parse_html(html: &str, options: &Options) -> Tree {
    let doc = Document::from(html);
    build_forest(&doc, options.max_depth)
}

fn build_forest(doc: &Document, max_depth: usize) -> Tree {
    let mut tree = Tree::new();
    let mut dropped = 0usize;

    // The parser always synthesizes a document element; the forest is built
    // from it down. (parser node, arena parent, depth), pushed in reverse so
    // document order is preserved when popping.
    let mut stack: Vec<(NodeRef, Option<NodeId>, usize)> = Vec::new();
    let html_sel = doc.select("html");
    for node in html_sel.nodes().iter().rev() {
        stack.push((*node, None, 0));
    }

    while let Some((node, parent, depth)) = stack.pop() {
        if depth > max_depth {
            dropped += 1;
            continue;
        }

        let id = if node.is_text() {
            let data: StrTendril = node.text();
            Some(tree.new_text(data.to_string()))
        } else if node.is_element() {
            let name = node
                .node_name()
                .map(|n| n.to_string())
                .unwrap_or_default();
            let attrs = node
                .attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Some(tree.new_element(name, attrs))
        } else {
            // Comments, doctypes and other parser bookkeeping dom_query
            // does not surface as text or elements.
            None
        };

        let Some(id) = id else { continue };
        match parent {
            Some(p) => tree.append(p, id),
            None => tree.push_root(id),
        }

        if tree.is_element(id) {
            let children: Vec<NodeRef> = node.children().into_iter().collect();
            for child in children.into_iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }
    }

    if dropped > 0 {
        debug!(dropped, max_depth, "dropped nodes beyond depth cap");
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn first_named(tree: &Tree, start: NodeId, name: &str) -> Option<NodeId> {
        if tree.name(start) == Some(name) {
            return Some(start);
        }
        for &c in tree.children(start) {
            if let Some(found) = first_named(tree, c, name) {
                return Some(found);
            }
        }
        None
    }

    #[test]
    fn parses_into_single_html_root() {
        let tree = parse_html("<p>hello</p>", &Options::default());
        let roots = tree.roots();
        assert_eq!(roots.len(), 1);
        assert_eq!(tree.name(roots[0]), Some("html"));
    }

    #[test]
    fn preserves_document_order_and_attributes() {
        let tree = parse_html(
            r#"<div id="first"><span>a</span><span>b</span></div>"#,
            &Options::default(),
        );
        let root = tree.roots()[0];
        let div = first_named(&tree, root, "div").unwrap();

        match tree.kind(div) {
            NodeKind::Element { attrs, .. } => {
                assert_eq!(attrs[0], ("id".to_string(), "first".to_string()));
            }
            other => panic!("expected element, got {other:?}"),
        }

        let spans: Vec<_> = tree
            .children(div)
            .iter()
            .filter(|&&c| tree.name(c) == Some("span"))
            .copied()
            .collect();
        assert_eq!(spans.len(), 2);
        let texts: Vec<_> = spans
            .iter()
            .flat_map(|&s| tree.children(s))
            .filter_map(|&t| tree.text(t))
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn depth_cap_drops_deep_nesting() {
        let mut html = String::new();
        for _ in 0..40 {
            html.push_str("<div>");
        }
        html.push_str("bottom");
        for _ in 0..40 {
            html.push_str("</div>");
        }

        let opts = Options {
            max_depth: 10,
            ..Options::default()
        };
        let tree = parse_html(&html, &opts);
        let root = tree.roots()[0];

        let mut deepest = 0usize;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, d)) = stack.pop() {
            deepest = deepest.max(d);
            for &c in tree.children(id) {
                stack.push((c, d + 1));
            }
        }
        assert!(deepest <= 11, "depth {deepest} exceeds cap");
    }
}
