//! Title localization.
//!
//! Matches the document's declared `<title>` text against a body text node
//! and tags the match's ancestor chain, giving the candidate walker its 2x
//! probability boost and the post-selection ancestor lift. A document with
//! no usable title simply skips this stage's marks; nothing downstream
//! requires them.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extractor::DocContext;
use crate::tree::{NodeId, Tree};
use crate::Options;

/// Separators sites put between article title and site name.
#[allow(clippy::expect_used)]
static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\|–—\-:/]+").expect("valid regex"));

/// Word count of a declared title after stripping separator punctuation.
#[must_use]
pub(crate) fn title_word_count(title: &str) -> usize {
    TITLE_SEPARATOR
        .replace_all(title, " ")
        .split_whitespace()
        .count()
}

/// Locate the in-body heading matching the captured title.
///
/// The first text node (document order) whose word count is within
/// `title_word_slack` of the title's and whose trimmed text is a
/// case-insensitive substring of the title is accepted: its parent element
/// becomes the heading node, and the parent's ancestor chain up to the root
/// is marked as containing the title.
pub fn locate_title(tree: &mut Tree, root: NodeId, ctx: &mut DocContext, options: &Options) {
    let Some(title) = ctx.title_text.clone() else {
        return;
    };
    let title_lower = title.to_lowercase();
    let target = ctx.title_words;

    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let is_match = tree.text(id).is_some_and(|text| {
            let words = tree.ann(id).words;
            words > 0
                && words.abs_diff(target) <= options.title_word_slack
                && title_lower.contains(text.trim().to_lowercase().as_str())
        });
        if is_match {
            if let Some(parent) = tree.parent(id) {
                mark_heading(tree, parent, ctx);
                debug!(?parent, "located document heading");
                return;
            }
        }
        for &child in tree.children(id).iter().rev() {
            stack.push(child);
        }
    }
}

fn mark_heading(tree: &mut Tree, heading: NodeId, ctx: &mut DocContext) {
    ctx.heading = Some(heading);
    {
        let ann = tree.ann_mut(heading);
        ann.is_title = true;
        ann.contains_title = true;
    }
    let mut up = tree.parent(heading);
    while let Some(ancestor) = up {
        tree.ann_mut(ancestor).contains_title = true;
        up = tree.parent(ancestor);
    }
}
