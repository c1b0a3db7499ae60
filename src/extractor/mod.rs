//! The four-stage extraction pipeline.
//!
//! Strictly linear: normalize and annotate, locate the title, walk to the
//! candidate, prune trash. Each stage is a single-writer pass whose output
//! the later stages only read, and each is callable on its own for testing.
//! The document-level state the stages share (declared title, heading node)
//! travels in an explicit [`DocContext`] rather than living on the tree.

pub mod normalize;
pub mod pruning;
pub mod signature;
pub mod title;
pub mod walker;

use tracing::debug;

use crate::error::{Error, Result};
use crate::tree::{NodeId, Tree};
use crate::Options;

/// Document-level context threaded through the stages.
#[derive(Debug, Clone, Default)]
pub struct DocContext {
    /// Cleaned text of the first `<title>` element, if any.
    pub title_text: Option<String>,
    /// Title word count after separator stripping.
    pub title_words: usize,
    /// The in-body element matched as the headline, once located.
    pub heading: Option<NodeId>,
}

impl DocContext {
    /// Record the declared title. Only the first non-empty capture sticks.
    pub(crate) fn capture_title(&mut self, text: &str) {
        if self.title_text.is_some() || text.is_empty() {
            return;
        }
        self.title_words = title::title_word_count(text);
        self.title_text = Some(text.to_string());
    }
}

/// Locate the document root in the input forest.
///
/// A top-level `html` element is preferred; failing that, a forest made of
/// exactly one element is accepted as rooted at that element. Anything else
/// is an input-contract violation.
pub fn find_root(tree: &Tree) -> Result<NodeId> {
    if let Some(&html) = tree
        .roots()
        .iter()
        .find(|&&id| tree.name(id) == Some("html"))
    {
        if tree.children(html).is_empty() {
            return Err(Error::InvalidInput(
                "document element has no children".to_string(),
            ));
        }
        return Ok(html);
    }

    let elements: Vec<NodeId> = tree
        .roots()
        .iter()
        .copied()
        .filter(|&id| tree.is_element(id))
        .collect();
    match elements.as_slice() {
        [single] if !tree.children(*single).is_empty() => Ok(*single),
        [single] => Err(Error::InvalidInput(format!(
            "root element <{}> has no children",
            tree.name(*single).unwrap_or("?")
        ))),
        [] => Err(Error::InvalidInput("forest has no elements".to_string())),
        _ => Err(Error::InvalidInput(
            "forest has multiple roots and none is a document element".to_string(),
        )),
    }
}

/// Run all four stages over the tree. Returns the document root, the
/// selected candidate and the document context.
pub fn run(tree: &mut Tree, options: &Options) -> Result<(NodeId, NodeId, DocContext)> {
    let root = find_root(tree)?;
    let mut ctx = DocContext::default();

    normalize::normalize_tree(tree, root, &mut ctx, options);
    debug!(
        words = tree.ann(root).words,
        height = tree.ann(root).height,
        tags = tree.ann(root).tag_count,
        "normalized document"
    );

    title::locate_title(tree, root, &mut ctx, options);

    let candidate = walker::select_candidate(tree, root, &ctx, options);
    debug!(
        ?candidate,
        words = tree.ann(candidate).words,
        "selected candidate"
    );

    pruning::prune_trash(tree, candidate, &ctx, options);
    Ok((root, candidate, ctx))
}
