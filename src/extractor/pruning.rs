//! Bottom-up trash pruning of the selected candidate subtree.
//!
//! Walks the candidate's element descendants and flags boilerplate-looking
//! nodes as excluded. Excluded nodes are not deleted: the formatter skips
//! them, and the annotated tree stays intact for inspection. The candidate
//! itself and the located heading node are never excluded, which keeps the
//! result non-empty even when every rule fires.

use tracing::debug;

use crate::extractor::DocContext;
use crate::tree::{NodeId, Tree};
use crate::Options;

/// Flag boilerplate descendants of `candidate`. Returns how many subtrees
/// were excluded.
pub fn prune_trash(
    tree: &mut Tree,
    candidate: NodeId,
    ctx: &DocContext,
    options: &Options,
) -> usize {
    let candidate_words = tree.ann(candidate).words.max(1) as f64;
    let mut excluded = 0usize;

    let mut stack: Vec<NodeId> = tree
        .children(candidate)
        .iter()
        .rev()
        .copied()
        .collect();

    while let Some(id) = stack.pop() {
        if !tree.is_element(id) {
            continue;
        }
        if Some(id) == ctx.heading {
            // The headline is exempt; its children still get inspected.
            stack.extend(tree.children(id).iter().rev());
            continue;
        }

        let parent = tree.parent(id).unwrap_or(candidate);
        if is_trash(tree, id, parent, candidate_words, options) {
            tree.ann_mut(id).excluded = true;
            excluded += 1;
            // An excluded subtree is dead to the formatter; don't descend.
            continue;
        }
        stack.extend(tree.children(id).iter().rev());
    }

    debug!(excluded, "pruned candidate subtree");
    excluded
}

fn is_trash(
    tree: &Tree,
    id: NodeId,
    parent: NodeId,
    candidate_words: f64,
    options: &Options,
) -> bool {
    let ann = tree.ann(id);

    // Nothing inside worth keeping.
    if ann.words == 0 || tree.children(id).is_empty() {
        return true;
    }
    // Structure outgrows its prose: scaffolding.
    if ann.longest_run < ann.height {
        return true;
    }
    // Shallow but disproportionately scored: scaffolding-like.
    if ann.height < options.prune_shallow_height && (ann.longest_run as f64) < ann.score {
        return true;
    }
    // Locally anomalous repetitiveness relative to context.
    let parent_score = tree.ann(parent).score.max(1.0);
    if ann.score / parent_score > options.prune_score_ratio {
        return true;
    }
    // Tag-dense nodes; sparse ones go at a lower density threshold.
    let run = ann.longest_run.max(1) as f64;
    let tag_density = ann.tag_count as f64 / run;
    if (ann.words as f64) / candidate_words < 1.0 / 3.0 && tag_density > options.prune_tag_density {
        return true;
    }
    if tag_density > options.prune_tag_density_hard {
        return true;
    }
    // Trailing link clusters: "read more", share bars.
    if let Some((pos, len)) = tree.sibling_position(id) {
        if pos + 2 >= len {
            let share = ann.anchor_words as f64 / ann.words.max(1) as f64;
            if share > options.prune_anchor_share {
                return true;
            }
        }
    }
    false
}
