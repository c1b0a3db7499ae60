//! Top-down candidate selection.
//!
//! Starting at the document root, each step ranks the current node's
//! element children by word-share probability (doubled for the subtree
//! holding the title) and either descends into the most probable child or
//! stops where no child is decisively better than its siblings. The node
//! where the walk halts is the candidate subtree handed to the pruner; in
//! the worst case that is the root itself, which degrades to whole-document
//! extraction rather than failure.

use std::cmp::Ordering;

use tracing::trace;

use crate::extractor::DocContext;
use crate::tree::{NodeId, Tree};
use crate::Options;

/// Walk the tree and return the most probable content-bearing subtree.
#[must_use]
pub fn select_candidate(tree: &Tree, root: NodeId, ctx: &DocContext, options: &Options) -> NodeId {
    let root_height = tree.ann(root).height;
    let mut current = root;

    loop {
        let parent_words = tree.ann(current).words.max(1) as f64;

        let mut ranked: Vec<(NodeId, f64)> = Vec::new();
        for &child in tree.children(current) {
            if !tree.is_element(child) {
                continue;
            }
            let ann = tree.ann(child);
            if ann.words == 0 {
                continue;
            }
            let mut probability = ann.words as f64 / parent_words;
            if ann.contains_title {
                probability *= 2.0;
            }
            ranked.push((child, probability));
        }

        if ranked.is_empty() {
            // No content-bearing element children left to choose between.
            break;
        }
        // Stable sort: ties keep document order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let (winner, winner_p) = ranked[0];

        let Some(&(runner, runner_p)) = ranked.get(1) else {
            // A sole child: only trust it when there is enough structure
            // beneath to keep selecting within.
            if tree.ann(winner).height < options.min_descend_height {
                break;
            }
            current = winner;
            continue;
        };

        let ratio = tree.ann(winner).score / tree.ann(runner).score;
        let short_runner = (tree.ann(runner).height as f64) < root_height as f64 / 2.0;
        if ratio > options.decisive_score_ratio
            || (short_runner && ratio > options.decisive_score_ratio / 2.0)
        {
            // The word-richest child looks far more repetitive than the
            // second: re-decide on content density instead of raw words.
            let pick = denser_pick(tree, winner, runner);
            trace!(?winner, ?runner, ratio, ?pick, "decisive score ratio");
            current = pick;
            continue;
        }

        let deep = (tree.ann(current).height as f64) / (root_height.max(1) as f64) < 0.5;
        if deep && winner_p + runner_p < options.split_probability_floor {
            // Content is split across several siblings; this level is the
            // best single container.
            break;
        }
        if winner_p < options.min_winner_probability {
            break;
        }

        trace!(?current, ?winner, winner_p, "descending");
        current = winner;
    }

    lift_toward_title(tree, current, ctx)
}

/// `words² / score`: big and structurally unique beats big and repetitive.
fn denser_pick(tree: &Tree, a: NodeId, b: NodeId) -> NodeId {
    let density = |id: NodeId| {
        let ann = tree.ann(id);
        (ann.words as f64).powi(2) / ann.score
    };
    if density(b) > density(a) {
        b
    } else {
        a
    }
}

/// When a heading was located but the halt point does not contain it, bias
/// the final choice up to two ancestor levels toward the headline.
fn lift_toward_title(tree: &Tree, candidate: NodeId, ctx: &DocContext) -> NodeId {
    if ctx.heading.is_none() || tree.ann(candidate).contains_title {
        return candidate;
    }
    let mut cursor = candidate;
    for _ in 0..2 {
        let Some(parent) = tree.parent(cursor) else {
            break;
        };
        if tree.ann(parent).contains_title {
            trace!(?candidate, ?parent, "lifted candidate toward heading");
            return parent;
        }
        cursor = parent;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::normalize::normalize_tree;
    use crate::extractor::title::locate_title;
    use crate::parse::parse_html;

    fn pipeline_to_candidate(html: &str) -> (Tree, NodeId, NodeId) {
        let options = Options::default();
        let mut tree = parse_html(html, &options);
        let root = tree.roots()[0];
        let mut ctx = DocContext::default();
        normalize_tree(&mut tree, root, &mut ctx, &options);
        locate_title(&mut tree, root, &mut ctx, &options);
        let candidate = select_candidate(&tree, root, &ctx, &options);
        (tree, root, candidate)
    }

    fn find(tree: &Tree, start: NodeId, name: &str) -> Option<NodeId> {
        if tree.name(start) == Some(name) {
            return Some(start);
        }
        for &c in tree.children(start) {
            if let Some(hit) = find(tree, c, name) {
                return Some(hit);
            }
        }
        None
    }

    #[test]
    fn empty_document_keeps_root_as_candidate() {
        let (tree, root, candidate) = pipeline_to_candidate("<html><body></body></html>");
        // body has zero words, so the walk never leaves the root.
        assert_eq!(candidate, root);
        assert_eq!(tree.ann(candidate).words, 0);
    }

    #[test]
    fn walks_into_dominant_content_container() {
        let (tree, root, candidate) = pipeline_to_candidate(
            "<html><head><title>Widget Review</title></head><body>\
             <nav><ul>\
               <li><a href=\"/\">Home</a></li>\
               <li><a href=\"/a\">About</a></li>\
               <li><a href=\"/b\">Contact</a></li>\
             </ul></nav>\
             <div id=\"content\"><h1>Widget Review</h1>\
               <p>The widget arrived quickly and surprised us with a very solid finish for the price point.</p>\
               <p>After a week of daily use the battery still held most of its charge, which few rivals manage.</p>\
             </div>\
             <footer><a href=\"/p\">Privacy</a> <a href=\"/t\">Terms</a></footer>\
             </body></html>",
        );
        let div = find(&tree, root, "div").unwrap();
        assert_eq!(candidate, div);
    }

    #[test]
    fn title_lift_recovers_the_headline_container() {
        // Two equal paragraphs make the walker descend into one of them;
        // the lift pulls the candidate back up to the container that also
        // holds the matched heading.
        let (tree, root, candidate) = pipeline_to_candidate(
            "<html><head><title>Deep Dive</title></head><body>\
             <aside><ul><li><a href=\"/x\">elsewhere</a></li></ul></aside>\
             <div><h1>Deep Dive</h1>\
               <p>First half of the story told in a reasonably long paragraph with plenty of words inside it.</p>\
               <p>Second half of the story, just as long as the first one and equally full of word content.</p>\
             </div></body></html>",
        );
        let div = find(&tree, root, "div").unwrap();
        assert_eq!(candidate, div);
        assert!(tree.ann(candidate).contains_title);
    }

    #[test]
    fn decisive_ratio_prefers_unique_structure_over_repetition() {
        // A comment-thread container outweighs the article body in words,
        // but its repeated structure loses the words²/score re-check.
        let mut comments = String::new();
        for i in 0..5 {
            comments.push_str(&format!(
                "<div class=\"comment\">\
                 <p>Commenter number {i} strongly agrees with every point made here today.</p>\
                 <p>They also add several more words so the thread grows quite large in total.</p>\
                 </div>",
            ));
        }
        let html = format!(
            "<html><body><div id=\"thread\">{comments}</div>\
             <div id=\"story\"><p>The article itself is one long unique paragraph whose words all live together \
             in a single uninterrupted run of prose that discusses the subject at considerable length, \
             covering background, analysis and a short conclusion so that its total word count stays \
             comparable to the combined size of the repetitive comment thread next to it, which keeps \
             the two siblings close in probability while their structure differs completely.</p></div>\
             </body></html>"
        );
        let (tree, root, candidate) = pipeline_to_candidate(&html);

        let thread = find(&tree, root, "div").unwrap();
        assert_eq!(tree.name(thread), Some("div"));
        // The repetitive thread carries the higher repetitiveness score.
        let story = candidate;
        assert!(tree.ann(thread).score > tree.ann(story).score);
        // And the candidate is the unique-prose container (or a node within it).
        let mut cursor = Some(story);
        let mut inside_thread = false;
        while let Some(id) = cursor {
            if id == thread {
                inside_thread = true;
            }
            cursor = tree.parent(id);
        }
        assert!(!inside_thread, "candidate must not sit in the comment thread");
    }

    #[test]
    fn low_probability_split_stops_at_container() {
        // Words spread evenly over many sections deep in a taller document:
        // no pair of children clears the combined probability floor, so the
        // walk stops at their parent instead of picking one arbitrarily.
        let mut sections = String::new();
        for i in 0..8 {
            sections.push_str(&format!(
                "<section><p>Short block {i} with a handful of words.</p></section>"
            ));
        }
        let html = format!(
            "<html><body><main>{sections}</main>\
             <footer><ul><li><a href=\"/p\">Privacy policy terms</a></li></ul></footer>\
             </body></html>"
        );
        let (tree, root, candidate) = pipeline_to_candidate(&html);
        let main = find(&tree, root, "main").unwrap();
        assert_eq!(candidate, main);
    }
}
