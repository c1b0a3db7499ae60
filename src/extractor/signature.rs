//! Structural pattern signatures and repetitiveness scoring.
//!
//! Every element name maps to a single legend symbol; an element's pattern
//! is its symbol followed by the parenthesized concatenation of its element
//! children's patterns. Siblings with identical patterns are structurally
//! repeated (the signature of nav lists, comment threads and ad grids), and
//! scoring charges them as a group, weighted by pattern length, so repeated
//! deep structure costs more per repetition than repeated flat structure.
//! Unique substructure keeps the low per-child score that marks prose.

use std::collections::HashMap;

use crate::tree::{NodeId, Tree};
use crate::Options;

/// Legend symbol for an element name. Unlisted names share a wildcard so
/// exotic tags still group when their shapes repeat.
#[must_use]
pub fn symbol_for(name: &str) -> char {
    match name {
        "p" => 'p',
        "div" => 'd',
        "a" => 'a',
        "ul" => 'u',
        "ol" => 'o',
        "li" => 'l',
        "table" => 't',
        "tr" => 'r',
        "td" | "th" => 'c',
        "span" => 's',
        "img" => 'g',
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => 'h',
        "form" => 'f',
        "input" | "button" | "select" | "textarea" => 'i',
        "blockquote" | "pre" | "code" => 'q',
        "em" | "strong" | "b" | "i" | "u" => 'e',
        "nav" | "header" | "footer" | "aside" => 'n',
        "section" | "article" | "main" => 'm',
        _ => 'x',
    }
}

/// Build the pattern string for an element whose children are already
/// annotated. Elements taller than `pattern_height_bound` get an empty
/// pattern: their repetitiveness is not compared, which bounds the cost of
/// pattern construction on degenerate documents.
#[must_use]
pub fn build_pattern(tree: &Tree, id: NodeId, pattern_height_bound: usize) -> String {
    let Some(name) = tree.name(id) else {
        return String::new();
    };
    if tree.ann(id).height > pattern_height_bound {
        return String::new();
    }

    let mut pattern = String::new();
    pattern.push(symbol_for(name));
    pattern.push('(');
    for &child in tree.children(id) {
        if tree.is_element(child) {
            pattern.push_str(&tree.ann(child).pattern);
        }
    }
    pattern.push(')');
    pattern
}

/// Pattern length with parentheses stripped: the per-repetition weight of a
/// repeated sibling group.
fn stripped_len(pattern: &str) -> usize {
    pattern.chars().filter(|&c| c != '(' && c != ')').count()
}

/// Compute an element's repetitiveness score from its direct children
/// (children must already carry their own scores and patterns).
///
/// Children sharing a non-empty pattern form a group; a group of two or
/// more contributes the sum of its members' scores times the stripped
/// pattern length. Everything else contributes its own score, and each
/// direct anchor child adds a flat bonus. The result is averaged over the
/// number of ungrouped children plus distinct groups, and defaults to 1.0
/// when that divisor is zero or the average degenerates.
#[must_use]
pub fn score_element(tree: &Tree, id: NodeId, options: &Options) -> f64 {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut total = 0.0;
    let mut divisor = 0usize;

    for &child in tree.children(id) {
        let Some(name) = tree.name(child) else {
            continue;
        };
        let ann = tree.ann(child);
        if ann.pattern.is_empty() {
            // Too tall for pattern comparison; counts as unique.
            total += ann.score;
            divisor += 1;
        } else {
            let entry = groups.entry(ann.pattern.as_str()).or_insert((0.0, 0));
            entry.0 += ann.score;
            entry.1 += 1;
        }
        if name == "a" {
            total += options.anchor_bonus;
        }
    }

    for (pattern, (score_sum, count)) in groups {
        if count >= 2 {
            total += score_sum * stripped_len(pattern) as f64;
            divisor += 1;
        } else {
            total += score_sum;
            divisor += 1;
        }
    }

    if divisor == 0 {
        return 1.0;
    }
    let score = total / divisor as f64;
    if score.is_finite() && score > 0.0 {
        score
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_child(tree: &mut Tree, parent: NodeId, data: &str) {
        let words = data.split_whitespace().count();
        let id = tree.new_text(data);
        tree.ann_mut(id).words = words;
        tree.ann_mut(id).longest_run = words;
        tree.append(parent, id);
    }

    fn leaf_element(tree: &mut Tree, parent: NodeId, name: &str, text: &str) -> NodeId {
        let id = tree.new_element(name, vec![]);
        tree.append(parent, id);
        text_child(tree, id, text);
        let pattern = build_pattern(tree, id, 4);
        tree.ann_mut(id).pattern = pattern;
        tree.ann_mut(id).score = 1.0;
        id
    }

    #[test]
    fn legend_maps_unknown_names_to_wildcard() {
        assert_eq!(symbol_for("p"), 'p');
        assert_eq!(symbol_for("td"), symbol_for("th"));
        assert_eq!(symbol_for("custom-widget"), 'x');
        assert_eq!(symbol_for("blink"), 'x');
    }

    #[test]
    fn pattern_nests_children_symbols() {
        let mut tree = Tree::new();
        let li = tree.new_element("li", vec![]);
        let a = tree.new_element("a", vec![]);
        tree.append(li, a);
        tree.ann_mut(a).pattern = build_pattern(&tree, a, 4);
        tree.ann_mut(li).height = 1;
        let pattern = build_pattern(&tree, li, 4);
        assert_eq!(pattern, "l(a())");
    }

    #[test]
    fn pattern_empty_above_height_bound() {
        let mut tree = Tree::new();
        let div = tree.new_element("div", vec![]);
        tree.ann_mut(div).height = 9;
        assert_eq!(build_pattern(&tree, div, 4), "");
    }

    #[test]
    fn leaf_scores_default_to_one() {
        let mut tree = Tree::new();
        let p = tree.new_element("p", vec![]);
        assert!((score_element(&tree, p, &Options::default()) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_siblings_score_higher_than_unique_content() {
        let opts = Options::default();

        // Five structurally identical list items.
        let mut tree = Tree::new();
        let ul = tree.new_element("ul", vec![]);
        for i in 0..5 {
            leaf_element(&mut tree, ul, "li", &format!("item number {i}"));
        }
        let repeated = score_element(&tree, ul, &opts);

        // One unique paragraph of comparable word count.
        let mut tree2 = Tree::new();
        let div = tree2.new_element("div", vec![]);
        leaf_element(
            &mut tree2,
            div,
            "p",
            "fifteen words of ordinary running prose text that all live in one single paragraph",
        );
        let unique = score_element(&tree2, div, &opts);

        assert!(
            repeated > unique,
            "repeated {repeated} should exceed unique {unique}"
        );
        // Group weight: 5 members x score 1.0 x stripped length of "l()" = 5,
        // averaged over one group.
        assert!((repeated - 5.0).abs() < f64::EPSILON);
        assert!((unique - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn anchor_children_raise_the_score() {
        let opts = Options::default();
        let mut tree = Tree::new();
        let div = tree.new_element("div", vec![]);
        leaf_element(&mut tree, div, "a", "home");
        let with_anchor = score_element(&tree, div, &opts);

        let mut tree2 = Tree::new();
        let div2 = tree2.new_element("div", vec![]);
        leaf_element(&mut tree2, div2, "p", "home");
        let with_paragraph = score_element(&tree2, div2, &opts);

        assert!(with_anchor > with_paragraph);
        assert!((with_anchor - (1.0 + opts.anchor_bonus)).abs() < f64::EPSILON);
    }

    #[test]
    fn longer_repeated_patterns_cost_more_per_repetition() {
        let opts = Options::default();

        let mut shallow = Tree::new();
        let ul = shallow.new_element("ul", vec![]);
        for _ in 0..3 {
            leaf_element(&mut shallow, ul, "li", "word");
        }
        let shallow_score = score_element(&shallow, ul, &opts);

        // Same repetition count, deeper repeated shape: li > a.
        let mut deep = Tree::new();
        let ul2 = deep.new_element("ul", vec![]);
        for _ in 0..3 {
            let li = deep.new_element("li", vec![]);
            deep.append(ul2, li);
            leaf_element(&mut deep, li, "a", "word");
            deep.ann_mut(li).height = 1;
            let pattern = build_pattern(&deep, li, 4);
            deep.ann_mut(li).pattern = pattern;
            let score = score_element(&deep, li, &opts);
            deep.ann_mut(li).score = score;
        }
        let deep_score = score_element(&deep, ul2, &opts);

        assert!(
            deep_score > shallow_score,
            "deep {deep_score} should exceed shallow {shallow_score}"
        );
    }
}
