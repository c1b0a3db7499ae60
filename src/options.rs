//! Configuration options for content extraction.
//!
//! Every empirically tuned threshold in the pipeline lives here as a
//! documented default rather than a buried constant. The defaults were
//! chosen against article-style pages; corpora with very different markup
//! (forums, portals) may want retuned values.

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use boilersieve::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     decisive_score_ratio: 12.0,
///     anchor_bonus: 5.0,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum tree depth accepted from the parser front-end.
    ///
    /// Nodes nested deeper than this are dropped while building the input
    /// forest, bounding stack usage on hostile documents for every later
    /// recursive stage.
    ///
    /// Default: `256`
    pub max_depth: usize,

    /// Maximum element height for which a structural pattern is built.
    ///
    /// Taller nodes get an empty pattern and are skipped during sibling
    /// comparison, bounding pattern cost on degenerate documents.
    ///
    /// Default: `4`
    pub pattern_height_bound: usize,

    /// Flat score bonus contributed by each direct anchor child.
    ///
    /// Anchors are inherently repetitive/boilerplate-prone, so every `<a>`
    /// child raises its parent's repetitiveness score by this amount.
    ///
    /// Default: `10.0`
    pub anchor_bonus: f64,

    /// Word-count slack allowed between a text node and the declared title
    /// when locating the in-body heading.
    ///
    /// Default: `2`
    pub title_word_slack: usize,

    /// Minimum height of a sole child worth descending into.
    ///
    /// A single candidate child shallower than this stops the walk: there is
    /// too little structure below it to trust the selection.
    ///
    /// Default: `3`
    pub min_descend_height: usize,

    /// Winner/runner-up score ratio that forces the `words²/score` re-check
    /// during candidate selection. Half this ratio suffices when the
    /// runner-up is short relative to the document.
    ///
    /// Default: `20.0`
    pub decisive_score_ratio: f64,

    /// Combined winner + runner-up probability below which a deep walk stops,
    /// on the grounds that content is split across several siblings.
    ///
    /// Default: `2/3`
    pub split_probability_floor: f64,

    /// Minimum winner probability to keep descending at all.
    ///
    /// Default: `0.2`
    pub min_winner_probability: f64,

    /// Height below which a node's longest text run is compared against its
    /// score during pruning (shallow but over-scored nodes are scaffolding).
    ///
    /// Default: `3`
    pub prune_shallow_height: usize,

    /// Node/parent score ratio above which a node is pruned as locally
    /// anomalous repetitiveness.
    ///
    /// Default: `20.0`
    pub prune_score_ratio: f64,

    /// Tag-per-longest-run density above which a sparse node (less than a
    /// third of the candidate's words) is pruned.
    ///
    /// Default: `3.0`
    pub prune_tag_density: f64,

    /// Tag-per-longest-run density above which a node is pruned regardless
    /// of its word share.
    ///
    /// Default: `10.0`
    pub prune_tag_density_hard: f64,

    /// Anchor-word share above which one of the last two siblings is pruned
    /// as a trailing link cluster ("read more", share bars).
    ///
    /// Default: `0.95`
    pub prune_anchor_share: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 256,
            pattern_height_bound: 4,
            anchor_bonus: 10.0,
            title_word_slack: 2,
            min_descend_height: 3,
            decisive_score_ratio: 20.0,
            split_probability_floor: 2.0 / 3.0,
            min_winner_probability: 0.2,
            prune_shallow_height: 3,
            prune_score_ratio: 20.0,
            prune_tag_density: 3.0,
            prune_tag_density_hard: 10.0,
            prune_anchor_share: 0.95,
        }
    }
}
