//! Arena-backed document tree.
//!
//! Nodes live in one flat `Vec`, addressed by [`NodeId`]. Topology is held
//! as index links (a parent id plus an ordered child-id list), so the parsed
//! shape stays separate from the pipeline's derived metrics: every node
//! carries one [`Annotations`] record that the stages fill in and read back,
//! instead of ad hoc fields scattered over shared node objects.
//!
//! Parent links are plain indices used for upward walks (title-chain
//! marking, pruning context); ownership of the topology is strictly
//! top-down through the child lists. Detaching a child only edits lists;
//! the arena slot stays allocated but unreachable.

use serde::Serialize;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Parsed shape of a node, as reported by the markup-parsing front-end.
///
/// Only `Text` and `Element` survive normalization; `Comment` and
/// `Directive` are representable so that any parser can hand its full
/// output over, and are discarded before the later stages run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A run of character data.
    Text {
        /// Raw (or, after normalization, cleaned) character data.
        data: String,
    },
    /// A markup element.
    Element {
        /// Lowercased tag name.
        name: String,
        /// Attributes in document order.
        attrs: Vec<(String, String)>,
    },
    /// An HTML comment. Dropped during normalization.
    Comment(String),
    /// A processing directive (doctype, PI). Dropped during normalization.
    Directive(String),
}

/// Derived per-node metrics, populated bottom-up during normalization and
/// refined by the title locator (`is_title`/`contains_title`) and the
/// pruner (`excluded`).
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    /// Total word count directly and transitively contained.
    pub words: usize,
    /// Subset of `words` enclosed in `<a>` elements anywhere beneath.
    pub anchor_words: usize,
    /// Longest single text node's word count beneath (a max, not a sum).
    pub longest_run: usize,
    /// Longest tag chain beneath this node; 0 for text-only elements.
    pub height: usize,
    /// Count of descendant element nodes.
    pub tag_count: usize,
    /// Structural signature; empty when `height` exceeds the pattern bound.
    pub pattern: String,
    /// Repetitiveness measure; never below 1.0 once computed.
    pub score: f64,
    /// This element is the heading node matched against the declared title.
    pub is_title: bool,
    /// This node or a descendant matched the declared title.
    pub contains_title: bool,
    /// Flagged as boilerplate by the pruner; skipped by the formatter.
    pub excluded: bool,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    ann: Annotations,
}

/// An ordered forest of nodes backed by a single arena.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Tree {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            ann: Annotations::default(),
        });
        id
    }

    /// Allocate a detached element node.
    pub fn new_element(&mut self, name: impl Into<String>, attrs: Vec<(String, String)>) -> NodeId {
        let name = name.into().to_lowercase();
        self.push(NodeKind::Element { name, attrs })
    }

    /// Allocate a detached text node.
    pub fn new_text(&mut self, data: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text { data: data.into() })
    }

    /// Allocate a detached comment node.
    pub fn new_comment(&mut self, data: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(data.into()))
    }

    /// Allocate a detached directive node.
    pub fn new_directive(&mut self, data: impl Into<String>) -> NodeId {
        self.push(NodeKind::Directive(data.into()))
    }

    /// Append `child` to `parent`'s child list.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Add a node to the top-level forest.
    pub fn push_root(&mut self, id: NodeId) {
        self.nodes[id.index()].parent = None;
        self.roots.push(id);
    }

    /// The top-level forest in document order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Parsed shape of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Parent link, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Ordered child list.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Derived metrics of a node.
    #[must_use]
    pub fn ann(&self, id: NodeId) -> &Annotations {
        &self.nodes[id.index()].ann
    }

    /// Mutable derived metrics of a node.
    pub fn ann_mut(&mut self, id: NodeId) -> &mut Annotations {
        &mut self.nodes[id.index()].ann
    }

    /// Element tag name, or `None` for non-element nodes.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Text data, or `None` for non-text nodes.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text { data } => Some(data.as_str()),
            _ => None,
        }
    }

    /// Whether the node is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element { .. })
    }

    /// Whether the node is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Text { .. })
    }

    /// Replace a text node's data, leaving annotations untouched.
    ///
    /// No-op on non-text nodes.
    pub fn set_text(&mut self, id: NodeId, new_data: String) {
        if let NodeKind::Text { data } = &mut self.nodes[id.index()].kind {
            *data = new_data;
        }
    }

    /// Replace `parent`'s child list wholesale, fixing the parent links of
    /// the new children. Old children not in the list become unreachable.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        for &c in &children {
            self.nodes[c.index()].parent = Some(parent);
        }
        self.nodes[parent.index()].children = children;
    }

    /// Position of `id` within its parent's child list.
    #[must_use]
    pub fn sibling_position(&self, id: NodeId) -> Option<(usize, usize)> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        siblings
            .iter()
            .position(|&s| s == id)
            .map(|pos| (pos, siblings.len()))
    }

    /// Total number of allocated arena slots (including detached ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
