//! Document tree for the QuickDOM mini browser.
//!
//! This crate provides the arena-based tree that the tokenizer produces and
//! the (out-of-tree) renderer consumes.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. The grammar is deliberately small: a closed [`NodeKind`]
//! enumeration, inline text stored on the owning node, and a flat
//! parent-of-all-tags shape in which every recognized tag is a direct child
//! of [`NodeId::ROOT`].

use serde::Serialize;
use std::collections::HashMap;
use strum_macros::Display;

/// Map of attribute names to values for an element.
///
/// Keys are unique and case-normalized to lowercase; insertion order is
/// irrelevant.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
///
/// Provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// The closed vocabulary of node kinds the pipeline understands.
///
/// Markup outside this vocabulary never becomes a node; its content is
/// skipped during parsing, not appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum NodeKind {
    /// The synthetic document root. Exactly one per tree, at
    /// [`NodeId::ROOT`].
    Root,
    /// A bare text run. The simplified parser stores inline text on the
    /// owning element instead, so it never produces this kind; it exists
    /// for renderer-side synthesis.
    Text,
    /// `<p>`
    Paragraph,
    /// `<h1>` or `<h2>` (both levels share one kind)
    Heading,
    /// `<div>`
    Division,
    /// `<span>`
    Span,
    /// `<a>`
    Link,
    /// `<img>`. Carries no text; its `src` attribute is rewritten to a
    /// local cache path by the pipeline when the media fetch succeeds.
    Image,
}

/// One element of the parsed output tree.
///
/// Constructed once during a single parse call and immutable afterwards,
/// except for the pipeline's in-place rewrite of Image `src` values from
/// remote URL to local cache path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,

    /// Inline text content, captured raw from the markup. Populated for
    /// text-bearing kinds; always empty for [`NodeKind::Image`] and
    /// [`NodeKind::Root`].
    pub text: String,

    /// The node's attributes. Always present, possibly empty.
    pub attributes: AttributesMap,

    /// Child nodes in document order.
    pub children: Vec<NodeId>,

    /// The node's parent, or `None` for the root.
    pub parent: Option<NodeId>,
}

/// Arena-based document tree with O(1) node access.
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]; the root is
/// always at index 0. Two trees built by identical sequences of
/// [`DocumentTree::alloc`] and [`DocumentTree::append_child`] calls compare
/// equal, which is what the parser-strategy equivalence tests rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl DocumentTree {
    /// Create a new tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        DocumentTree {
            nodes: vec![Node {
                kind: NodeKind::Root,
                text: String::new(),
                attributes: AttributesMap::new(),
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree (the root counts).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes. A freshly built tree always has at
    /// least the root, so this is only true for pathological states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node of `kind` and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            text: String::new(),
            attributes: AttributesMap::new(),
            children: Vec::new(),
            parent: None,
        });
        id
    }

    /// Append `child` as the last child of `parent`, updating both sides of
    /// the relationship.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    /// Get the inline text of a node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.text.as_str())
    }

    /// Get an attribute value of a node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Iterate over the direct children of the root that are of `kind`.
    ///
    /// The pipeline uses this to find every Image whose `src` needs to be
    /// resolved and rewritten.
    pub fn root_children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .filter(move |&id| self.kind(id) == Some(kind))
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a tree to stdout, one node per line, indented by depth.
///
/// Attributes are printed sorted by name so the output is stable across
/// runs despite the map's arbitrary iteration order.
pub fn print_tree(tree: &DocumentTree, id: NodeId, depth: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };

    let indent = "  ".repeat(depth);
    let mut line = format!("{indent}{}", node.kind);

    if !node.attributes.is_empty() {
        let mut attrs: Vec<_> = node.attributes.iter().collect();
        attrs.sort_by_key(|(name, _)| name.as_str());
        let rendered: Vec<String> = attrs
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect();
        line.push_str(&format!(" [{}]", rendered.join(" ")));
    }

    if !node.text.is_empty() {
        line.push_str(&format!(" {:?}", node.text));
    }

    println!("{line}");

    for &child in &node.children {
        print_tree(tree, child, depth + 1);
    }
}
