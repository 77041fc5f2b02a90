//! Parse tree arena for the Quill CSS toolkit.
//!
//! The grammar parser produces a generic tree of [`ParseNode`]s tagged by
//! [`NodeKind`]; the converter in `quill-css` turns it into typed rules.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Parent
//! links exist for diagnostics and upward walks; nodes never own each other.

/// Node kind tags.
pub mod kind;

use std::fmt::Write as _;

use quill_common::{CssVersion, SourceArea};

pub use kind::NodeKind;

/// A type-safe index into a [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The entry node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One node of the parse tree.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct ParseNode {
    /// The production this node was created for.
    pub kind: NodeKind,
    /// The node's own text (a property name, a term, an operator), if any.
    pub text: Option<String>,
    /// The node this one is attached to; `None` for the entry node and detached nodes.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// The child after this one in the parent's children.
    pub next_sibling: Option<NodeId>,
    /// The child before this one in the parent's children.
    pub prev_sibling: Option<NodeId>,
    /// Where in the source the node's text begins and ends.
    pub area: Option<SourceArea>,
}

impl ParseNode {
    fn new(kind: NodeKind, text: Option<String>, area: Option<SourceArea>) -> Self {
        Self {
            kind,
            text,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            area,
        }
    }
}

/// Arena-based parse tree with O(1) node access and traversal.
///
/// Node 0 is the entry node: [`NodeKind::Root`] for a stylesheet parse or
/// [`NodeKind::StyleDeclarationList`] for a bare declaration list. The tree
/// also remembers which CSS level its grammar targeted.
#[derive(Debug, Clone)]
pub struct ParseTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<ParseNode>,
    /// The grammar level the tree was produced for.
    version: CssVersion,
}

impl ParseTree {
    /// Create a tree containing only its entry node.
    #[must_use]
    pub fn new(entry: NodeKind, version: CssVersion) -> Self {
        Self {
            nodes: vec![ParseNode::new(entry, None, None)],
            version,
        }
    }

    /// Get the entry node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The kind of the entry node.
    #[must_use]
    pub fn entry_kind(&self) -> NodeKind {
        self.nodes[0].kind
    }

    /// The CSS level the grammar targeted.
    #[must_use]
    pub const fn version(&self) -> CssVersion {
        self.version
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ParseNode> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ParseNode> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of allocated nodes (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the entry node).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind, text: Option<String>, area: Option<SourceArea>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ParseNode::new(kind, text, area));
        id
    }

    /// Allocate a node and append it to `parent` in one step.
    pub fn append_new(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        text: Option<String>,
        area: Option<SourceArea>,
    ) -> NodeId {
        let id = self.alloc(kind, text, area);
        self.append_child(parent, id);
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Detach `child` from `parent`. The node stays allocated but unreachable.
    ///
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.nodes[parent.0].children.iter().position(|&c| c == child) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        self.nodes[child.0].parent = None;

        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
    }

    /// Detach every child of `parent` after the first `len`.
    pub fn truncate_children(&mut self, parent: NodeId, len: usize) {
        while self.children(parent).len() > len {
            if let Some(last) = self.last_child(parent) {
                self.remove_child(parent, last);
            }
        }
    }

    /// The kind of a node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this tree.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// The text of a node, or `""` when it carries none.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.get(id).and_then(|n| n.text.as_deref()).unwrap_or("")
    }

    /// Returns `true` if the node carries text.
    #[must_use]
    pub fn has_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.text.is_some())
    }

    /// Replace the text of a node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.text = Some(text.into());
        }
    }

    /// The source span of a node.
    #[must_use]
    pub fn area(&self, id: NodeId) -> Option<SourceArea> {
        self.get(id).and_then(|n| n.area)
    }

    /// Replace the source span of a node.
    pub fn set_area(&mut self, id: NodeId, area: Option<SourceArea>) {
        if let Some(node) = self.get_mut(id) {
            node.area = area;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the child at `index`.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Get the number of children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to the entry node.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// The first child of `id` with the given kind.
    #[must_use]
    pub fn find_child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&c| self.kind(c) == kind)
    }

    /// Render the subtree under `id` as an indented outline, one node per line.
    ///
    /// ```text
    /// STYLERULE
    ///   SELECTOR
    ///     ELEMENTNAME "h1"
    /// ```
    #[must_use]
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        out.push_str(&"  ".repeat(depth));
        let name: &'static str = node.kind.into();
        out.push_str(name);
        if let Some(text) = &node.text {
            let _ = write!(out, " {text:?}");
        }
        out.push('\n');
        for &child in &node.children {
            self.dump_into(child, depth + 1, out);
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a ParseTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a ParseTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
