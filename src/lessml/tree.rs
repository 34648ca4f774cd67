//! Node tree
//!
//!     The tree produced by the builder and rewritten by the macro passes. Nodes live in an
//!     arena owned by [Tree] and refer to each other by [NodeId]. A node's `children` list is
//!     the only ownership edge; `parent` is a plain back-index used for context lookups (the
//!     attached-property rewrite needs its enclosing element's name).
//!
//!     The root of every tree is a synthetic container without key or operator. Its children
//!     are the document's root-level nodes; it is never converted itself.
//!
//!     Detaching a node only unlinks it. The arena slot stays allocated until the tree is
//!     dropped, which keeps ids stable while a macro pass splices children around.

pub mod snapshot;

pub use snapshot::TreeSnapshot;

use crate::lessml::fragment::{equivalent_options, QuotedFragment};

/// Index of a node inside its [Tree]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Absent for bare-value nodes (literal text or remarks)
    pub key: Option<QuotedFragment>,
    pub operator: Option<QuotedFragment>,
    pub value: Vec<QuotedFragment>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// No key, operator or value yet
    pub fn empty() -> Self {
        Node {
            key: None,
            operator: None,
            value: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn new(key: impl Into<QuotedFragment>, operator: impl Into<QuotedFragment>) -> Self {
        Node {
            key: Some(key.into()),
            operator: Some(operator.into()),
            value: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// A node carrying only literal content
    pub fn bare(literal: QuotedFragment) -> Self {
        Node {
            key: None,
            operator: None,
            value: vec![literal],
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<QuotedFragment>) -> Self {
        self.value.push(value.into());
        self
    }

    pub fn is_bare_value(&self) -> bool {
        self.key.is_none()
    }

    /// The key snippet, or `""` for bare values
    pub fn key_str(&self) -> &str {
        self.key.as_ref().map(|k| k.snippet.as_str()).unwrap_or("")
    }

    pub fn operator_str(&self) -> &str {
        self.operator.as_ref().map(|o| o.snippet.as_str()).unwrap_or("")
    }

    /// All value snippets concatenated, without their delimiters
    pub fn join_value(&self) -> String {
        self.value.iter().map(|v| v.snippet.as_str()).collect()
    }

    /// Replaces the value with a single plain fragment, or clears it when `value` is empty
    pub fn set_value(&mut self, value: &str) {
        self.value.clear();
        if !value.is_empty() {
            self.value.push(QuotedFragment::plain(value));
        }
    }

    /// Key, operator and every value fragment, in that order
    pub fn fragments_mut(&mut self) -> impl Iterator<Item = &mut QuotedFragment> + '_ {
        self.key
            .iter_mut()
            .chain(self.operator.iter_mut())
            .chain(self.value.iter_mut())
    }

    fn is_locally_equivalent(&self, other: &Node) -> bool {
        equivalent_options(self.key.as_ref(), other.key.as_ref())
            && equivalent_options(self.operator.as_ref(), other.operator.as_ref())
            && self.value.len() == other.value.len()
            && self
                .value
                .iter()
                .zip(&other.value)
                .all(|(a, b)| a.is_semantically_equivalent(b))
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// A tree holding only the synthetic container
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node::empty()],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a detached node to the arena
    pub fn add(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id.0].children.get(index).copied()
    }

    /// Moves `child` to the end of `parent`'s children, detaching it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Adds `node` to the arena as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.add(node);
        self.append_child(parent, id);
        id
    }

    /// Inserts `children` into `parent` starting at `index`, keeping their order
    pub fn insert_children(&mut self, parent: NodeId, index: usize, children: &[NodeId]) {
        for child in children {
            self.detach(*child);
            self.nodes[child.0].parent = Some(parent);
        }
        let list = &mut self.nodes[parent.0].children;
        let index = index.min(list.len());
        list.splice(index..index, children.iter().copied());
    }

    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> NodeId {
        let child = self.nodes[parent.0].children.remove(index);
        self.nodes[child.0].parent = None;
        child
    }

    /// Unlinks `id` from its parent; the node and its subtree stay in the arena
    pub fn detach(&mut self, id: NodeId) {
        if let Some(index) = self.index_in_parent(id) {
            if let Some(parent) = self.parent(id) {
                self.remove_child_at(parent, index);
            }
        }
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Unlinks and returns all children of `id`
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Copies the subtree under `id` into fresh, detached nodes
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let node = self.nodes[id.0].clone();
        let copy = self.add(node);
        for child in self.nodes[id.0].children.clone() {
            let child_copy = self.deep_clone(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Number of nodes reachable from `id`, `id` included
    pub fn subtree_len(&self, id: NodeId) -> usize {
        1 + self
            .children(id)
            .iter()
            .map(|c| self.subtree_len(*c))
            .sum::<usize>()
    }

    /// Compares the subtree at `id` with the subtree at `other_id` of `other`.
    ///
    /// Fragments compare by snippet only; which quotation delimiter was used does not
    /// matter, but a remark never equals anything.
    pub fn is_semantically_equivalent(&self, id: NodeId, other: &Tree, other_id: NodeId) -> bool {
        let (a, b) = (self.node(id), other.node(other_id));
        a.is_locally_equivalent(b)
            && a.children.len() == b.children.len()
            && a
                .children
                .iter()
                .zip(&b.children)
                .all(|(x, y)| self.is_semantically_equivalent(*x, other, *y))
    }

    /// Both trees' root-level nodes, compared pairwise
    pub fn equivalent_to(&self, other: &Tree) -> bool {
        self.is_semantically_equivalent(self.root, other, other.root)
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        snapshot::snapshot_node(self, self.root)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::grammar::Quotation;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.append(root, Node::new("A", ":"));
        let b = tree.append(a, Node::new("B", "=").with_value("1"));
        let c = tree.append(a, Node::new("C", ":"));
        (tree, a, b, c)
    }

    #[test]
    fn test_append_sets_parent() {
        let (tree, a, b, c) = sample();
        assert_eq!(tree.children(a), &[b, c]);
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.parent(a), Some(tree.root()));
        assert_eq!(tree.index_in_parent(c), Some(1));
    }

    #[test]
    fn test_moving_a_node_detaches_it() {
        let (mut tree, a, b, c) = sample();
        tree.append_child(c, b);
        assert_eq!(tree.children(a), &[c]);
        assert_eq!(tree.children(c), &[b]);
        assert_eq!(tree.parent(b), Some(c));
    }

    #[test]
    fn test_insert_children_keeps_order() {
        let (mut tree, a, b, c) = sample();
        let x = tree.add(Node::new("X", "="));
        let y = tree.add(Node::new("Y", "="));
        tree.insert_children(a, 1, &[x, y]);
        assert_eq!(tree.children(a), &[b, x, y, c]);
        assert_eq!(tree.parent(y), Some(a));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let (mut tree, a, b, _) = sample();
        let copy = tree.deep_clone(a);
        assert_eq!(tree.parent(copy), None);
        assert!(tree.is_semantically_equivalent(a, &tree, copy));

        let copied_b = tree.children(copy)[0];
        assert_ne!(copied_b, b);
        tree.node_mut(copied_b).set_value("2");
        assert_eq!(tree.node(b).join_value(), "1");
        assert!(!tree.is_semantically_equivalent(a, &tree, copy));
    }

    #[test]
    fn test_equivalence_ignores_quotation_style() {
        let mut left = Tree::new();
        let root = left.root();
        left.append(
            root,
            Node::new("A", "=").with_value(QuotedFragment::quoted("x y", Quotation::single_quotes())),
        );

        let mut right = Tree::new();
        let root = right.root();
        right.append(root, Node::new("A", "=").with_value("x y"));

        assert!(left.equivalent_to(&right));
    }

    #[test]
    fn test_set_value_clears_on_empty() {
        let mut node = Node::new("A", "=").with_value("a").with_value("b");
        assert_eq!(node.join_value(), "ab");
        node.set_value("");
        assert!(node.value.is_empty());
    }
}
