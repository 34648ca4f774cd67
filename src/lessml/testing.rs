//! Fluent assertions for trees
//!
//!     Tests describe the expected tree shape by walking it:
//!
//!         assert_tree(&tree)
//!             .root_count(1)
//!             .root(0)
//!             .key("Grid")
//!             .child(0, |row| row.key("Grid.Row").operator(":"));
//!
//!     Every assertion panics with the path of the node it was checking, e.g.
//!     `root[0].child[2]: expected key "Width", found "Height"`.

use crate::lessml::grammar::QuoteKind;
use crate::lessml::tree::{NodeId, Tree};

/// Start asserting on the root-level nodes of `tree`
pub fn assert_tree(tree: &Tree) -> TreeAssertion<'_> {
    TreeAssertion { tree }
}

pub struct TreeAssertion<'a> {
    tree: &'a Tree,
}

impl<'a> TreeAssertion<'a> {
    pub fn root_count(self, expected: usize) -> Self {
        let found = self.tree.children(self.tree.root()).len();
        assert_eq!(
            found, expected,
            "tree: expected {} root-level nodes, found {}",
            expected, found
        );
        self
    }

    /// The root-level node at `index`
    pub fn root(self, index: usize) -> NodeAssertion<'a> {
        let id = self
            .tree
            .child_at(self.tree.root(), index)
            .unwrap_or_else(|| panic!("tree: no root-level node at index {}", index));
        NodeAssertion {
            tree: self.tree,
            id,
            context: format!("root[{}]", index),
        }
    }
}

pub struct NodeAssertion<'a> {
    tree: &'a Tree,
    id: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn key(self, expected: &str) -> Self {
        let node = self.tree.node(self.id);
        assert!(
            !node.is_bare_value(),
            "{}: expected key {:?}, found a bare value",
            self.context,
            expected
        );
        assert_eq!(
            node.key_str(),
            expected,
            "{}: expected key {:?}, found {:?}",
            self.context,
            expected,
            node.key_str()
        );
        self
    }

    pub fn operator(self, expected: &str) -> Self {
        let found = self.tree.node(self.id).operator_str();
        assert_eq!(
            found, expected,
            "{}: expected operator {:?}, found {:?}",
            self.context, expected, found
        );
        self
    }

    /// Checks the concatenated value text
    pub fn value(self, expected: &str) -> Self {
        let found = self.tree.node(self.id).join_value();
        assert_eq!(
            found, expected,
            "{}: expected value {:?}, found {:?}",
            self.context, expected, found
        );
        self
    }

    /// Asserts the node has no key and carries `expected` as literal text
    pub fn bare(self, expected: &str) -> Self {
        assert!(
            self.tree.node(self.id).is_bare_value(),
            "{}: expected a bare value, found key {:?}",
            self.context,
            self.tree.node(self.id).key_str()
        );
        self.value(expected)
    }

    /// Asserts the node is a bare remark (becomes an XML comment)
    pub fn remark(self, expected: &str) -> Self {
        let node = self.tree.node(self.id);
        let is_remark = node.is_bare_value()
            && node
                .value
                .first()
                .is_some_and(|v| v.kind() == Some(QuoteKind::Remark));
        assert!(is_remark, "{}: expected a remark", self.context);
        self.value(expected)
    }

    pub fn child_count(self, expected: usize) -> Self {
        let found = self.tree.children(self.id).len();
        assert_eq!(
            found, expected,
            "{}: expected {} children, found {}",
            self.context, expected, found
        );
        self
    }

    /// Keys of all children, bare values as `""`
    pub fn child_keys(self, expected: &[&str]) -> Self {
        let found: Vec<&str> = self
            .tree
            .children(self.id)
            .iter()
            .map(|c| self.tree.node(*c).key_str())
            .collect();
        assert_eq!(
            found, expected,
            "{}: unexpected child keys",
            self.context
        );
        self
    }

    /// Runs `check` on the child at `index`
    pub fn child<F, R>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let id = self.tree.child_at(self.id, index).unwrap_or_else(|| {
            panic!(
                "{}: no child at index {} (has {})",
                self.context,
                index,
                self.tree.children(self.id).len()
            )
        });
        check(NodeAssertion {
            tree: self.tree,
            id,
            context: format!("{}.child[{}]", self.context, index),
        });
        self
    }
}
