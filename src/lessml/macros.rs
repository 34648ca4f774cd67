//! Macro expansion
//!
//!     A macro is a per-node rewrite. The [MacroExpander] drives it depth first over a tree,
//!     and the macro tells the driver how to go on after each node:
//!
//!         - [MacroResult::ContinueToChildren]: descend into the node's children.
//!         - [MacroResult::Reapply]: the node was rewritten into a shape that may need
//!           another rewrite, run the macro on the same node again.
//!         - [MacroResult::Break]: do not descend. Used when the node was removed or
//!           replaced.
//!
//!     Reapplication is capped (see [MAX_REAPPLY]); a macro that keeps asking for it fails
//!     the expansion with [LessmlError::InfiniteExpansion].
//!
//! Splicing during traversal
//!
//!     A macro may insert, remove or replace children of the node's parent while it runs.
//!     The driver walks children by index and re-reads the slot after every recursive call.
//!     The index only advances when the slot still holds the child that was just visited,
//!     so nodes spliced in at that position are visited in turn.
//!
//!     Macro passes must run one after the other; a pass assumes it is the only writer.

pub mod header;
pub mod template;

pub use template::TemplateMacro;

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::tree::{NodeId, Tree};

/// Reapplications allowed on a single node before expansion is aborted
pub const MAX_REAPPLY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroResult {
    ContinueToChildren,
    Reapply,
    Break,
}

/// A per-node tree rewrite
pub trait Macro {
    fn transform(&mut self, tree: &mut Tree, node: NodeId) -> Result<MacroResult>;
}

/// Depth-first driver for a [Macro]
#[derive(Debug, Clone, Copy)]
pub struct MacroExpander {
    max_reapply: usize,
}

impl MacroExpander {
    pub fn new() -> Self {
        MacroExpander {
            max_reapply: MAX_REAPPLY,
        }
    }

    pub fn with_max_reapply(max_reapply: usize) -> Self {
        MacroExpander { max_reapply }
    }

    /// Expands `node` and, unless the macro breaks, its children
    pub fn expand<M: Macro + ?Sized>(
        &self,
        tree: &mut Tree,
        node: NodeId,
        macro_: &mut M,
    ) -> Result<()> {
        let mut reapplied = 0;
        let result = loop {
            let result = macro_.transform(tree, node)?;
            if result != MacroResult::Reapply {
                break result;
            }
            reapplied += 1;
            if reapplied > self.max_reapply {
                return Err(LessmlError::InfiniteExpansion {
                    limit: self.max_reapply,
                });
            }
        };
        tracing::trace!(?node, ?result, reapplied, "macro applied");

        if result != MacroResult::Break {
            self.expand_children(tree, node, macro_)?;
        }
        Ok(())
    }

    /// Expands every root-level node; the synthetic container itself is not handed to the macro
    pub fn expand_tree<M: Macro + ?Sized>(&self, tree: &mut Tree, macro_: &mut M) -> Result<()> {
        let root = tree.root();
        self.expand_children(tree, root, macro_)
    }

    fn expand_children<M: Macro + ?Sized>(
        &self,
        tree: &mut Tree,
        node: NodeId,
        macro_: &mut M,
    ) -> Result<()> {
        let mut index = 0;
        while let Some(child) = tree.child_at(node, index) {
            self.expand(tree, child, macro_)?;
            if tree.child_at(node, index) == Some(child) {
                index += 1;
            }
        }
        Ok(())
    }
}

impl Default for MacroExpander {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::tree::Node;

    /// Records the keys it visits
    struct Visits(Vec<String>);

    impl Macro for Visits {
        fn transform(&mut self, tree: &mut Tree, node: NodeId) -> Result<MacroResult> {
            self.0.push(tree.node(node).key_str().to_string());
            Ok(MacroResult::ContinueToChildren)
        }
    }

    /// Replaces every `Split` node with two fresh siblings
    struct Splitter;

    impl Macro for Splitter {
        fn transform(&mut self, tree: &mut Tree, node: NodeId) -> Result<MacroResult> {
            if tree.node(node).key_str() != "Split" {
                return Ok(MacroResult::ContinueToChildren);
            }
            let (Some(parent), Some(index)) = (tree.parent(node), tree.index_in_parent(node))
            else {
                return Ok(MacroResult::Break);
            };
            tree.remove_child_at(parent, index);
            let left = tree.add(Node::new("Left", ":"));
            let right = tree.add(Node::new("Right", ":"));
            tree.insert_children(parent, index, &[left, right]);
            Ok(MacroResult::Break)
        }
    }

    /// Counts down through reapplications
    struct Countdown(usize);

    impl Macro for Countdown {
        fn transform(&mut self, _: &mut Tree, _: NodeId) -> Result<MacroResult> {
            if self.0 == 0 {
                return Ok(MacroResult::ContinueToChildren);
            }
            self.0 -= 1;
            Ok(MacroResult::Reapply)
        }
    }

    fn tree_with(keys: &[&str]) -> Tree {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.append(root, Node::new("A", ":"));
        for key in keys {
            tree.append(a, Node::new(*key, ":"));
        }
        tree
    }

    #[test]
    fn test_depth_first_order() {
        let mut tree = tree_with(&["B", "C"]);
        let mut visits = Visits(Vec::new());
        MacroExpander::new().expand_tree(&mut tree, &mut visits).unwrap();
        assert_eq!(visits.0, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_spliced_siblings_are_visited() {
        let mut tree = tree_with(&["B", "Split", "C"]);
        MacroExpander::new()
            .expand_tree(&mut tree, &mut Splitter)
            .unwrap();

        let mut visits = Visits(Vec::new());
        MacroExpander::new().expand_tree(&mut tree, &mut visits).unwrap();
        assert_eq!(visits.0, vec!["A", "B", "Left", "Right", "C"]);
    }

    #[test]
    fn test_reapply_within_limit() {
        let mut tree = tree_with(&[]);
        let root_child = tree.children(tree.root())[0];
        MacroExpander::with_max_reapply(5)
            .expand(&mut tree, root_child, &mut Countdown(5))
            .unwrap();
    }

    #[test]
    fn test_reapply_ceiling() {
        let mut tree = tree_with(&[]);
        let err = MacroExpander::new()
            .expand_tree(&mut tree, &mut Countdown(usize::MAX))
            .unwrap_err();
        assert!(matches!(err, LessmlError::InfiniteExpansion { limit: 1000 }));
    }
}
