//! Tree building
//!
//!     Rebuilds the node tree from the flat token list. The builder keeps a stack of the
//!     nodes on the path from the current root-level node to the node being filled in.
//!
//!     An `Indentation(0)` token starts a new root-level node under the synthetic container
//!     and resets the stack. A deeper level pops the stack down to at most that many entries,
//!     then attaches a new node to the top and pushes it. A level can skip ahead of the stack
//!     when a comment-only line opened an indentation level without producing a node; the
//!     new node then goes under the deepest open node. The `Key`, `Operator`, `Value` and
//!     `ElementLiteral` tokens that follow fill in the node on top of the stack.

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::lexing::Token;
use crate::lessml::tree::{Node, NodeId, Tree};

pub fn build_tree(tokens: Vec<Token>) -> Result<Tree> {
    let mut tree = Tree::new();
    let mut stack: Vec<NodeId> = Vec::new();

    for token in tokens {
        match token {
            Token::Indentation(level) => {
                if level > 0 && stack.is_empty() {
                    return Err(LessmlError::StructuralViolation(format!(
                        "indentation level {} has no enclosing node",
                        level
                    )));
                }
                stack.truncate(level);
                let parent = stack.last().copied().unwrap_or(tree.root());
                let node = tree.append(parent, Node::empty());
                stack.push(node);
            }
            Token::Key(key) => tree.node_mut(current(&stack)?).key = Some(key),
            Token::Operator(op) => tree.node_mut(current(&stack)?).operator = Some(op),
            Token::Value(value) => tree.node_mut(current(&stack)?).value = value,
            Token::ElementLiteral(literal) => {
                tree.node_mut(current(&stack)?).value = vec![literal]
            }
        }
    }

    tracing::debug!(nodes = tree.subtree_len(tree.root()) - 1, "built tree");
    Ok(tree)
}

fn current(stack: &[NodeId]) -> Result<NodeId> {
    stack.last().copied().ok_or_else(|| {
        LessmlError::StructuralViolation("token before the first line start".to_string())
    })
}
