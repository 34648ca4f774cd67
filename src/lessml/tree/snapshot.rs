//! Tree snapshot
//!
//! A plain, owned copy of a tree for serialization (the CLI dumps it as JSON). Fragments are
//! rendered with their delimiters so quoting stays visible.

use super::{NodeId, Tree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub value: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<TreeSnapshot>,
}

/// Snapshot of `id` and everything below it
pub fn snapshot_node(tree: &Tree, id: NodeId) -> TreeSnapshot {
    let node = tree.node(id);
    TreeSnapshot {
        key: node.key.as_ref().map(|k| k.to_string()),
        operator: node.operator.as_ref().map(|o| o.to_string()),
        value: node.value.iter().map(|v| v.to_string()).collect(),
        children: tree
            .children(id)
            .iter()
            .map(|child| snapshot_node(tree, *child))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::fragment::QuotedFragment;
    use crate::lessml::grammar::Quotation;
    use crate::lessml::tree::Node;

    #[test]
    fn test_snapshot_keeps_delimiters() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.append(root, Node::new("A", ":"));
        tree.append(
            a,
            Node::bare(QuotedFragment::quoted("hi", Quotation::double_quotes())),
        );

        let json = serde_json::to_value(tree.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "children": [
                    {"key": "A", "operator": ":", "children": [{"value": ["\"hi\""]}]}
                ]
            })
        );
    }
}
