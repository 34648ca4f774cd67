//! XAML desugaring
//!
//!     Rewrites the XAML shorthands into plain element and attribute nodes before the tree
//!     is converted. Each structural rewrite asks for the node to be examined again, so
//!     shorthands that produce other shorthands are resolved in turn.
//!
//!     Property setters. A key starting with `.` becomes a `Setter` element:
//!
//!         .Background = Red            Setter:
//!                              =>          Property = Background
//!                                          Value = Red
//!
//!     The original operator and value go to the `Value` child, and so do the original
//!     children.
//!
//!     Attached properties. `prop -> Value` under `Owner` becomes a property element
//!     holding a `Value` element:
//!
//!         Owner:                       Owner:
//!             prop -> Value    =>          Owner.prop:
//!                                              Value:
//!
//!     Bindings. `prop := Path` becomes `prop -> Binding` with a `Path = Path` child, which
//!     the attached-property rule then turns into `Owner.prop: Binding: Path = ...`.
//!
//!     Resource references. A value starting with `**` becomes `{DynamicResource name}`,
//!     one starting with `*` becomes `{StaticResource name}`.
//!
//! Document shape
//!
//!     [desugar_document] picks the single keyed root-level node as the document root, runs
//!     the rewrites below it and declares the XAML presentation namespace as default and
//!     the XAML language namespace as `x` when the root does not declare them itself.

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::grammar::{ATTACHED_OP, ATTRIBUTE_OP, BINDING_OP, ELEMENT_OP};
use crate::lessml::macros::{Macro, MacroExpander, MacroResult};
use crate::lessml::tree::{Node, NodeId, Tree};

pub const XAML_PRESENTATION_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";
pub const XAML_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

const SETTER_MARKER: &str = ".";
const DYNAMIC_RESOURCE_MARKER: &str = "**";
const STATIC_RESOURCE_MARKER: &str = "*";

/// The XAML shorthand rewrites
pub struct XamlDesugaring;

impl XamlDesugaring {
    pub fn new() -> Self {
        XamlDesugaring
    }

    fn rewrite_setter(tree: &mut Tree, node: NodeId) {
        let n = tree.node(node);
        let property = n.key_str()[SETTER_MARKER.len()..].to_string();
        let mut value_node = Node::new("Value", n.operator_str());
        value_node.value = n.value.clone();

        let children = tree.take_children(node);
        let mut property_node = Node::new("Property", ATTRIBUTE_OP);
        property_node.set_value(&property);
        tree.append(node, property_node);
        let value_node = tree.append(node, value_node);
        for child in children {
            tree.append_child(value_node, child);
        }

        let n = tree.node_mut(node);
        n.key = Some("Setter".into());
        n.operator = Some(ELEMENT_OP.into());
        n.value.clear();
    }

    fn rewrite_attached(tree: &mut Tree, node: NodeId) -> Result<()> {
        let owner = tree
            .parent(node)
            .map(|p| tree.node(p))
            .filter(|p| !p.is_bare_value())
            .map(|p| p.key_str().to_string())
            .ok_or_else(|| {
                LessmlError::StructuralViolation(format!(
                    "attached property `{}` has no enclosing element",
                    tree.node(node).key_str()
                ))
            })?;
        let target = tree.node(node).join_value();
        if target.is_empty() {
            return Err(LessmlError::StructuralViolation(format!(
                "attached property `{}` has no value",
                tree.node(node).key_str()
            )));
        }

        let children = tree.take_children(node);
        let value_node = tree.append(node, Node::new(target, ELEMENT_OP));
        for child in children {
            tree.append_child(value_node, child);
        }

        let n = tree.node_mut(node);
        let key = format!("{}.{}", owner, n.key_str());
        n.key = Some(key.into());
        n.operator = Some(ELEMENT_OP.into());
        n.value.clear();
        Ok(())
    }

    fn rewrite_binding(tree: &mut Tree, node: NodeId) {
        let mut path = Node::new("Path", ATTRIBUTE_OP);
        path.value = tree.node(node).value.clone();
        tree.append(node, path);

        let n = tree.node_mut(node);
        n.operator = Some(ATTACHED_OP.into());
        n.set_value("Binding");
    }
}

impl Default for XamlDesugaring {
    fn default() -> Self {
        Self::new()
    }
}

impl Macro for XamlDesugaring {
    fn transform(&mut self, tree: &mut Tree, node: NodeId) -> Result<MacroResult> {
        if tree.node(node).is_bare_value() {
            return Ok(MacroResult::ContinueToChildren);
        }

        if tree.node(node).key_str().starts_with(SETTER_MARKER) {
            Self::rewrite_setter(tree, node);
            return Ok(MacroResult::Reapply);
        }

        let operator = tree.node(node).operator_str().to_string();
        match operator.as_str() {
            ATTACHED_OP => {
                Self::rewrite_attached(tree, node)?;
                return Ok(MacroResult::Reapply);
            }
            BINDING_OP => {
                Self::rewrite_binding(tree, node);
                return Ok(MacroResult::Reapply);
            }
            _ => {}
        }

        let value = tree.node(node).join_value();
        if let Some(name) = value.strip_prefix(DYNAMIC_RESOURCE_MARKER) {
            tree.node_mut(node)
                .set_value(&format!("{{DynamicResource {}}}", name));
        } else if let Some(name) = value.strip_prefix(STATIC_RESOURCE_MARKER) {
            tree.node_mut(node)
                .set_value(&format!("{{StaticResource {}}}", name));
        }
        Ok(MacroResult::ContinueToChildren)
    }
}

/// Selects the document root, desugars it and adds the default XAML namespace declarations
pub fn desugar_document(tree: &mut Tree, expander: &MacroExpander) -> Result<NodeId> {
    let keyed: Vec<NodeId> = tree
        .children(tree.root())
        .iter()
        .copied()
        .filter(|id| !tree.node(*id).is_bare_value())
        .collect();
    let [root] = keyed.as_slice() else {
        return Err(LessmlError::StructuralViolation(format!(
            "a XAML document needs exactly one root element, found {}",
            keyed.len()
        )));
    };
    let root = *root;

    expander.expand(tree, root, &mut XamlDesugaring::new())?;

    for (key, namespace) in [("xmlns", XAML_PRESENTATION_NS), ("xmlns:x", XAML_NS)] {
        let declared = tree.children(root).iter().any(|c| {
            let c = tree.node(*c);
            c.key_str() == key && c.operator_str() == ATTRIBUTE_OP
        });
        if !declared {
            tree.append(root, Node::new(key, ATTRIBUTE_OP).with_value(namespace));
        }
    }
    Ok(root)
}
