//! Tree to XML conversion, and back
//!
//!     Forward, node by node:
//!
//!         - A bare node becomes text, or a comment when its fragment is a remark. It may not
//!           have children.
//!         - `key = value` becomes an attribute of the enclosing element, unless the key is
//!           `xmlns` or `xmlns:alias`: then it declares the alias in the enclosing element's
//!           scope frame and is written as a namespace declaration.
//!         - `key: value` becomes an element. Its scope frame is pushed, its `xmlns*`
//!           children are converted first so the aliases they declare are visible regardless
//!           of source order, the value becomes the first text child, the other children
//!           follow, and finally the element's own name is resolved before the frame is
//!           popped.
//!
//!     Names split on the first colon into alias and local name. An alias without a
//!     declaration in scope fails with [LessmlError::UnmappedAlias]. Unprefixed element
//!     names are in the default namespace if one is declared; unprefixed attribute names
//!     are always in no namespace.
//!
//!     Backward, an element becomes `key:` with its attributes (as `key = value` nodes) as
//!     the first children, followed by its content. Names get the innermost alias bound to
//!     their namespace; a namespace without one fails with [LessmlError::UnmappedNamespace].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::fragment::QuotedFragment;
use crate::lessml::grammar::{QuoteKind, Quotation, ATTRIBUTE_OP, ELEMENT_OP};
use crate::lessml::tree::{Node, NodeId, Tree};
use crate::lessml::xml::document::{
    Attribute, Element, XName, XmlDocument, XmlNode, XMLNS_NS, XML_NS,
};
use crate::lessml::xml::namespace::NamespaceScope;

static NAMESPACE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^xmlns(?::(.+))?$").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
});

/// The alias a `xmlns` / `xmlns:alias` key declares
fn declared_alias(key: &str) -> Option<&str> {
    NAMESPACE_DECLARATION
        .captures(key)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
}

fn is_declaration(tree: &Tree, id: NodeId) -> bool {
    let node = tree.node(id);
    node.operator_str() == ATTRIBUTE_OP && declared_alias(node.key_str()).is_some()
}

/// Converts the root-level nodes of `tree` into a document
pub fn to_xml(tree: &Tree) -> Result<XmlDocument> {
    let mut scope = NamespaceScope::new();
    let mut holder = Element::new(XName::local(""));
    scope.push();
    for child in tree.children(tree.root()) {
        convert(tree, *child, &mut holder, &mut scope)?;
    }

    if let Some(attribute) = holder.attributes.first() {
        return Err(LessmlError::StructuralViolation(format!(
            "attribute `{}` outside of any element",
            attribute.name
        )));
    }
    let mut elements = 0;
    for node in &holder.children {
        match node {
            XmlNode::Text(text) => {
                return Err(LessmlError::StructuralViolation(format!(
                    "text {:?} outside the root element",
                    text
                )))
            }
            XmlNode::Element(_) => elements += 1,
            XmlNode::Comment(_) => {}
        }
    }
    if elements != 1 {
        return Err(LessmlError::StructuralViolation(format!(
            "a document needs exactly one root element, found {}",
            elements
        )));
    }

    tracing::debug!(nodes = holder.children.len(), "converted tree to XML");
    Ok(XmlDocument::new(holder.children))
}

fn convert(
    tree: &Tree,
    id: NodeId,
    parent: &mut Element,
    scope: &mut NamespaceScope,
) -> Result<()> {
    let node = tree.node(id);
    if node.is_bare_value() {
        if !tree.children(id).is_empty() {
            return Err(LessmlError::StructuralViolation(format!(
                "literal {:?} cannot have children",
                node.join_value()
            )));
        }
        for fragment in &node.value {
            if fragment.kind() == Some(QuoteKind::Remark) {
                parent.push(XmlNode::Comment(fragment.snippet.clone()));
            } else {
                parent.push_text(&fragment.snippet);
            }
        }
        return Ok(());
    }

    let key = node.key_str();
    match node.operator_str() {
        ATTRIBUTE_OP => {
            let value = node.join_value();
            let attribute = match declared_alias(key) {
                Some(alias) => {
                    scope.declare(alias, &value);
                    Attribute::namespace_declaration(alias, value)
                }
                None => Attribute::new(scope.resolve_attribute_name(key)?, value),
            };
            if parent.attribute(&attribute.name).is_some() {
                return Err(LessmlError::StructuralViolation(format!(
                    "duplicate attribute `{}`",
                    key
                )));
            }
            parent.attributes.push(attribute);
        }
        ELEMENT_OP => {
            scope.push();
            let mut element = Element::new(XName::local(""));
            element.push_text(&node.join_value());

            let (declarations, others): (Vec<NodeId>, Vec<NodeId>) = tree
                .children(id)
                .iter()
                .copied()
                .partition(|c| is_declaration(tree, *c));
            for child in declarations.into_iter().chain(others) {
                convert(tree, child, &mut element, scope)?;
            }

            element.name = scope.resolve_element_name(key)?;
            scope.pop();
            parent.push(XmlNode::Element(element));
        }
        other => {
            return Err(LessmlError::StructuralViolation(format!(
                "operator `{}` on `{}` has no XML form",
                other, key
            )))
        }
    }
    Ok(())
}

/// Converts a document back into a tree
pub fn from_xml(document: &XmlDocument) -> Result<Tree> {
    let mut tree = Tree::new();
    let mut scope = NamespaceScope::new();
    let root = tree.root();
    for node in &document.nodes {
        reverse(node, &mut tree, root, &mut scope)?;
    }
    Ok(tree)
}

fn reverse(
    node: &XmlNode,
    tree: &mut Tree,
    parent: NodeId,
    scope: &mut NamespaceScope,
) -> Result<()> {
    match node {
        XmlNode::Text(text) => {
            tree.append(parent, Node::bare(QuotedFragment::plain(text.as_str())));
        }
        XmlNode::Comment(comment) => {
            tree.append(
                parent,
                Node::bare(QuotedFragment::quoted(comment.as_str(), Quotation::remark())),
            );
        }
        XmlNode::Element(element) => {
            scope.push();
            for attribute in &element.attributes {
                if let Some(alias) = attribute.declared_alias() {
                    scope.declare(alias, &attribute.value);
                }
            }

            let key = element_key(&element.name, scope)?;
            let id = tree.append(parent, Node::new(key, ELEMENT_OP));
            for attribute in &element.attributes {
                let mut node = Node::new(attribute_key(&attribute.name, scope)?, ATTRIBUTE_OP);
                node.set_value(&attribute.value);
                tree.append(id, node);
            }
            for child in &element.children {
                reverse(child, tree, id, scope)?;
            }
            scope.pop();
        }
    }
    Ok(())
}

fn element_key(name: &XName, scope: &NamespaceScope) -> Result<String> {
    match name.namespace() {
        None if scope.default_is_empty() => Ok(name.local.clone()),
        None => Err(LessmlError::UnmappedNamespace { uri: String::new() }),
        Some(uri) => match scope.alias_for(uri) {
            Some("") => Ok(name.local.clone()),
            Some(alias) => Ok(format!("{}:{}", alias, name.local)),
            None => Err(LessmlError::UnmappedNamespace {
                uri: uri.to_string(),
            }),
        },
    }
}

fn attribute_key(name: &XName, scope: &NamespaceScope) -> Result<String> {
    match name.namespace() {
        None => Ok(name.local.clone()),
        Some(XMLNS_NS) => Ok(format!("xmlns:{}", name.local)),
        Some(XML_NS) => Ok(format!("xml:{}", name.local)),
        Some(uri) => scope
            .prefixed_alias_for(uri)
            .map(|alias| format!("{}:{}", alias, name.local))
            .ok_or_else(|| LessmlError::UnmappedNamespace {
                uri: uri.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::building::build_tree;
    use crate::lessml::grammar::GrammarConfig;
    use crate::lessml::lexing::tokenize;

    fn xml(source: &str) -> Result<String> {
        let tree = build_tree(tokenize(source, &GrammarConfig::xml())?)?;
        to_xml(&tree)?.to_xml_string()
    }

    #[test]
    fn test_attribute_and_value() {
        assert_eq!(xml("A: text\n    B = C").unwrap(), r#"<A B="C">text</A>"#);
    }

    #[test]
    fn test_declarations_apply_regardless_of_order() {
        assert_eq!(
            xml("p:A:\n    p:B = 1\n    xmlns:p = urn:p").unwrap(),
            r#"<p:A xmlns:p="urn:p" p:B="1"/>"#
        );
    }

    #[test]
    fn test_alias_does_not_leak_to_siblings() {
        let err = xml("A:\n    B:\n        xmlns:p = urn:p\n    p:C:").unwrap_err();
        assert!(matches!(err, LessmlError::UnmappedAlias { alias } if alias == "p"));
    }

    #[test]
    fn test_literal_with_children_fails() {
        let err = xml("A:\n    'text'\n        B:").unwrap_err();
        assert!(matches!(err, LessmlError::StructuralViolation(_)));
    }

    #[test]
    fn test_remark_becomes_comment() {
        let tree = build_tree(tokenize("A:\n    <!-- note -->", &GrammarConfig::xaml()).unwrap()).unwrap();
        assert_eq!(
            to_xml(&tree).unwrap().to_xml_string().unwrap(),
            "<A><!-- note --></A>"
        );
    }

    #[test]
    fn test_unknown_operator_fails() {
        let tree = build_tree(tokenize("A -> B", &GrammarConfig::xaml()).unwrap()).unwrap();
        assert!(matches!(
            to_xml(&tree),
            Err(LessmlError::StructuralViolation(_))
        ));
    }

    #[test]
    fn test_reverse_uses_innermost_alias() {
        let doc = XmlDocument::parse(
            r#"<p:A xmlns:p="urn:1"><p:B xmlns:q="urn:1" xmlns:p="urn:2"><q:C/></p:B></p:A>"#,
        )
        .unwrap();
        let tree = from_xml(&doc).unwrap();
        let a = tree.children(tree.root())[0];
        assert_eq!(tree.node(a).key_str(), "p:A");
        let b = tree.children(a)[1];
        assert_eq!(tree.node(b).key_str(), "p:B");
        let c = *tree.children(b).last().unwrap();
        assert_eq!(tree.node(c).key_str(), "q:C");
    }

    #[test]
    fn test_reverse_empty_attribute_has_no_value() {
        let doc = XmlDocument::parse(r#"<A B=""/>"#).unwrap();
        let tree = from_xml(&doc).unwrap();
        let a = tree.children(tree.root())[0];
        let b = tree.node(tree.children(a)[0]);
        assert_eq!(b.key_str(), "B");
        assert!(b.value.is_empty());
    }
}
