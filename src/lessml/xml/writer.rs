//! XML serialization
//!
//!     Writes an [XmlDocument] with `quick-xml`. Element and attribute prefixes are chosen
//!     from the namespace declarations in scope, innermost first. A namespace without any
//!     declaration in scope gets a generated `nsN` declaration on the element that needs it,
//!     so every document can be written.
//!
//!     Elements without children are written as empty tags (`<A B="C"/>`).

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::xml::document::{Attribute, Element, XName, XmlDocument, XmlNode, XMLNS_NS};
use crate::lessml::xml::namespace::NamespaceScope;

/// Serializes `document`, indenting nested elements by `indent` spaces when given
pub fn write_document(document: &XmlDocument, indent: Option<usize>) -> Result<String> {
    let writer = match indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };
    let mut xml = XmlWriter {
        writer,
        scope: NamespaceScope::new(),
    };
    for node in &document.nodes {
        xml.write_node(node)?;
    }
    String::from_utf8(xml.writer.into_inner()).map_err(|e| LessmlError::Xml(e.to_string()))
}

struct XmlWriter<W: Write> {
    writer: Writer<W>,
    scope: NamespaceScope,
}

impl<W: Write> XmlWriter<W> {
    fn write_node(&mut self, node: &XmlNode) -> Result<()> {
        match node {
            XmlNode::Element(element) => self.write_element(element),
            XmlNode::Text(text) => {
                self.writer.write_event(Event::Text(BytesText::new(text.as_str())))?;
                Ok(())
            }
            XmlNode::Comment(comment) => {
                self.writer
                    .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
                Ok(())
            }
        }
    }

    fn write_element(&mut self, element: &Element) -> Result<()> {
        self.scope.push();
        for attribute in &element.attributes {
            if let Some(alias) = attribute.declared_alias() {
                self.scope.declare(alias, &attribute.value);
            }
        }

        let mut generated = Vec::new();
        let name = self.element_name(&element.name, &mut generated);
        let mut start = BytesStart::new(name.clone());
        for attribute in &element.attributes {
            let key = self.attribute_name(attribute, &mut generated);
            start.push_attribute((key.as_str(), attribute.value.as_str()));
        }
        for declaration in &generated {
            let key = match declaration.declared_alias() {
                Some("") | None => "xmlns".to_string(),
                Some(alias) => format!("xmlns:{}", alias),
            };
            start.push_attribute((key.as_str(), declaration.value.as_str()));
        }

        if element.children.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
        } else {
            self.writer.write_event(Event::Start(start))?;
            for child in &element.children {
                self.write_node(child)?;
            }
            self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        }

        self.scope.pop();
        Ok(())
    }

    fn element_name(&mut self, name: &XName, generated: &mut Vec<Attribute>) -> String {
        match name.namespace() {
            None => {
                if !self.scope.default_is_empty() {
                    self.scope.declare("", "");
                    generated.push(Attribute::namespace_declaration("", ""));
                }
                name.local.clone()
            }
            Some(uri) => match self.scope.alias_for(uri) {
                Some("") => name.local.clone(),
                Some(alias) => format!("{}:{}", alias, name.local),
                None => {
                    let alias = self.generate_alias(uri, generated);
                    format!("{}:{}", alias, name.local)
                }
            },
        }
    }

    fn attribute_name(&mut self, attribute: &Attribute, generated: &mut Vec<Attribute>) -> String {
        let name = &attribute.name;
        match name.namespace() {
            None => name.local.clone(),
            Some(XMLNS_NS) => format!("xmlns:{}", name.local),
            Some(uri) => {
                let alias = match self.scope.prefixed_alias_for(uri) {
                    Some(alias) => alias.to_string(),
                    None => self.generate_alias(uri, generated),
                };
                format!("{}:{}", alias, name.local)
            }
        }
    }

    fn generate_alias(&mut self, uri: &str, generated: &mut Vec<Attribute>) -> String {
        let alias = (0..)
            .map(|n| format!("ns{}", n))
            .find(|candidate| self.scope.lookup(candidate).is_none())
            .unwrap_or_default();
        self.scope.declare(&alias, uri);
        generated.push(Attribute::namespace_declaration(&alias, uri));
        alias
    }
}
