//! XML parsing
//!
//!     Reads a document with `quick-xml` into the owned model. Whitespace-only text is
//!     dropped (it is layout between elements), other text is kept as written after
//!     unescaping. CDATA sections become text, comments are kept, and the XML declaration,
//!     processing instructions and doctype are skipped.
//!
//!     Prefixes are resolved with the same scope stack the converter uses; an unbound prefix
//!     fails with [LessmlError::UnmappedAlias].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::xml::document::{Attribute, Element, XName, XmlDocument, XmlNode, XMLNS_NS};
use crate::lessml::xml::namespace::NamespaceScope;

pub fn read_document(text: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(text);
    let mut scope = NamespaceScope::new();
    let mut open: Vec<Element> = Vec::new();
    let mut document = Element::new(XName::local(""));

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                open.push(start_element(&start, &mut scope)?);
            }
            Event::Empty(start) => {
                let element = start_element(&start, &mut scope)?;
                scope.pop();
                current(&mut open, &mut document).push(XmlNode::Element(element));
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| LessmlError::Xml("unexpected closing tag".to_string()))?;
                scope.pop();
                current(&mut open, &mut document).push(XmlNode::Element(element));
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if !text.trim().is_empty() {
                    current(&mut open, &mut document).push_text(&text);
                }
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data).map_err(|e| LessmlError::Xml(e.to_string()))?;
                current(&mut open, &mut document).push_text(text);
            }
            Event::Comment(comment) => {
                let text =
                    std::str::from_utf8(&comment).map_err(|e| LessmlError::Xml(e.to_string()))?;
                current(&mut open, &mut document).push(XmlNode::Comment(text.to_string()));
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(LessmlError::Xml(format!(
            "element `{}` is not closed",
            unclosed.name
        )));
    }
    if document.children.iter().any(|n| matches!(n, XmlNode::Text(_))) {
        return Err(LessmlError::Xml("text outside the root element".to_string()));
    }
    Ok(XmlDocument::new(document.children))
}

fn current<'e>(open: &'e mut [Element], document: &'e mut Element) -> &'e mut Element {
    match open.last_mut() {
        Some(element) => element,
        None => document,
    }
}

/// Reads the tag name and attributes, pushing a scope frame for the new element
fn start_element(start: &BytesStart, scope: &mut NamespaceScope) -> Result<Element> {
    let mut raw = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        raw.push((key, value));
    }

    scope.push();
    for (key, value) in &raw {
        if key == "xmlns" {
            scope.declare("", value);
        } else if let Some(alias) = key.strip_prefix("xmlns:") {
            scope.declare(alias, value);
        }
    }

    let name = scope.resolve_element_name(utf8(start.name().as_ref())?)?;
    let mut element = Element::new(name);
    for (key, value) in raw {
        let name = match key.strip_prefix("xmlns:") {
            Some(alias) => XName::qualified(XMLNS_NS, alias),
            None => scope.resolve_attribute_name(&key)?,
        };
        element.attributes.push(Attribute::new(name, value));
    }
    Ok(element)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| LessmlError::Xml(e.to_string()))
}
