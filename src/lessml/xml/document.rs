//! Owned XML document model
//!
//!     Names are expanded: an [XName] holds the namespace URI, never a prefix. Prefixes are
//!     chosen when the document is written and resolved away when it is read.
//!
//!     Namespace declarations are ordinary attributes: `xmlns` in no namespace declares the
//!     default namespace, `xmlns:p` is the attribute `p` in the [XMLNS_NS] namespace.

use std::fmt;

use crate::lessml::error::Result;

/// Namespace of `xmlns:p` declaration attributes
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";
/// Namespace bound to the reserved `xml` prefix
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XName {
    pub namespace: Option<String>,
    pub local: String,
}

impl XName {
    /// A name in no namespace
    pub fn local(local: impl Into<String>) -> Self {
        XName {
            namespace: None,
            local: local.into(),
        }
    }

    pub fn qualified(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        XName {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for XName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: XName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: XName, value: impl Into<String>) -> Self {
        Attribute {
            name,
            value: value.into(),
        }
    }

    /// `xmlns="uri"` for an empty alias, `xmlns:alias="uri"` otherwise
    pub fn namespace_declaration(alias: &str, uri: impl Into<String>) -> Self {
        let name = if alias.is_empty() {
            XName::local("xmlns")
        } else {
            XName::qualified(XMLNS_NS, alias)
        };
        Attribute::new(name, uri)
    }

    /// The alias this attribute declares (`""` for the default namespace), if it is a
    /// namespace declaration
    pub fn declared_alias(&self) -> Option<&str> {
        match self.name.namespace() {
            None if self.name.local == "xmlns" => Some(""),
            Some(XMLNS_NS) => Some(self.name.local.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: XName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: XName) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: XName, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.push(child);
        self
    }

    pub fn attribute(&self, name: &XName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Appends `child`; text directly following text is merged into it
    pub fn push(&mut self, child: XmlNode) {
        match child {
            XmlNode::Text(text) => self.push_text(&text),
            other => self.children.push(other),
        }
    }

    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(XmlNode::Text(last)) => last.push_str(text),
            _ => self.children.push(XmlNode::Text(text.to_string())),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDocument {
    /// Top-level nodes: the root element plus any comments around it
    pub nodes: Vec<XmlNode>,
}

impl XmlDocument {
    pub fn new(nodes: Vec<XmlNode>) -> Self {
        XmlDocument { nodes }
    }

    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        super::reader::read_document(text)
    }

    /// Serializes without any added whitespace
    pub fn to_xml_string(&self) -> Result<String> {
        super::writer::write_document(self, None)
    }

    /// Serializes with one element per line, indented by `indent` spaces per level
    pub fn to_pretty_string(&self, indent: usize) -> Result<String> {
        super::writer::write_document(self, Some(indent))
    }
}
