//! Namespace alias scopes
//!
//!     A stack of alias to URI frames, one frame per element. Lookups walk from the innermost
//!     frame outwards. A binding to the empty URI means "no namespace" (`xmlns=""`).
//!
//!     The same scope serves both directions: resolving `alias:local` names into [XName]s
//!     while converting a tree, and choosing an alias for a namespace URI while writing a
//!     document or converting one back into a tree. An alias is only chosen for a URI when
//!     no inner frame has rebound it to something else.

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::xml::document::{XName, XML_NS};

const XML_ALIAS: &str = "xml";

#[derive(Debug, Clone, Default)]
pub struct NamespaceScope {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        NamespaceScope { frames: Vec::new() }
    }

    pub fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Binds `alias` in the innermost frame, replacing an earlier binding in that frame
    pub fn declare(&mut self, alias: &str, uri: &str) {
        if self.frames.is_empty() {
            self.push();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.retain(|(a, _)| a != alias);
            frame.push((alias.to_string(), uri.to_string()));
        }
    }

    /// The URI `alias` is bound to, if any
    pub fn lookup(&self, alias: &str) -> Option<&str> {
        let declared = self.frames.iter().rev().find_map(|frame| {
            frame
                .iter()
                .find(|(a, _)| a == alias)
                .map(|(_, uri)| uri.as_str())
        });
        match declared {
            None if alias == XML_ALIAS => Some(XML_NS),
            other => other,
        }
    }

    /// Resolves an alias to its namespace, `None` meaning no namespace.
    ///
    /// Fails for an unbound non-empty alias.
    pub fn resolve_alias(&self, alias: &str) -> Result<Option<String>> {
        match self.lookup(alias) {
            Some("") => Ok(None),
            Some(uri) => Ok(Some(uri.to_string())),
            None if alias.is_empty() => Ok(None),
            None => Err(LessmlError::UnmappedAlias {
                alias: alias.to_string(),
            }),
        }
    }

    /// Resolves `alias:local` (or `local` in the default namespace)
    pub fn resolve_element_name(&self, name: &str) -> Result<XName> {
        let (alias, local) = split_name(name);
        Ok(XName {
            namespace: self.resolve_alias(alias)?,
            local: local.to_string(),
        })
    }

    /// Like [Self::resolve_element_name], but an unprefixed name is in no namespace
    pub fn resolve_attribute_name(&self, name: &str) -> Result<XName> {
        match name.split_once(':') {
            None => Ok(XName::local(name)),
            Some(_) => self.resolve_element_name(name),
        }
    }

    /// The innermost alias currently bound to `uri`; may be `""` for the default namespace
    pub fn alias_for(&self, uri: &str) -> Option<&str> {
        if uri == XML_NS {
            return Some(XML_ALIAS);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .filter(|(_, bound)| bound == uri)
            .map(|(alias, _)| alias.as_str())
            .find(|alias| self.lookup(alias) == Some(uri))
    }

    /// Like [Self::alias_for], but never the default namespace
    pub fn prefixed_alias_for(&self, uri: &str) -> Option<&str> {
        if uri == XML_NS {
            return Some(XML_ALIAS);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .filter(|(alias, bound)| bound == uri && !alias.is_empty())
            .map(|(alias, _)| alias.as_str())
            .find(|alias| self.lookup(alias) == Some(uri))
    }

    /// Whether an element in no namespace can be written without a prefix
    pub fn default_is_empty(&self) -> bool {
        matches!(self.lookup(""), None | Some(""))
    }
}

/// Splits on the first colon: `("alias", "local")`, or `("", name)` without one
pub fn split_name(name: &str) -> (&str, &str) {
    name.split_once(':').unwrap_or(("", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_frame_wins() {
        let mut scope = NamespaceScope::new();
        scope.push();
        scope.declare("p", "urn:outer");
        scope.push();
        scope.declare("p", "urn:inner");
        assert_eq!(scope.lookup("p"), Some("urn:inner"));
        scope.pop();
        assert_eq!(scope.lookup("p"), Some("urn:outer"));
    }

    #[test]
    fn test_unmapped_alias() {
        let mut scope = NamespaceScope::new();
        scope.push();
        assert!(matches!(
            scope.resolve_element_name("ui:Button"),
            Err(LessmlError::UnmappedAlias { alias }) if alias == "ui"
        ));
        assert_eq!(
            scope.resolve_element_name("Button").unwrap(),
            XName::local("Button")
        );
    }

    #[test]
    fn test_unprefixed_attribute_ignores_default_namespace() {
        let mut scope = NamespaceScope::new();
        scope.declare("", "urn:default");
        assert_eq!(
            scope.resolve_element_name("A").unwrap(),
            XName::qualified("urn:default", "A")
        );
        assert_eq!(scope.resolve_attribute_name("A").unwrap(), XName::local("A"));
    }

    #[test]
    fn test_shadowed_alias_is_not_chosen() {
        let mut scope = NamespaceScope::new();
        scope.push();
        scope.declare("p", "urn:a");
        scope.push();
        scope.declare("p", "urn:b");
        assert_eq!(scope.alias_for("urn:a"), None);
        scope.declare("q", "urn:a");
        assert_eq!(scope.alias_for("urn:a"), Some("q"));
    }

    #[test]
    fn test_xml_alias_is_implicit() {
        let scope = NamespaceScope::new();
        assert_eq!(
            scope.resolve_attribute_name("xml:lang").unwrap(),
            XName::qualified(XML_NS, "lang")
        );
        assert_eq!(scope.prefixed_alias_for(XML_NS), Some("xml"));
    }

    #[test]
    fn test_default_alias_is_not_prefixed() {
        let mut scope = NamespaceScope::new();
        scope.declare("", "urn:a");
        assert_eq!(scope.alias_for("urn:a"), Some(""));
        assert_eq!(scope.prefixed_alias_for("urn:a"), None);
        assert!(!scope.default_is_empty());
    }
}
