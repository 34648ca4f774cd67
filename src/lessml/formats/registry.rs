//! Format registry for tree serialization
//!
//!     Each output format implements [Formatter] and is registered by name with
//!     [FormatRegistry]. The CLI's `tree --format` option looks formats up here.

use std::collections::HashMap;

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::tree::Tree;

/// Trait for tree formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "lessml", "json")
    fn name(&self) -> &str;

    fn serialize(&self, tree: &Tree) -> Result<String>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of tree formatters, keyed by name
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing one with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a tree using the named format
    pub fn serialize(&self, tree: &Tree, format: &str) -> Result<String> {
        let formatter = self.get(format).ok_or_else(|| LessmlError::UnknownFormat {
            name: format.to_string(),
        })?;
        formatter.serialize(tree)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// A registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::DslFormatter::default());
        registry.register(super::JsonFormatter);
        registry.register(super::XmlFormatter::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
