//! Output formats for trees
//!
//!     - `lessml`: indentation-based text that tokenizes back into an equivalent tree
//!     - `json`: the serde snapshot of the tree, for inspection
//!     - `xml`: the converted document

pub mod dsl;
pub mod registry;

pub use dsl::{to_dsl_text, DslWriter, DEFAULT_INDENT};
pub use registry::{FormatRegistry, Formatter};

use crate::lessml::error::Result;
use crate::lessml::grammar::GrammarConfig;
use crate::lessml::tree::Tree;
use crate::lessml::xml::to_xml;

/// LessXaml text
#[derive(Debug, Clone, Default)]
pub struct DslFormatter {
    pub grammar: GrammarConfig,
    pub indent_string: Option<String>,
}

impl Formatter for DslFormatter {
    fn name(&self) -> &str {
        "lessml"
    }

    fn serialize(&self, tree: &Tree) -> Result<String> {
        let writer = DslWriter::new(&self.grammar);
        match &self.indent_string {
            Some(indent) => writer.with_indent(indent.as_str()).write(tree),
            None => writer.write(tree),
        }
    }

    fn description(&self) -> &str {
        "Indentation-based LessXaml text"
    }
}

/// Pretty-printed JSON of the tree snapshot
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Tree) -> Result<String> {
        Ok(serde_json::to_string_pretty(&tree.snapshot())?)
    }

    fn description(&self) -> &str {
        "JSON snapshot of the node tree"
    }
}

/// The tree converted to XML, compact unless an indent width is set
#[derive(Debug, Clone, Default)]
pub struct XmlFormatter {
    pub indent: Option<usize>,
}

impl Formatter for XmlFormatter {
    fn name(&self) -> &str {
        "xml"
    }

    fn serialize(&self, tree: &Tree) -> Result<String> {
        let document = to_xml(tree)?;
        match self.indent {
            Some(width) => document.to_pretty_string(width),
            None => document.to_xml_string(),
        }
    }

    fn description(&self) -> &str {
        "XML document"
    }
}
