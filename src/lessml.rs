//! Main module for lessml library functionality
//!
//!     A translation runs in fixed order: [lexing] turns source text into tokens,
//!     [building] turns tokens into a [tree], [macros] expand templates, [xaml] rewrites the
//!     XAML shorthands, and [xml] converts the result into an XML document. The stages are
//!     wired together in [transforms]; [loader] is the usual way in.
//!
//!     The reverse direction goes [xml] → [tree] → [formats].

pub mod building;
pub mod config;
pub mod error;
pub mod formats;
pub mod fragment;
pub mod grammar;
pub mod lexing;
pub mod loader;
pub mod macros;
pub mod testing;
pub mod transforms;
pub mod tree;
pub mod xaml;
pub mod xml;

use crate::lessml::error::Result;
use crate::lessml::formats::DEFAULT_INDENT;
use crate::lessml::loader::DocumentLoader;
use crate::lessml::tree::Tree;
use crate::lessml::xml::XmlDocument;

/// Translates LessXaml source into an XML document
pub fn translate(source: &str) -> Result<XmlDocument> {
    DocumentLoader::from_string(source).translate()
}

/// Converts an XML document back into a tree
pub fn from_xml(document: &XmlDocument) -> Result<Tree> {
    xml::from_xml(document)
}

/// Writes an XML document as LessXaml text
pub fn to_dsl_text(document: &XmlDocument) -> Result<String> {
    formats::to_dsl_text(&from_xml(document)?, DEFAULT_INDENT)
}
