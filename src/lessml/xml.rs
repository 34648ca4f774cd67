//! XML side of the translator
//!
//!     [document] is an owned model with expanded names, [reader] and [writer] move it to and
//!     from text with `quick-xml`, and [converter] maps between it and the key / operator /
//!     value [Tree](crate::lessml::tree::Tree). [namespace] holds the alias scope stack the
//!     other three share.

pub mod converter;
pub mod document;
pub mod namespace;
pub mod reader;
pub mod writer;

pub use converter::{from_xml, to_xml};
pub use document::{Attribute, Element, XName, XmlDocument, XmlNode};
