//! # lessml
//!
//! Translator between LessXaml, an indentation-based notation for XML and XAML, and XML.
//!
//! ```text
//! Window:
//!     Title = Hello
//!     Button: Click me
//!         Width = 80
//! ```
//!
//! Most callers want [translate] (source text to [XmlDocument](lessml::xml::XmlDocument))
//! or [to_dsl_text] for the way back. The individual stages live under [lessml].
//!
//! ## Testing
//!
//! Tree shapes are asserted with the fluent helpers in [lessml::testing].

pub mod lessml;

pub use lessml::error::{LessmlError, Result};
pub use lessml::{from_xml, to_dsl_text, translate};
