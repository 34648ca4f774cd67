//! Error types for the translation pipeline
//!
//!     Every stage fails fast: the first violation aborts the whole translation and is
//!     surfaced as one [LessmlError] variant. There is no partial-result recovery; the
//!     caller decides how to present the error (the CLI prints it to stderr).

use thiserror::Error;

/// Errors produced while lexing, expanding, or converting a document
#[derive(Debug, Error)]
pub enum LessmlError {
    /// A document used both tab and space as leading whitespace
    #[error("line {line}: don't mix different whitespace characters in indentation")]
    MixedIndentation { line: usize },

    /// An un-indent that does not land on any previously used indentation
    #[error("line {line}: invalid whitespace indentation")]
    InvalidIndentation { line: usize },

    /// The source ran out before a quotation's closing delimiter
    #[error("line {line}: unfinished quotation, expected closing `{delimiter}`")]
    UnterminatedQuote { line: usize, delimiter: String },

    /// A macro kept asking to be reapplied to the same node, or templates nested too deep
    #[error("possible infinite recursion in macro expansion: limit of {limit} exceeded")]
    InfiniteExpansion { limit: usize },

    /// A template key that does not look like `Name(args)`
    #[error("malformed template header `{header}`")]
    MalformedTemplate { header: String },

    #[error("unknown template `{name}`")]
    UnknownTemplate { name: String },

    #[error("template `{name}` expects {expected} argument(s), got {found}")]
    ParameterCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A name prefix with no namespace declaration in scope
    #[error("unmapped namespace alias `{alias}`")]
    UnmappedAlias { alias: String },

    /// A namespace URI with no alias in scope (reverse conversion)
    #[error("no alias in scope for namespace `{uri}`")]
    UnmappedNamespace { uri: String },

    #[error("structural violation: {0}")]
    StructuralViolation(String),

    /// A format name no formatter is registered under
    #[error("format `{name}` not found")]
    UnknownFormat { name: String },

    #[error("XML error: {0}")]
    Xml(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for LessmlError {
    fn from(err: quick_xml::Error) -> Self {
        LessmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for LessmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        LessmlError::Xml(err.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LessmlError>;
