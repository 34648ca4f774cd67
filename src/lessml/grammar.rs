//! Grammar configuration consumed by the lexer
//!
//!     A grammar is a small immutable value: which quotations the scanner recognises, which
//!     operator strings split a line into key and value, and the operator used when a line
//!     has none. It is passed into every parse call; nothing here is global state.
//!
//!     Quotation order matters. When several start delimiters occur on a line, the one that
//!     starts earliest wins; ties go to the quotation listed first.

use serde::{Deserialize, Serialize};

/// Operator that turns a node into an XML attribute
pub const ATTRIBUTE_OP: &str = "=";
/// Operator that turns a node into an XML element
pub const ELEMENT_OP: &str = ":";
/// Attached-property shorthand (`Owner: prop -> Value`)
pub const ATTACHED_OP: &str = "->";
/// Binding shorthand (`prop := Path`)
pub const BINDING_OP: &str = ":=";

/// What a quoted span means once it has been scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteKind {
    /// Literal text
    String,
    /// Source comment, dropped by the scanner
    Comment,
    /// Literal that is emitted as an XML comment
    Remark,
    /// Template definition or invocation header
    Template,
}

/// How the content of a quotation is unescaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Escaping {
    /// Content is taken as written
    #[default]
    Verbatim,
    /// `\n`, `\t`, `\\` and escaped quote characters
    Backslash,
}

impl Escaping {
    pub fn unescape(&self, content: &str) -> String {
        match self {
            Escaping::Verbatim => content.to_string(),
            Escaping::Backslash => {
                let mut out = String::with_capacity(content.len());
                let mut chars = content.chars();
                while let Some(c) = chars.next() {
                    if c != '\\' {
                        out.push(c);
                        continue;
                    }
                    match chars.next() {
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some(other @ ('\\' | '\'' | '"' | '`')) => out.push(other),
                        Some(other) => {
                            out.push('\\');
                            out.push(other);
                        }
                        None => out.push('\\'),
                    }
                }
                out
            }
        }
    }
}

/// A recognised quotation style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub start: String,
    /// `None` means the quotation runs to the end of the line
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: QuoteKind,
    #[serde(default)]
    pub escaping: Escaping,
}

fn default_kind() -> QuoteKind {
    QuoteKind::String
}

impl Quotation {
    pub fn new(start: &str, end: Option<&str>, kind: QuoteKind) -> Self {
        Quotation {
            start: start.to_string(),
            end: end.map(str::to_string),
            kind,
            escaping: Escaping::Verbatim,
        }
    }

    pub fn string(start: &str, end: &str) -> Self {
        Self::new(start, Some(end), QuoteKind::String)
    }

    pub fn single_quotes() -> Self {
        Self::string("'", "'")
    }

    pub fn double_quotes() -> Self {
        Self::string("\"", "\"")
    }

    pub fn block_comment() -> Self {
        Self::new("/*", Some("*/"), QuoteKind::Comment)
    }

    pub fn line_comment() -> Self {
        Self::new("#", None, QuoteKind::Comment)
    }

    /// Backtick quotation that marks template definitions and invocations
    pub fn template() -> Self {
        Self::new("`", Some("`"), QuoteKind::Template)
    }

    pub fn remark() -> Self {
        Self::new("<!--", Some("-->"), QuoteKind::Remark)
    }

    pub fn with_escaping(mut self, escaping: Escaping) -> Self {
        self.escaping = escaping;
        self
    }
}

/// The full set of lexical rules for one parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    pub quotations: Vec<Quotation>,
    pub operators: Vec<String>,
    pub default_operator: String,
}

impl GrammarConfig {
    pub fn new(quotations: Vec<Quotation>, operators: &[&str], default_operator: &str) -> Self {
        GrammarConfig {
            quotations,
            operators: operators.iter().map(|o| o.to_string()).collect(),
            default_operator: default_operator.to_string(),
        }
    }

    /// Plain XML notation: attributes with `=`, elements with `:`
    pub fn xml() -> Self {
        Self::new(
            vec![
                Quotation::single_quotes(),
                Quotation::double_quotes(),
                Quotation::block_comment(),
                Quotation::line_comment(),
            ],
            &[ATTRIBUTE_OP, ELEMENT_OP],
            ELEMENT_OP,
        )
    }

    /// XAML notation: the XML rules plus shorthand operators, templates and remarks
    pub fn xaml() -> Self {
        let mut grammar = Self::xml();
        grammar
            .operators
            .extend([ATTACHED_OP.to_string(), BINDING_OP.to_string()]);
        grammar.quotations.push(Quotation::template());
        grammar.quotations.push(Quotation::remark());
        grammar
    }

    /// The quotation that marks template headers, if the grammar has one
    pub fn template_quotation(&self) -> Option<&Quotation> {
        self.quotations
            .iter()
            .find(|q| q.kind == QuoteKind::Template)
    }

    /// The longest configured operator that `text` ends with
    pub fn operator_suffix_of(&self, text: &str) -> Option<&str> {
        self.operators
            .iter()
            .filter(|op| !op.is_empty() && text.ends_with(op.as_str()))
            .fold(None, |best: Option<&String>, op| match best {
                Some(b) if b.len() >= op.len() => Some(b),
                _ => Some(op),
            })
            .map(String::as_str)
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self::xaml()
    }
}
