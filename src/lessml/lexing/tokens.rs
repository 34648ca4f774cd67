//! Token types produced by the tokenizer
//!
//! Every non-blank line yields an `Indentation` token followed by either a single
//! `ElementLiteral`, or a `Key`, `Operator`, `Value` triplet.

use crate::lessml::fragment::QuotedFragment;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Token {
    Indentation(usize),
    Key(QuotedFragment),
    Operator(QuotedFragment),
    Value(Vec<QuotedFragment>),
    /// A line that is exactly one quoted span
    ElementLiteral(QuotedFragment),
}

impl Token {
    pub fn is_indentation(&self) -> bool {
        matches!(self, Token::Indentation(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Indentation(level) => write!(f, "<indent:{}>", level),
            Token::Key(key) => write!(f, "<key:{}>", key),
            Token::Operator(op) => write!(f, "<op:{}>", op),
            Token::Value(values) => {
                write!(f, "<value:")?;
                for v in values {
                    write!(f, "{}", v)?;
                }
                write!(f, ">")
            }
            Token::ElementLiteral(literal) => write!(f, "<literal:{}>", literal),
        }
    }
}
