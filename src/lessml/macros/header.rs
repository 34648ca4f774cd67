//! Template header parsing
//!
//! Parses `Name(arg, arg, ...)`. Arguments are trimmed; `Name()` has no arguments. Parentheses
//! do not nest and commas always separate arguments.

use crate::lessml::error::{LessmlError, Result};
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum HeaderToken {
    #[token("(")]
    Open,
    #[token(")")]
    Close,
    #[token(",")]
    Comma,
    #[regex(r"[^(),]+")]
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub arguments: Vec<String>,
}

fn header_tokens(header: &str) -> impl Iterator<Item = (HeaderToken, &str)> {
    let mut lexer = HeaderToken::lexer(header);
    std::iter::from_fn(move || {
        let token = lexer.next()?.ok()?;
        Some((token, lexer.slice()))
    })
}

pub fn parse_header(header: &str) -> Result<Header> {
    let malformed = || LessmlError::MalformedTemplate {
        header: header.to_string(),
    };

    let mut tokens = header_tokens(header);
    let mut next = || tokens.next();

    let name = match next() {
        Some((HeaderToken::Text, text)) if !text.trim().is_empty() => text.trim().to_string(),
        _ => return Err(malformed()),
    };
    if !matches!(next(), Some((HeaderToken::Open, _))) {
        return Err(malformed());
    }

    let mut arguments = Vec::new();
    let mut current: Option<String> = None;
    loop {
        match next() {
            Some((HeaderToken::Text, text)) if current.is_none() => {
                current = Some(text.trim().to_string())
            }
            Some((HeaderToken::Comma, _)) => match current.take() {
                Some(arg) if !arg.is_empty() => arguments.push(arg),
                _ => return Err(malformed()),
            },
            Some((HeaderToken::Close, _)) => {
                match current.take() {
                    Some(arg) if !arg.is_empty() => arguments.push(arg),
                    // `Name()` or `Name( )`
                    Some(_) | None if arguments.is_empty() => {}
                    _ => return Err(malformed()),
                }
                break;
            }
            _ => return Err(malformed()),
        }
    }

    match next() {
        None => {}
        Some((HeaderToken::Text, rest)) if rest.trim().is_empty() => {}
        Some(_) => return Err(malformed()),
    }

    Ok(Header { name, arguments })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_arguments() {
        let header = parse_header("Template Box($W, $H )").unwrap();
        assert_eq!(header.name, "Template Box");
        assert_eq!(header.arguments, vec!["$W", "$H"]);
    }

    #[test]
    fn test_empty_argument_list() {
        assert!(parse_header("Box()").unwrap().arguments.is_empty());
        assert!(parse_header("Box( )").unwrap().arguments.is_empty());
    }

    #[test]
    fn test_malformed_headers() {
        for bad in ["Box", "(1)", "Box(1", "Box(1,)", "Box(1) tail", "Box((1))"] {
            assert!(
                matches!(parse_header(bad), Err(LessmlError::MalformedTemplate { .. })),
                "{bad} should be rejected"
            );
        }
    }
}
