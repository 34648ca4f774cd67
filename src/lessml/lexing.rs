//! Lexing
//!
//!     The lexer is line oriented. For every non-blank line it runs three steps:
//!
//!         1. [indenter]: strip the leading whitespace and compute the indentation level.
//!         2. [quote_scanner]: split the rest into plain and quoted fragments, pulling more
//!            lines when a quotation spans them, and drop comments.
//!         3. [splitter]: turn the fragments into key, operator and value tokens.
//!
//!     Blank lines never reach the indenter, so they do not affect the indentation stack.
//!     A line that only held a comment still does: the indenter sees it before the scanner
//!     drops its content. Such a line produces no tokens.
//!
//!     The output is a flat token list; [crate::lessml::building] turns it into a tree.

pub mod indenter;
pub mod lines;
pub mod quote_scanner;
pub mod splitter;
pub mod tokens;

pub use tokens::Token;

use crate::lessml::error::Result;
use crate::lessml::grammar::GrammarConfig;
use indenter::Indenter;
use lines::LineSource;
use quote_scanner::QuoteScanner;

/// Tokenize a whole source text with the given grammar
pub fn tokenize(source: &str, grammar: &GrammarConfig) -> Result<Vec<Token>> {
    let mut lines = LineSource::new(source);
    let mut indenter = Indenter::new();
    let scanner = QuoteScanner::new(&grammar.quotations);
    let mut tokens = Vec::new();

    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }
        let (level, rest) = indenter.unindent(line, lines.line_number())?;
        let fragments = scanner.scan(rest, &mut lines)?;
        if fragments.is_empty() {
            continue;
        }
        tokens.push(Token::Indentation(level));
        splitter::split_line(fragments, grammar, &mut tokens);
    }

    tracing::debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}
