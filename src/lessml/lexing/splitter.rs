//! Key / operator / value splitting
//!
//!     Turns the fragments of one line into the key, operator and value tokens. Plain
//!     fragments are consumed word by word for the key and the operator; quoted fragments
//!     are always consumed whole.
//!
//!     When the key is plain and ends with a configured operator, the operator is split off
//!     it, so `Width=` and `ui:Control:` need no space before the operator. A quoted key is
//!     never split. Without such a suffix the next word (or quoted fragment) is the
//!     operator, and when the line has nothing left the grammar's default operator is used.
//!     Whatever remains becomes the value.

use crate::lessml::fragment::QuotedFragment;
use crate::lessml::grammar::GrammarConfig;
use crate::lessml::lexing::tokens::Token;

/// Consumes a fragment list one word or quoted fragment at a time
struct FragmentSplitter {
    fragments: std::vec::IntoIter<QuotedFragment>,
    pending: Option<String>,
}

impl FragmentSplitter {
    fn new(fragments: Vec<QuotedFragment>) -> Self {
        FragmentSplitter {
            fragments: fragments.into_iter(),
            pending: None,
        }
    }

    fn next_fragment(&mut self) -> Option<QuotedFragment> {
        let text = match self.pending.take().filter(|p| !p.is_empty()) {
            Some(text) => text,
            None => {
                let fragment = self.fragments.next()?;
                if fragment.is_quoted() {
                    return Some(fragment);
                }
                fragment.snippet
            }
        };

        match text.find(&[' ', '\t'][..]) {
            Some(end) => {
                self.pending = Some(text[end + 1..].trim().to_string());
                Some(QuotedFragment::plain(&text[..end]))
            }
            None => Some(QuotedFragment::plain(text)),
        }
    }

    fn rest(self) -> Vec<QuotedFragment> {
        let mut rest = Vec::new();
        if let Some(pending) = self.pending {
            let pending = pending.trim();
            if !pending.is_empty() {
                rest.push(QuotedFragment::plain(pending));
            }
        }
        rest.extend(self.fragments);
        rest
    }
}

/// Appends the tokens of one line (after its indentation token) to `out`.
///
/// `fragments` must not be empty.
pub fn split_line(fragments: Vec<QuotedFragment>, grammar: &GrammarConfig, out: &mut Vec<Token>) {
    if let [only] = fragments.as_slice() {
        if only.is_quoted() {
            out.push(Token::ElementLiteral(only.clone()));
            return;
        }
    }

    let mut splitter = FragmentSplitter::new(fragments);
    let Some(mut key) = splitter.next_fragment() else {
        return;
    };

    let mut operator = None;
    if !key.is_quoted() {
        if let Some(op) = grammar.operator_suffix_of(&key.snippet) {
            let op = op.to_string();
            key.snippet.truncate(key.snippet.len() - op.len());
            operator = Some(QuotedFragment::plain(op));
        }
    }
    let operator = operator
        .or_else(|| splitter.next_fragment())
        .unwrap_or_else(|| QuotedFragment::plain(grammar.default_operator.as_str()));

    out.push(Token::Key(key));
    out.push(Token::Operator(operator));
    out.push(Token::Value(splitter.rest()));
}
