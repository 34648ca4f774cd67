//! Quoted fragments
//!
//!     A fragment is a snippet of text plus the quotation it was written in, if any. Keys,
//!     operators and values of tree nodes are all fragments, so the quoting survives into
//!     the tree where later stages (templates, comments) depend on it.

use crate::lessml::grammar::{QuoteKind, Quotation};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotedFragment {
    pub snippet: String,
    pub quotation: Option<Quotation>,
}

impl QuotedFragment {
    /// An unquoted fragment
    pub fn plain<S: Into<String>>(snippet: S) -> Self {
        QuotedFragment {
            snippet: snippet.into(),
            quotation: None,
        }
    }

    pub fn quoted<S: Into<String>>(snippet: S, quotation: Quotation) -> Self {
        QuotedFragment {
            snippet: snippet.into(),
            quotation: Some(quotation),
        }
    }

    pub fn is_quoted(&self) -> bool {
        self.quotation.is_some()
    }

    pub fn kind(&self) -> Option<QuoteKind> {
        self.quotation.as_ref().map(|q| q.kind)
    }

    pub fn is_quoted_with(&self, quotation: &Quotation) -> bool {
        self.quotation.as_ref() == Some(quotation)
    }

    /// Equal snippets, and neither side quoted with a comment or remark quotation.
    ///
    /// Which delimiter was used does not matter.
    pub fn is_semantically_equivalent(&self, other: &QuotedFragment) -> bool {
        let stringish = |f: &QuotedFragment| {
            matches!(
                f.kind(),
                None | Some(QuoteKind::String | QuoteKind::Template)
            )
        };
        self.snippet == other.snippet && stringish(self) && stringish(other)
    }
}

/// Equivalence lifted over optional fragments: both absent, or both present and equivalent
pub fn equivalent_options(a: Option<&QuotedFragment>, b: Option<&QuotedFragment>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.is_semantically_equivalent(b),
        _ => false,
    }
}

impl From<&str> for QuotedFragment {
    fn from(s: &str) -> Self {
        QuotedFragment::plain(s)
    }
}

impl From<String> for QuotedFragment {
    fn from(s: String) -> Self {
        QuotedFragment::plain(s)
    }
}

impl fmt::Display for QuotedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quotation {
            Some(q) => write!(
                f,
                "{}{}{}",
                q.start,
                self.snippet,
                q.end.as_deref().unwrap_or("")
            ),
            None => write!(f, "{}", self.snippet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotation_style_is_irrelevant_to_equivalence() {
        let single = QuotedFragment::quoted("x", Quotation::single_quotes());
        let double = QuotedFragment::quoted("x", Quotation::double_quotes());
        let plain = QuotedFragment::plain("x");
        assert!(single.is_semantically_equivalent(&double));
        assert!(single.is_semantically_equivalent(&plain));
        assert_ne!(single, double);
    }

    #[test]
    fn test_remarks_are_never_equivalent() {
        let remark = QuotedFragment::quoted("x", Quotation::remark());
        assert!(!remark.is_semantically_equivalent(&QuotedFragment::plain("x")));
        assert!(!remark.is_semantically_equivalent(&remark.clone()));
    }

    #[test]
    fn test_display_restores_delimiters() {
        let f = QuotedFragment::quoted("Box(1, 2)", Quotation::template());
        assert_eq!(f.to_string(), "`Box(1, 2)`");
        let f = QuotedFragment::quoted(" trailing", Quotation::line_comment());
        assert_eq!(f.to_string(), "# trailing");
    }
}
