//! Quote scanning
//!
//!     Splits one line into fragments: runs of plain text and quoted spans. At every step
//!     the scanner looks for the earliest start delimiter of any configured quotation (ties
//!     go to the quotation listed first). Text before it becomes a plain fragment, trimmed.
//!
//!     A quotation without an end delimiter runs to the end of the line. Otherwise the
//!     scanner searches for the end delimiter, pulling further lines from the source and
//!     joining them with a newline until it is found. The collected content goes through the
//!     quotation's unescaping.
//!
//!     Comment fragments are dropped before the fragments are returned.

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::fragment::QuotedFragment;
use crate::lessml::grammar::{QuoteKind, Quotation};
use crate::lessml::lexing::lines::LineSource;

pub struct QuoteScanner<'g> {
    quotations: &'g [Quotation],
}

impl<'g> QuoteScanner<'g> {
    pub fn new(quotations: &'g [Quotation]) -> Self {
        QuoteScanner { quotations }
    }

    /// Scans `line`, which must be the line most recently pulled from `source`.
    pub fn scan<'a>(
        &self,
        line: &'a str,
        source: &mut LineSource<'a>,
    ) -> Result<Vec<QuotedFragment>> {
        let opened_at = source.line_number();
        let mut fragments = Vec::new();
        let mut rest = line;

        loop {
            let Some((pos, quotation)) = self.earliest_quotation(rest) else {
                let tail = rest.trim();
                if !tail.is_empty() {
                    fragments.push(QuotedFragment::plain(tail));
                }
                break;
            };

            let prefix = rest[..pos].trim();
            if !prefix.is_empty() {
                fragments.push(QuotedFragment::plain(prefix));
            }

            let mut current = &rest[pos + quotation.start.len()..];
            let content = match &quotation.end {
                None => {
                    rest = "";
                    current.to_string()
                }
                Some(end) => {
                    let mut content = String::new();
                    loop {
                        if let Some(end_pos) = current.find(end.as_str()) {
                            content.push_str(&current[..end_pos]);
                            rest = &current[end_pos + end.len()..];
                            break;
                        }
                        content.push_str(current);
                        content.push('\n');
                        current = source.next().ok_or_else(|| LessmlError::UnterminatedQuote {
                            line: opened_at,
                            delimiter: end.clone(),
                        })?;
                    }
                    content
                }
            };

            fragments.push(QuotedFragment::quoted(
                quotation.escaping.unescape(&content),
                quotation.clone(),
            ));
        }

        fragments.retain(|f| f.kind() != Some(QuoteKind::Comment));
        Ok(fragments)
    }

    fn earliest_quotation(&self, text: &str) -> Option<(usize, &'g Quotation)> {
        self.quotations
            .iter()
            .enumerate()
            .filter(|(_, q)| !q.start.is_empty())
            .filter_map(|(order, q)| text.find(q.start.as_str()).map(|pos| (pos, order, q)))
            .min_by_key(|(pos, order, _)| (*pos, *order))
            .map(|(pos, _, q)| (pos, q))
    }
}
