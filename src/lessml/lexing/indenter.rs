//! Indentation tracking
//!
//!     The indenter keeps a stack of the whitespace prefixes seen so far, starting with the
//!     empty prefix. A longer prefix opens one level, a shorter one closes levels until a
//!     prefix of the same length is found. Landing between two levels is an error.
//!
//!     The first whitespace character of the document fixes the indentation character: a
//!     document indented with tabs may not use spaces as leading whitespace anywhere, and
//!     the other way round.

use crate::lessml::error::{LessmlError, Result};

pub struct Indenter {
    prefixes: Vec<String>,
    uniform: Option<char>,
}

impl Indenter {
    pub fn new() -> Self {
        Indenter {
            prefixes: vec![String::new()],
            uniform: None,
        }
    }

    /// Strips the leading whitespace of `line` and returns it together with the line's
    /// indentation level.
    pub fn unindent<'l>(&mut self, line: &'l str, line_number: usize) -> Result<(usize, &'l str)> {
        let mut content_start = line.len();
        for (idx, c) in line.char_indices() {
            if !c.is_whitespace() {
                content_start = idx;
                break;
            }
            match self.uniform {
                None => self.uniform = Some(c),
                Some(u) if u != c => {
                    return Err(LessmlError::MixedIndentation { line: line_number })
                }
                Some(_) => {}
            }
        }

        let prefix = &line[..content_start];
        let top_len = self.top().len();
        if top_len < prefix.len() {
            self.prefixes.push(prefix.to_string());
        } else {
            while self.top().len() > prefix.len() {
                self.prefixes.pop();
            }
            if self.top().len() != prefix.len() {
                return Err(LessmlError::InvalidIndentation { line: line_number });
            }
        }

        Ok((self.prefixes.len() - 1, &line[content_start..]))
    }

    fn top(&self) -> &str {
        // The empty prefix is never popped: nothing is shorter than it.
        self.prefixes.last().map(String::as_str).unwrap_or("")
    }
}

impl Default for Indenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(lines: &[&str]) -> Result<Vec<usize>> {
        let mut indenter = Indenter::new();
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| indenter.unindent(l, i + 1).map(|(level, _)| level))
            .collect()
    }

    #[test]
    fn test_push_and_pop_levels() {
        assert_eq!(
            levels(&["A", "\tB", "\t\tC", "\tD", "E"]).unwrap(),
            vec![0, 1, 2, 1, 0]
        );
    }

    #[test]
    fn test_any_prefix_width_is_one_level() {
        assert_eq!(
            levels(&["A", "   B", "         C", "   D"]).unwrap(),
            vec![0, 1, 2, 1]
        );
    }

    #[test]
    fn test_remainder_is_returned() {
        let mut indenter = Indenter::new();
        assert_eq!(indenter.unindent("  key = v ", 1).unwrap(), (1, "key = v "));
    }

    #[test]
    fn test_mixed_whitespace_fails() {
        let err = levels(&["A", "\tB", "    C"]).unwrap_err();
        assert!(matches!(err, LessmlError::MixedIndentation { line: 3 }));
    }

    #[test]
    fn test_unindent_between_levels_fails() {
        let err = levels(&["A", "    B", "        C", "  D"]).unwrap_err();
        assert!(matches!(err, LessmlError::InvalidIndentation { line: 4 }));
    }
}
