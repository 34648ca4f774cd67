//! Pull-based line source
//!
//! The tokenizer and the quote scanner share one of these so that a quotation spanning
//! several lines can consume the lines it needs, and the tokenizer continues after them.

/// Iterates the lines of a source text, remembering the 1-based number of the last line
/// handed out.
pub struct LineSource<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> LineSource<'a> {
    pub fn new(source: &'a str) -> Self {
        LineSource {
            lines: source.lines(),
            number: 0,
        }
    }

    /// Number of the most recently returned line (0 before the first call)
    pub fn line_number(&self) -> usize {
        self.number
    }
}

impl<'a> Iterator for LineSource<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.number += 1;
        Some(line)
    }
}
