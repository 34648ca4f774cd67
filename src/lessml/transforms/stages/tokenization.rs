//! Tokenization stage
//!
//! Converts source text into the flat token list with the stage's grammar.

use crate::lessml::error::Result;
use crate::lessml::grammar::GrammarConfig;
use crate::lessml::lexing::{tokenize, Token};
use crate::lessml::transforms::Runnable;

pub struct Tokenization {
    grammar: GrammarConfig,
}

impl Tokenization {
    pub fn new(grammar: GrammarConfig) -> Self {
        Tokenization { grammar }
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::new(GrammarConfig::default())
    }
}

impl Runnable<String, Vec<Token>> for Tokenization {
    fn run(&self, input: String) -> Result<Vec<Token>> {
        tokenize(&input, &self.grammar)
    }
}

// Also implement for &str for convenience
impl Runnable<&str, Vec<Token>> for Tokenization {
    fn run(&self, input: &str) -> Result<Vec<Token>> {
        tokenize(input, &self.grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization_uses_its_grammar() {
        let xaml = Tokenization::default().run("A -> B").unwrap();
        assert_eq!(xaml[2], Token::Operator("->".into()));

        // backticks are plain text in XML notation
        let xml = Tokenization::new(GrammarConfig::xml()).run("A: `x`").unwrap();
        assert_eq!(xml.len(), 4);
        assert_eq!(xml[3], Token::Value(vec!["`x`".into()]));
    }

    #[test]
    fn test_empty_source() {
        let stage = Tokenization::default();
        assert!(stage.run(String::new()).unwrap().is_empty());
    }
}
