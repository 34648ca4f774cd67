//! LessXaml text writer
//!
//!     Writes a tree back as indentation-based text: one line per node, the indentation
//!     string repeated once per level, then `key operator value...`. Bare literal nodes are
//!     written as a single quoted fragment so they tokenize back into literals.
//!
//!     A fragment keeps its own quotation when it has one. A plain fragment is quoted only
//!     when writing it bare would tokenize differently: it is empty, has whitespace at
//!     either end, spans lines, or contains a quotation start delimiter. Keys also get quoted
//!     when they contain whitespace or end with an operator. When a value has several
//!     fragments every plain one is quoted, since adjacent plain text would merge.
//!
//!     The text re-parses (with the same grammar) into a semantically equivalent tree.

use crate::lessml::error::{LessmlError, Result};
use crate::lessml::fragment::QuotedFragment;
use crate::lessml::grammar::{GrammarConfig, QuoteKind, Quotation};
use crate::lessml::tree::{NodeId, Tree};

pub const DEFAULT_INDENT: &str = "    ";

/// Writes trees as LessXaml text for one grammar
#[derive(Debug, Clone)]
pub struct DslWriter<'g> {
    grammar: &'g GrammarConfig,
    indent_string: String,
}

impl<'g> DslWriter<'g> {
    pub fn new(grammar: &'g GrammarConfig) -> Self {
        DslWriter {
            grammar,
            indent_string: DEFAULT_INDENT.to_string(),
        }
    }

    pub fn with_indent(mut self, indent_string: impl Into<String>) -> Self {
        self.indent_string = indent_string.into();
        self
    }

    pub fn write(&self, tree: &Tree) -> Result<String> {
        let mut out = String::new();
        for child in tree.children(tree.root()) {
            self.write_node(tree, *child, 0, &mut out)?;
        }
        Ok(out)
    }

    fn write_node(&self, tree: &Tree, id: NodeId, level: usize, out: &mut String) -> Result<()> {
        let node = tree.node(id);
        let mut parts = Vec::new();

        if node.is_bare_value() {
            for fragment in &node.value {
                parts.push(self.quote(fragment)?);
            }
        } else {
            let key = node.key.as_ref().map_or_else(|| QuotedFragment::plain(""), Clone::clone);
            parts.push(self.write_key(&key)?);
            let operator = node
                .operator
                .as_ref()
                .map_or_else(|| QuotedFragment::plain(""), Clone::clone);
            parts.push(self.write_operator(&operator)?);
            let several = node.value.len() > 1;
            for fragment in &node.value {
                parts.push(self.write_value(fragment, several)?);
            }
        }

        out.push_str(&self.indent_string.repeat(level));
        out.push_str(&parts.join(" "));
        out.push('\n');

        for child in tree.children(id) {
            self.write_node(tree, *child, level + 1, out)?;
        }
        Ok(())
    }

    fn write_key(&self, key: &QuotedFragment) -> Result<String> {
        let bare = !key.is_quoted()
            && self.can_be_plain(&key.snippet)
            && !key.snippet.contains(char::is_whitespace)
            && self.grammar.operator_suffix_of(&key.snippet).is_none();
        if bare {
            Ok(key.snippet.clone())
        } else {
            self.quote(key)
        }
    }

    fn write_operator(&self, operator: &QuotedFragment) -> Result<String> {
        let bare = !operator.is_quoted()
            && self.can_be_plain(&operator.snippet)
            && !operator.snippet.contains(char::is_whitespace);
        if bare {
            Ok(operator.snippet.clone())
        } else {
            self.quote(operator)
        }
    }

    fn write_value(&self, value: &QuotedFragment, several: bool) -> Result<String> {
        if !value.is_quoted() && !several && self.can_be_plain(&value.snippet) {
            Ok(value.snippet.clone())
        } else {
            self.quote(value)
        }
    }

    /// Whether `text` survives scanning as one plain fragment
    fn can_be_plain(&self, text: &str) -> bool {
        !text.is_empty()
            && text.trim() == text
            && !text.contains('\n')
            && !self
                .grammar
                .quotations
                .iter()
                .any(|q| !q.start.is_empty() && text.contains(q.start.as_str()))
    }

    /// Writes `fragment` inside a quotation: its own if it can hold the text, otherwise
    /// the first string quotation of the grammar that can.
    fn quote(&self, fragment: &QuotedFragment) -> Result<String> {
        if let Some(own) = &fragment.quotation {
            if own.kind != QuoteKind::Comment && self.holds(own, &fragment.snippet) {
                return Ok(fragment.to_string());
            }
        }
        self.grammar
            .quotations
            .iter()
            .filter(|q| q.kind == QuoteKind::String)
            .find(|q| self.holds(q, &fragment.snippet))
            .map(|q| QuotedFragment::quoted(fragment.snippet.as_str(), q.clone()).to_string())
            .ok_or_else(|| {
                LessmlError::StructuralViolation(format!(
                    "no quotation can hold {:?}",
                    fragment.snippet
                ))
            })
    }

    fn holds(&self, quotation: &Quotation, text: &str) -> bool {
        match &quotation.end {
            Some(end) => {
                !end.is_empty()
                    && !text.contains(end.as_str())
                    && quotation.escaping.unescape(text) == text
            }
            None => !text.contains('\n'),
        }
    }
}

/// Writes `tree` with the default XAML grammar
pub fn to_dsl_text(tree: &Tree, indent_string: &str) -> Result<String> {
    let grammar = GrammarConfig::xaml();
    DslWriter::new(&grammar).with_indent(indent_string).write(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::building::build_tree;
    use crate::lessml::lexing::tokenize;
    use crate::lessml::tree::Node;

    fn reparse(text: &str) -> Tree {
        build_tree(tokenize(text, &GrammarConfig::xaml()).unwrap()).unwrap()
    }

    #[test]
    fn test_lines_and_indentation() {
        let source = "Grid:\n    Width = 100\n    Button: Click me\n        'literal'\n";
        let text = to_dsl_text(&reparse(source), DEFAULT_INDENT).unwrap();
        assert_eq!(
            text,
            "Grid :\n    Width = 100\n    Button : Click me\n        'literal'\n"
        );
    }

    #[test]
    fn test_plain_text_that_needs_quotes() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.append(root, Node::new("A", ":"));
        tree.append(a, Node::new("B", "=").with_value(" padded "));
        tree.append(a, Node::new("C", "=").with_value("it's"));
        tree.append(a, Node::bare(QuotedFragment::plain("text")));
        tree.append(a, Node::new("key:", "="));

        let text = to_dsl_text(&tree, "  ").unwrap();
        assert_eq!(
            text,
            "A :\n  B = ' padded '\n  C = \"it's\"\n  'text'\n  'key:' =\n"
        );
        assert!(reparse(&text).equivalent_to(&tree));
    }

    #[test]
    fn test_remarks_and_templates_keep_their_quotation() {
        let source = "A:\n    <!-- note -->\n    `Box(1)`\n";
        let tree = reparse(source);
        let text = to_dsl_text(&tree, DEFAULT_INDENT).unwrap();
        assert_eq!(text, "A :\n    <!-- note -->\n    `Box(1)`\n");
    }

    #[test]
    fn test_unquotable_text_fails() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.append(root, Node::bare(QuotedFragment::plain("both ' and \"")));
        assert!(matches!(
            to_dsl_text(&tree, DEFAULT_INDENT),
            Err(LessmlError::StructuralViolation(_))
        ));
    }
}
