//! Template expansion stage
//!
//! Runs the template macro over every root-level node. A fresh [TemplateMacro] is used
//! for each run, so definitions never leak from one document into the next.
//!
//! Template headers are recognised by the grammar's template quotation. A grammar without
//! one has no templates, and the stage passes the tree through unchanged.

use crate::lessml::error::Result;
use crate::lessml::grammar::{GrammarConfig, Quotation};
use crate::lessml::macros::{MacroExpander, TemplateMacro};
use crate::lessml::transforms::Runnable;
use crate::lessml::tree::Tree;

pub struct TemplateExpansion {
    quotation: Option<Quotation>,
    expander: MacroExpander,
}

impl TemplateExpansion {
    pub fn new() -> Self {
        Self::for_grammar(&GrammarConfig::xaml())
    }

    /// Recognise headers written with the template quotation of `grammar`
    pub fn for_grammar(grammar: &GrammarConfig) -> Self {
        TemplateExpansion {
            quotation: grammar.template_quotation().cloned(),
            expander: MacroExpander::new(),
        }
    }

    pub fn with_expander(mut self, expander: MacroExpander) -> Self {
        self.expander = expander;
        self
    }
}

impl Default for TemplateExpansion {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Tree, Tree> for TemplateExpansion {
    fn run(&self, mut tree: Tree) -> Result<Tree> {
        let Some(quotation) = &self.quotation else {
            tracing::debug!("grammar has no template quotation, skipping templates");
            return Ok(tree);
        };
        let mut templates =
            TemplateMacro::with_quotation(quotation.clone()).with_expander(self.expander);
        self.expander.expand_tree(&mut tree, &mut templates)?;
        tracing::debug!(nodes = tree.subtree_len(tree.root()) - 1, "expanded templates");
        Ok(tree)
    }
}
