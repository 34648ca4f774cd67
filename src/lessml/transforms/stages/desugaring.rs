//! XAML desugaring stage
//!
//! Picks the document root, rewrites the XAML shorthands below it and adds the default
//! namespace declarations. Other root-level nodes are left in place for the converter,
//! which keeps remarks as document-level comments and rejects text.

use crate::lessml::error::Result;
use crate::lessml::macros::MacroExpander;
use crate::lessml::transforms::Runnable;
use crate::lessml::tree::Tree;
use crate::lessml::xaml::desugar_document;

pub struct Desugaring {
    expander: MacroExpander,
}

impl Desugaring {
    pub fn new() -> Self {
        Desugaring {
            expander: MacroExpander::new(),
        }
    }

    pub fn with_expander(expander: MacroExpander) -> Self {
        Desugaring { expander }
    }
}

impl Default for Desugaring {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Tree, Tree> for Desugaring {
    fn run(&self, mut tree: Tree) -> Result<Tree> {
        desugar_document(&mut tree, &self.expander)?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::building::build_tree;
    use crate::lessml::grammar::GrammarConfig;
    use crate::lessml::lexing::tokenize;
    use crate::lessml::testing::assert_tree;

    #[test]
    fn test_root_level_nodes_around_the_document_root_stay() {
        let tree = build_tree(
            tokenize("<!-- header -->\nWindow:\n'trailing'\n", &GrammarConfig::xaml()).unwrap(),
        )
        .unwrap();
        let tree = Desugaring::new().run(tree).unwrap();
        assert_tree(&tree)
            .root_count(3)
            .root(1)
            .key("Window")
            .child_keys(&["xmlns", "xmlns:x"]);
        assert_tree(&tree).root(0).remark(" header ");
        assert_tree(&tree).root(2).bare("trailing");
    }
}
