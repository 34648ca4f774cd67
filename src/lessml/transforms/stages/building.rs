//! Tree building stage

use crate::lessml::building::build_tree;
use crate::lessml::error::Result;
use crate::lessml::lexing::Token;
use crate::lessml::transforms::Runnable;
use crate::lessml::tree::Tree;

/// Turns the token list into the node tree
pub struct TreeBuilding;

impl TreeBuilding {
    pub fn new() -> Self {
        TreeBuilding
    }
}

impl Default for TreeBuilding {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Token>, Tree> for TreeBuilding {
    fn run(&self, input: Vec<Token>) -> Result<Tree> {
        build_tree(input)
    }
}
