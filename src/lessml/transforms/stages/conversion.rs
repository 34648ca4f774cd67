//! XML conversion stage

use crate::lessml::error::Result;
use crate::lessml::transforms::Runnable;
use crate::lessml::tree::Tree;
use crate::lessml::xml::{to_xml, XmlDocument};

/// Converts the (desugared) tree into an XML document
pub struct XmlConversion;

impl XmlConversion {
    pub fn new() -> Self {
        XmlConversion
    }
}

impl Default for XmlConversion {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Tree, XmlDocument> for XmlConversion {
    fn run(&self, input: Tree) -> Result<XmlDocument> {
        to_xml(&input)
    }
}
