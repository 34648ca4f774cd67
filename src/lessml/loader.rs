//! Document loading utilities
//!
//!     [DocumentLoader] holds source text read from a file or given as a string and runs
//!     transforms on it. The CLI, the library entry points and the tests all go through it.
//!
//!         let loader = DocumentLoader::from_path("window.lxaml")?;
//!         let xml = loader.translate()?;
//!         let tokens = loader.with(&*TOKENIZATION)?;

use std::fs;
use std::path::Path;

use crate::lessml::error::Result;
use crate::lessml::lexing::Token;
use crate::lessml::transforms::standard::{EXPANSION, PARSING, TOKENIZATION, TRANSLATION};
use crate::lessml::transforms::Transform;
use crate::lessml::tree::Tree;
use crate::lessml::xml::XmlDocument;

/// Source text with transform shortcuts
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Run any transform on the source; all shortcuts go through this
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O> {
        transform.run(self.source.clone())
    }

    pub fn tokenize(&self) -> Result<Vec<Token>> {
        self.with(&TOKENIZATION)
    }

    /// The tree as written, before any macro runs
    pub fn parse(&self) -> Result<Tree> {
        self.with(&PARSING)
    }

    /// The tree after template expansion and desugaring
    pub fn expand(&self) -> Result<Tree> {
        self.with(&EXPANSION)
    }

    pub fn translate(&self) -> Result<XmlDocument> {
        self.with(&TRANSLATION)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessml::error::LessmlError;

    #[test]
    fn test_from_string() {
        let loader = DocumentLoader::from_string("A:\n    B = 1\n");
        assert_eq!(loader.source(), "A:\n    B = 1\n");
        assert_eq!(loader.tokenize().unwrap().len(), 8);
        let tree = loader.parse().unwrap();
        assert_eq!(tree.subtree_len(tree.root()), 3);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            DocumentLoader::from_path("/nonexistent/file.lxaml"),
            Err(LessmlError::Io(_))
        ));
    }

    #[test]
    fn test_translate_from_file() {
        let path = std::env::temp_dir().join("lessml_loader_test.lxaml");
        fs::write(&path, "Grid:\n    Width = 10\n").unwrap();
        let doc = DocumentLoader::from_path(&path).unwrap().translate().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(doc.root().unwrap().name.local, "Grid");
    }
}
