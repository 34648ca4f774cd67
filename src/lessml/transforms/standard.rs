//! Standard transform definitions
//!
//!     Pre-built pipelines over the default XAML grammar, as `Lazy` statics, plus builder
//!     functions that take their grammar and expansion limit from a [LessmlConfig].

use once_cell::sync::Lazy;

use crate::lessml::config::LessmlConfig;
use crate::lessml::lexing::Token;
use crate::lessml::transforms::stages::{
    Desugaring, TemplateExpansion, Tokenization, TreeBuilding, XmlConversion,
};
use crate::lessml::transforms::Transform;
use crate::lessml::tree::Tree;
use crate::lessml::xml::XmlDocument;

pub type TokenizationTransform = Transform<String, Vec<Token>>;
pub type TreeTransform = Transform<String, Tree>;
pub type TranslationTransform = Transform<String, XmlDocument>;

/// String → tokens
pub static TOKENIZATION: Lazy<TokenizationTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::default()));

/// String → tree, exactly as written (no macros run)
pub static PARSING: Lazy<TreeTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&TOKENIZATION).then(TreeBuilding::new()));

/// String → tree with templates expanded and XAML shorthands rewritten
pub static EXPANSION: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&PARSING)
        .then(TemplateExpansion::new())
        .then(Desugaring::new())
});

/// String → XML document
pub static TRANSLATION: Lazy<TranslationTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&EXPANSION).then(XmlConversion::new()));

pub fn tokenization(config: &LessmlConfig) -> TokenizationTransform {
    Transform::from_fn(Ok).then(Tokenization::new(config.grammar.clone()))
}

pub fn parsing(config: &LessmlConfig) -> TreeTransform {
    tokenization(config).then(TreeBuilding::new())
}

pub fn expansion(config: &LessmlConfig) -> TreeTransform {
    let expander = config.expansion.expander();
    parsing(config)
        .then(TemplateExpansion::for_grammar(&config.grammar).with_expander(expander))
        .then(Desugaring::with_expander(expander))
}

pub fn translation(config: &LessmlConfig) -> TranslationTransform {
    expansion(config).then(XmlConversion::new())
}
