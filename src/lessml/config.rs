//! Layered configuration
//!
//!     `defaults/lessml.default.toml` is embedded into the crate, so the defaults documented
//!     there are the ones the binary runs with. Callers layer their own files and single-key
//!     overrides on top with [Loader] before deserializing into [LessmlConfig].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;

use crate::lessml::grammar::GrammarConfig;
use crate::lessml::macros::MacroExpander;

const DEFAULT_TOML: &str = include_str!("../../defaults/lessml.default.toml");

/// Top-level configuration consumed by the pipeline and the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct LessmlConfig {
    pub grammar: GrammarConfig,
    pub expansion: ExpansionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    pub max_reapply: usize,
}

impl ExpansionConfig {
    pub fn expander(&self) -> MacroExpander {
        MacroExpander::with_max_reapply(self.max_reapply)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub indent_string: String,
    pub pretty: bool,
    pub xml_indent: usize,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `output.pretty` from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LessmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<LessmlConfig, ConfigError> {
    Loader::new().build()
}
