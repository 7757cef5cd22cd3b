//! Configuration loader for journey2dayone.
//!
//! `defaults/journey.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. The CLI layers a local
//! `journey.toml`, an explicit `--config` file and command line options on top
//! via [`Loader`] before deserializing into [`JourneyConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use journey_babel::{CompoundSplit, Converter, NameEntry, NameTable, PhraseTable, TableError};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/journey.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyConfig {
    pub convert: ConvertConfig,
    pub import: ImportConfig,
}

/// Correction tables for the conversion engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    #[serde(default)]
    pub names: Vec<NameEntry>,
    #[serde(default)]
    pub phrases: Vec<CompoundSplit>,
}

impl ConvertConfig {
    /// Validates the tables and builds a converter from them.
    pub fn converter(&self) -> Result<Converter, TableError> {
        let names = NameTable::new(self.names.clone())?;
        let phrases = PhraseTable::new(self.phrases.clone())?;
        Ok(Converter::new(names, phrases))
    }
}

impl TryFrom<&ConvertConfig> for Converter {
    type Error = TableError;

    fn try_from(config: &ConvertConfig) -> Result<Self, Self::Error> {
        config.converter()
    }
}

/// How entries are handed to Day One.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub command: String,
    pub timestamp_format: String,
    #[serde(default)]
    pub fallback_timezone: Option<String>,
    pub skip_marker: String,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, such as `import.command`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<JourneyConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<JourneyConfig, ConfigError> {
    Loader::new().build()
}
