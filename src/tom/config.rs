//! Configuration loader
//!
//! `defaults/tom.default.toml` is embedded into the crate so the documented defaults and the
//! runtime defaults cannot drift apart. Applications layer their own files and key overrides on
//! top via [`Loader`], then turn the result into the two [`ParserConfig`]s.

use crate::tom::ast::TagName;
use crate::tom::limits::Limits;
use crate::tom::parsing::ParserConfig;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/tom.default.toml");

/// Top-level configuration of the engine
#[derive(Debug, Clone, Deserialize)]
pub struct TomConfig {
    pub limits: LimitsConfig,
    pub modes: ModesConfig,
}

/// Resource ceilings, see [`Limits`]
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitsConfig {
    pub max_input_length: usize,
    pub max_tokens: usize,
    pub max_stack_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModesConfig {
    pub write: ModeConfig,
    pub read: ModeConfig,
}

/// Per-mode tag table
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    pub self_closing: Vec<TagName>,
}

impl From<LimitsConfig> for Limits {
    fn from(config: LimitsConfig) -> Self {
        Limits {
            max_input_length: config.max_input_length,
            max_tokens: config.max_tokens,
            max_stack_depth: config.max_stack_depth,
        }
    }
}

impl TomConfig {
    fn mode(&self, mode: &ModeConfig) -> ParserConfig {
        ParserConfig::with_self_closing(mode.self_closing.iter().copied())
            .with_limits(self.limits.into())
    }

    /// Configuration for fresh submissions
    pub fn write_config(&self) -> ParserConfig {
        self.mode(&self.modes.write)
    }

    /// Configuration for persisted text
    pub fn read_config(&self) -> ParserConfig {
        self.mode(&self.modes.read)
    }
}

/// Layers user overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults
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

    /// Layer a configuration file that may be absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (e.g. `limits.max_tokens`)
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TomConfig, ConfigError> {
        let config: TomConfig = self.builder.build()?.try_deserialize()?;
        log::debug!(target: "tom.config", "loaded configuration: {:?}", config.limits);
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<TomConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_builtin_modes() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.write_config(), ParserConfig::write());
        assert_eq!(config.read_config(), ParserConfig::read());
    }

    #[test]
    fn test_override_limits() {
        let config = Loader::new()
            .set_override("limits.max_stack_depth", 10_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.read_config().limits.max_stack_depth, 10);
        assert_eq!(config.read_config().limits.max_tokens, 50_000);
    }

    #[test]
    fn test_user_file_replaces_mode_table() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[modes.read]\nself_closing = [\"hr\"]").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let read = config.read_config();
        assert!(read.is_self_closing(TagName::Hr));
        assert!(!read.is_self_closing(TagName::Youtube));
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/tom.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.limits.max_input_length, 100_000);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result = Loader::new()
            .set_override("modes.read.self_closing", vec!["blink"])
            .and_then(Loader::build);
        assert!(result.is_err());
    }
}
