//! Parsing and validation for gostcheck.toml settings files

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gostcheck.toml";

/// Main configuration struct for gostcheck.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Checker metadata
    #[serde(default)]
    pub checker: CheckerSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `gostcheck.toml` from `dir`, or defaults when it does not exist
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "loading settings");
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.checker.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.checker.version
            )));
        }

        if let Some(ruleset) = &self.checker.ruleset
            && ruleset.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "checker.ruleset must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// `[checker]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerSection {
    /// Configuration version (must be "1")
    #[serde(default = "default_version")]
    pub version: String,

    /// Ruleset used by `check` when `--ruleset` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<PathBuf>,
}

fn default_version() -> String {
    "1".to_string()
}

impl Default for CheckerSection {
    fn default() -> Self {
        Self {
            version: default_version(),
            ruleset: None,
        }
    }
}

/// Output configuration section
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
