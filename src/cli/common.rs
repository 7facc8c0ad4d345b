//! Common helper functions shared across CLI commands

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{ColorOption, Config, OutputFormat as ConfigFormat};
use crate::error::{CheckerError, ConfigError, RulesetError};
use crate::rules::{RuntimeRuleset, compile, load_definition};
use serde_json::Value;
use std::fs;
use std::io::IsTerminal;
use std::path::Path;

pub const EXIT_SUCCESS: i32 = 0;
/// At least one HIGH finding
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
/// Invalid definition or settings file
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load gostcheck.toml from the working directory, if present
pub(crate) fn load_config() -> Result<Config, ConfigError> {
    Config::discover(".")
}

/// Load the ruleset `check` runs
///
/// A file carrying `runtime_format` is a compiled ruleset; any other JSON
/// or TOML file is treated as a definition and compiled in memory.
pub(crate) fn load_ruleset(path: &Path) -> Result<RuntimeRuleset, CheckerError> {
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    if !is_json {
        return Ok(compile(&load_definition(path)?)?);
    }

    let content = fs::read_to_string(path)?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| RulesetError::Invalid(e.to_string()))?;
    if value.get("runtime_format").is_some() {
        Ok(RuntimeRuleset::from_json(&content)?)
    } else {
        tracing::debug!(path = %path.display(), "compiling definition in memory");
        Ok(compile(&value)?)
    }
}

/// CLI flag wins over the settings file
pub(crate) fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or(match config.output.format {
        ConfigFormat::Human => OutputFormat::Human,
        ConfigFormat::Jsonl => OutputFormat::Jsonl,
    })
}

/// CLI flag wins over the settings file; `auto` requires a terminal
pub(crate) fn resolve_color(flag: Option<ColorChoice>, config: &Config) -> termcolor::ColorChoice {
    let choice = flag.unwrap_or(match config.output.color {
        ColorOption::Auto => ColorChoice::Auto,
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
    });
    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}
