#![forbid(unsafe_code)]

//! Loading authored rule definition files
//!
//! Definitions are human-edited TOML (or JSON) documents. Both are converted
//! into one `serde_json::Value` tree so the compiler validates a single
//! representation.

use crate::error::CompileError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Reads a definition file, choosing the parser by extension
///
/// `.json` files are parsed as JSON; everything else as TOML.
///
/// # Errors
///
/// Returns `CompileError::Io` if the file cannot be read and
/// `CompileError::InvalidSyntax` if it does not parse.
pub fn load_definition(path: &Path) -> Result<Value, CompileError> {
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_definition(&content),
        _ => parse_toml_definition(&content),
    }
}

/// Parses a TOML definition into a JSON value tree
pub fn parse_toml_definition(content: &str) -> Result<Value, CompileError> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| CompileError::InvalidSyntax(e.to_string()))?;
    Ok(toml_to_json(toml::Value::Table(table)))
}

/// Parses a JSON definition
pub fn parse_json_definition(content: &str) -> Result<Value, CompileError> {
    serde_json::from_str(content).map_err(|e| CompileError::InvalidSyntax(e.to_string()))
}

/// Converts a TOML value into JSON
///
/// Datetimes become their RFC 3339 text, and non-finite floats become null.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}
