#![forbid(unsafe_code)]

//! Typed access to a rule's verbatim `args`
//!
//! The compiler passes check parameters through untouched, so every check
//! reads them through these helpers. Absent and null are the same thing.

use crate::error::EvalError;
use crate::rules::RuntimeRule;
use serde_json::Value;

/// A finite numeric argument; numeric strings are accepted
///
/// # Errors
///
/// Returns `EvalError::InvalidArgument` if the value is present but not a
/// finite number (`"NaN"` and `"inf"` are rejected).
pub fn number(rule: &RuntimeRule, name: &str) -> Result<Option<f64>, EvalError> {
    let Some(value) = rule.arg(name) else {
        return Ok(None);
    };
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| EvalError::invalid_argument(name, "number out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| EvalError::invalid_argument(name, format!("'{}' is not a number", s))),
        other => Err(EvalError::invalid_argument(
            name,
            format!("expected a number, got {}", other),
        )),
    }
}

/// Like [`number`], but an unusable value counts as absent
pub fn lenient_number(rule: &RuntimeRule, name: &str) -> Option<f64> {
    number(rule, name).ok().flatten()
}

/// An integer argument with a default; floats are truncated
pub fn integer(rule: &RuntimeRule, name: &str, default: i64) -> Result<i64, EvalError> {
    let Some(value) = rule.arg(name) else {
        return Ok(default);
    };
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| EvalError::invalid_argument(name, "number out of range")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| EvalError::invalid_argument(name, format!("'{}' is not an integer", s))),
        other => Err(EvalError::invalid_argument(
            name,
            format!("expected an integer, got {}", other),
        )),
    }
}

/// A boolean switch; anything non-empty and non-zero is on
pub fn flag(rule: &RuntimeRule, name: &str) -> bool {
    match rule.arg(name) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// A list of strings; scalar items are stringified and nulls dropped
pub fn string_list(rule: &RuntimeRule, name: &str) -> Result<Vec<String>, EvalError> {
    match rule.arg(name) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect()),
        Some(other) => Err(EvalError::invalid_argument(
            name,
            format!("expected a list, got {}", other),
        )),
    }
}
