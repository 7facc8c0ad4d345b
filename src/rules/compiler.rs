#![forbid(unsafe_code)]

//! Rule definition compiler
//!
//! Turns an authored definition (already parsed into a JSON value tree) into
//! a validated, indexed `RuntimeRuleset`. The compiler never interprets
//! check arguments; it only checks the envelope every rule must have.
//!
//! Validation runs in this order:
//! 1. Required top-level and `standard` keys
//! 2. `severity_levels` is a non-empty list of known severities
//! 3. `rules` is a non-empty list
//! 4. Every unsupported `check.type` is collected and reported together
//! 5. Each rule is normalized; duplicate ids fail as they are found

use crate::error::{CompileError, UnsupportedCheck};
use crate::rules::definition::load_definition;
use crate::rules::ruleset::{RulesetIndex, RuntimeRule, RuntimeRuleset, Standard};
use crate::types::{Op, Severity};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

const ROOT_KEYS: [&str; 3] = ["standard", "severity_levels", "rules"];
const STANDARD_KEYS: [&str; 5] = ["code", "title", "version", "effective_date", "language"];
const RULE_KEYS: [&str; 5] = ["id", "severity", "title", "scope", "check"];

/// Timestamp layout of `compiled_at`
pub const COMPILED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Compile a definition, stamping it with the current time
pub fn compile(definition: &Value) -> Result<RuntimeRuleset, CompileError> {
    compile_at(definition, Utc::now())
}

/// Compile a definition with an explicit compilation timestamp
///
/// Two calls with the same definition and timestamp produce equal rulesets.
pub fn compile_at(
    definition: &Value,
    compiled_at: DateTime<Utc>,
) -> Result<RuntimeRuleset, CompileError> {
    let root = as_mapping(definition, "root")?;
    for key in ROOT_KEYS {
        require(root, key, "root")?;
    }

    let standard = compile_standard(&root["standard"])?;
    let severity_levels = compile_severity_levels(&root["severity_levels"])?;

    let raw_rules = as_list(&root["rules"], "rules")?;
    if raw_rules.is_empty() {
        return Err(CompileError::Empty("rules"));
    }

    let unsupported = scan_unsupported(raw_rules);
    if !unsupported.is_empty() {
        return Err(CompileError::UnsupportedCheckTypes(unsupported));
    }

    let mut rules = Vec::with_capacity(raw_rules.len());
    let mut index = RulesetIndex::default();
    for (i, raw) in raw_rules.iter().enumerate() {
        let rule = normalize_rule(raw, i)?;
        index
            .push(&rule, rules.len())
            .map_err(CompileError::DuplicateRuleId)?;
        rules.push(rule);
    }

    tracing::info!(
        standard = %standard.code,
        rules = rules.len(),
        "compiled ruleset"
    );

    Ok(RuntimeRuleset::new(
        compiled_at.format(COMPILED_AT_FORMAT).to_string(),
        standard,
        severity_levels,
        rules,
        index,
    ))
}

/// Compile a definition file and write the runtime JSON next to it
///
/// When `output` is `None`, `rules.toml` compiles to `rules.runtime.json`.
/// Nothing is written if compilation fails.
pub fn compile_file(input: &Path, output: Option<&Path>) -> Result<RuntimeRuleset, CompileError> {
    let definition = load_definition(input)?;
    let ruleset = compile(&definition)?;
    let out_path = match output {
        Some(p) => p.to_path_buf(),
        None => default_output_path(input),
    };
    ruleset.save(&out_path)?;
    tracing::info!(path = %out_path.display(), "wrote runtime ruleset");
    Ok(ruleset)
}

/// `a/rules.toml` → `a/rules.runtime.json`
pub fn default_output_path(input: &Path) -> std::path::PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rules");
    input.with_file_name(format!("{}.runtime.json", stem))
}

fn compile_standard(value: &Value) -> Result<Standard, CompileError> {
    let std_map = as_mapping(value, "standard")?;
    for key in STANDARD_KEYS {
        require(std_map, key, "standard")?;
    }

    let extra: BTreeMap<String, Value> = std_map
        .iter()
        .filter(|(k, _)| !STANDARD_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Standard {
        code: value_to_string(&std_map["code"]),
        title: value_to_string(&std_map["title"]),
        version: value_to_string(&std_map["version"]),
        effective_date: value_to_string(&std_map["effective_date"]),
        language: value_to_string(&std_map["language"]),
        extra,
    })
}

fn compile_severity_levels(value: &Value) -> Result<Vec<Severity>, CompileError> {
    let items = as_list(value, "severity_levels")?;
    if items.is_empty() {
        return Err(CompileError::Empty("severity_levels"));
    }
    items
        .iter()
        .map(|item| {
            item.as_str()
                .and_then(Severity::parse)
                .ok_or_else(|| CompileError::InvalidSeverity {
                    location: "severity_levels".to_string(),
                    value: value_to_string(item),
                })
        })
        .collect()
}

/// Collects every rule whose `check.type` is present but not in the table
///
/// Rules without a `check` mapping or without a `type` are left for
/// `normalize_rule`, which reports the missing field precisely.
fn scan_unsupported(rules: &[Value]) -> Vec<UnsupportedCheck> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            let check_type = rule.get("check")?.as_object()?.get("type")?;
            match check_type.as_str() {
                Some(t) if Op::from_check_type(t).is_some() => None,
                Some(t) => Some(UnsupportedCheck {
                    index,
                    check_type: Some(t.to_string()),
                }),
                None => Some(UnsupportedCheck {
                    index,
                    check_type: None,
                }),
            }
        })
        .collect()
}

fn normalize_rule(raw: &Value, i: usize) -> Result<RuntimeRule, CompileError> {
    let ctx = format!("rules[{}]", i);
    let rule = as_mapping(raw, &ctx)?;
    for key in RULE_KEYS {
        require(rule, key, &ctx)?;
    }

    let severity_text = value_to_string(&rule["severity"]).to_uppercase();
    let severity =
        Severity::parse(&severity_text).ok_or_else(|| CompileError::InvalidSeverity {
            location: format!("{}.severity", ctx),
            value: severity_text.clone(),
        })?;

    let check_ctx = format!("{}.check", ctx);
    let check = as_mapping(&rule["check"], &check_ctx)?;
    require(check, "type", &check_ctx)?;
    let check_type = value_to_string(&check["type"]);
    let op = Op::from_check_type(&check_type).ok_or_else(|| {
        CompileError::UnsupportedCheckTypes(vec![UnsupportedCheck {
            index: i,
            check_type: Some(check_type.clone()),
        }])
    })?;

    let args: Map<String, Value> = check
        .iter()
        .filter(|(k, _)| k.as_str() != "type")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    // Optional metadata is carried for traceability only.
    let optional = |key: &str| rule.get(key).cloned();

    Ok(RuntimeRule {
        id: value_to_string(&rule["id"]),
        severity,
        title: value_to_string(&rule["title"]),
        scope: value_to_string(&rule["scope"]),
        op,
        args,
        clause: optional("clause"),
        tags: optional("tags"),
        basis: optional("basis"),
        description: optional("description"),
    })
}

fn require(map: &Map<String, Value>, key: &str, location: &str) -> Result<(), CompileError> {
    if map.contains_key(key) {
        Ok(())
    } else {
        Err(CompileError::MissingField {
            field: key.to_string(),
            location: location.to_string(),
        })
    }
}

fn as_mapping<'a>(value: &'a Value, location: &str) -> Result<&'a Map<String, Value>, CompileError> {
    value.as_object().ok_or_else(|| CompileError::InvalidType {
        location: location.to_string(),
        expected: "mapping",
        found: kind(value),
    })
}

fn as_list<'a>(value: &'a Value, location: &str) -> Result<&'a Vec<Value>, CompileError> {
    value.as_array().ok_or_else(|| CompileError::InvalidType {
        location: location.to_string(),
        expected: "list",
        found: kind(value),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// Scalar text of a value; strings are taken without quotes
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
