#![forbid(unsafe_code)]

//! Compiled runtime ruleset
//!
//! A `RuntimeRuleset` is the only form of the rules the engine consumes. It
//! is produced by the compiler, serialized to JSON, and loaded back with its
//! indices re-verified against the rule list.

use crate::error::RulesetError;
use crate::types::{Op, Severity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Discriminator written into every compiled ruleset
pub const RUNTIME_FORMAT: &str = "GOST_RUNTIME_RULESET";

/// Layout version of the compiled ruleset
pub const RUNTIME_VERSION: &str = "1.0";

/// Metadata of the standard a ruleset implements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standard {
    pub code: String,
    pub title: String,
    pub version: String,
    pub effective_date: String,
    pub language: String,

    /// Any further keys from the definition, preserved as authored
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A compiled rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeRule {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub scope: String,
    pub op: Op,

    /// Every `check` parameter except `type`, verbatim
    #[serde(default)]
    pub args: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl RuntimeRule {
    /// Looks up a raw argument, treating JSON null as absent
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name).filter(|v| !v.is_null())
    }

    /// The clause reference as display text
    pub fn clause_text(&self) -> Option<String> {
        match self.clause.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Lookup indices derived from the rule list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetIndex {
    pub by_id: BTreeMap<String, usize>,
    pub by_op: BTreeMap<Op, Vec<String>>,
    pub by_scope: BTreeMap<String, Vec<String>>,
}

impl RulesetIndex {
    /// Builds all three indices from an ordered rule list
    ///
    /// Returns the offending id if two rules share one.
    pub fn build(rules: &[RuntimeRule]) -> Result<Self, String> {
        let mut index = RulesetIndex::default();
        for (position, rule) in rules.iter().enumerate() {
            index.push(rule, position)?;
        }
        Ok(index)
    }

    /// Adds one rule at `position`, rejecting duplicate ids
    pub(crate) fn push(&mut self, rule: &RuntimeRule, position: usize) -> Result<(), String> {
        if self.by_id.contains_key(&rule.id) {
            return Err(rule.id.clone());
        }
        self.by_id.insert(rule.id.clone(), position);
        self.by_op.entry(rule.op).or_default().push(rule.id.clone());
        self.by_scope
            .entry(rule.scope.clone())
            .or_default()
            .push(rule.id.clone());
        Ok(())
    }
}

/// The compiled, indexed, immutable ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeRuleset {
    runtime_format: String,
    runtime_version: String,
    compiled_at: String,
    standard: Standard,
    severity_levels: Vec<Severity>,
    rules: Vec<RuntimeRule>,
    index: RulesetIndex,
}

impl RuntimeRuleset {
    pub(crate) fn new(
        compiled_at: String,
        standard: Standard,
        severity_levels: Vec<Severity>,
        rules: Vec<RuntimeRule>,
        index: RulesetIndex,
    ) -> Self {
        Self {
            runtime_format: RUNTIME_FORMAT.to_string(),
            runtime_version: RUNTIME_VERSION.to_string(),
            compiled_at,
            standard,
            severity_levels,
            rules,
            index,
        }
    }

    /// Load a compiled ruleset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesetError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a compiled ruleset from JSON text
    ///
    /// The format discriminator is checked before the full layout, and the
    /// stored index must agree with one rebuilt from the rule list.
    pub fn from_json(content: &str) -> Result<Self, RulesetError> {
        let raw: Value =
            serde_json::from_str(content).map_err(|e| RulesetError::Invalid(e.to_string()))?;
        let Value::Object(root) = &raw else {
            return Err(RulesetError::Invalid("root must be an object".to_string()));
        };

        match root.get("runtime_format").and_then(Value::as_str) {
            Some(RUNTIME_FORMAT) => {}
            other => return Err(RulesetError::FormatMismatch(other.map(str::to_string))),
        }
        if !matches!(root.get("rules"), Some(Value::Array(_))) {
            return Err(RulesetError::Invalid("missing rules list".to_string()));
        }

        let ruleset: RuntimeRuleset =
            serde_json::from_value(raw).map_err(|e| RulesetError::Invalid(e.to_string()))?;

        let rebuilt = RulesetIndex::build(&ruleset.rules)
            .map_err(|id| RulesetError::Invalid(format!("duplicate rule id: {}", id)))?;
        if rebuilt != ruleset.index {
            return Err(RulesetError::Invalid(
                "index does not match the rule list".to_string(),
            ));
        }

        Ok(ruleset)
    }

    /// Serialize as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the ruleset to `path`, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = self.to_json_pretty().map_err(std::io::Error::other)?;
        fs::write(path, json)
    }

    pub fn runtime_format(&self) -> &str {
        &self.runtime_format
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    pub fn compiled_at(&self) -> &str {
        &self.compiled_at
    }

    pub fn standard(&self) -> &Standard {
        &self.standard
    }

    pub fn severity_levels(&self) -> &[Severity] {
        &self.severity_levels
    }

    pub fn rules(&self) -> &[RuntimeRule] {
        &self.rules
    }

    pub fn index(&self) -> &RulesetIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get a rule by its id
    pub fn rule(&self, id: &str) -> Option<&RuntimeRule> {
        self.index.by_id.get(id).and_then(|&i| self.rules.get(i))
    }

    /// All rules compiled to `op`, in definition order
    pub fn rules_for_op(&self, op: Op) -> Vec<&RuntimeRule> {
        self.lookup_ids(self.index.by_op.get(&op))
    }

    /// All rules with the given scope, in definition order
    pub fn rules_in_scope(&self, scope: &str) -> Vec<&RuntimeRule> {
        self.lookup_ids(self.index.by_scope.get(scope))
    }

    fn lookup_ids(&self, ids: Option<&Vec<String>>) -> Vec<&RuntimeRule> {
        ids.map(|ids| ids.iter().filter_map(|id| self.rule(id)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(id: &str, op: Op, scope: &str) -> RuntimeRule {
        RuntimeRule {
            id: id.to_string(),
            severity: Severity::Major,
            title: format!("Rule {id}"),
            scope: scope.to_string(),
            op,
            args: Map::new(),
            clause: None,
            tags: None,
            basis: None,
            description: None,
        }
    }

    fn standard() -> Standard {
        Standard {
            code: "GOST 7.32-2017".to_string(),
            title: "Research report".to_string(),
            version: "2017".to_string(),
            effective_date: "2018-07-01".to_string(),
            language: "ru".to_string(),
            extra: BTreeMap::new(),
        }
    }

    fn sample() -> RuntimeRuleset {
        let rules = vec![
            rule("R1", Op::CheckMargins, "layout"),
            rule("R2", Op::CheckPageFormat, "layout"),
            rule("R3", Op::CheckMargins, "structure"),
        ];
        let index = RulesetIndex::build(&rules).unwrap();
        RuntimeRuleset::new(
            "2026-01-01T00:00:00Z".to_string(),
            standard(),
            vec![Severity::Major],
            rules,
            index,
        )
    }

    #[test]
    fn test_index_build() {
        let ruleset = sample();
        let index = ruleset.index();
        assert_eq!(index.by_id["R2"], 1);
        assert_eq!(index.by_op[&Op::CheckMargins], vec!["R1", "R3"]);
        assert_eq!(index.by_scope["layout"], vec!["R1", "R2"]);
    }

    #[test]
    fn test_index_rejects_duplicate() {
        let rules = vec![
            rule("R1", Op::CheckMargins, "a"),
            rule("R1", Op::CheckMargins, "b"),
        ];
        assert_eq!(RulesetIndex::build(&rules), Err("R1".to_string()));
    }

    #[test]
    fn test_lookups() {
        let ruleset = sample();
        assert_eq!(ruleset.rule("R3").unwrap().scope, "structure");
        assert!(ruleset.rule("missing").is_none());
        let margins: Vec<&str> = ruleset
            .rules_for_op(Op::CheckMargins)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(margins, vec!["R1", "R3"]);
        assert!(ruleset.rules_for_op(Op::CheckPagination).is_empty());
        assert_eq!(ruleset.rules_in_scope("layout").len(), 2);
    }

    #[test]
    fn test_json_round_trip_keeps_layout() {
        let ruleset = sample();
        let json = ruleset.to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["runtime_format"], json!(RUNTIME_FORMAT));
        assert_eq!(value["index"]["by_op"]["CHECK_MARGINS"], json!(["R1", "R3"]));
        assert!(value["rules"][0].get("clause").is_none());

        let loaded = RuntimeRuleset::from_json(&json).unwrap();
        assert_eq!(loaded, ruleset);
    }

    #[test]
    fn test_from_json_rejects_wrong_format() {
        let err = RuntimeRuleset::from_json(r#"{"runtime_format": "OTHER", "rules": []}"#)
            .unwrap_err();
        assert!(matches!(err, RulesetError::FormatMismatch(Some(ref f)) if f == "OTHER"));
    }

    #[test]
    fn test_from_json_rejects_missing_rules() {
        let err = RuntimeRuleset::from_json(r#"{"runtime_format": "GOST_RUNTIME_RULESET"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing rules list"));
    }

    #[test]
    fn test_from_json_rejects_stale_index() {
        let ruleset = sample();
        let mut value = serde_json::to_value(&ruleset).unwrap();
        value["index"]["by_id"]["R1"] = json!(2);
        let err = RuntimeRuleset::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("index does not match"));
    }

    #[test]
    fn test_clause_text() {
        let mut r = rule("R1", Op::CheckMargins, "a");
        assert_eq!(r.clause_text(), None);
        r.clause = Some(json!("6.1.1"));
        assert_eq!(r.clause_text().as_deref(), Some("6.1.1"));
        r.clause = Some(json!(5.3));
        assert_eq!(r.clause_text().as_deref(), Some("5.3"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("rules.runtime.json");
        sample().save(&path).unwrap();
        let loaded = RuntimeRuleset::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
    }
}
