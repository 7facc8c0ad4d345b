#![forbid(unsafe_code)]

//! Execution engine for running a ruleset against one snapshot
//!
//! Rules run sequentially in ruleset order and findings are concatenated in
//! that order. A rule whose check fails is isolated: it contributes a single
//! review finding and the remaining rules still run. The result is never
//! empty; a clean document yields one informational finding.

use crate::engine::checks::{self, CheckContext, DOCUMENT_ANCHOR};
use crate::engine::registry::CheckRegistry;
use crate::error::EvalError;
use crate::finding::Finding;
use crate::locator::attach_location;
use crate::rules::{RuntimeRule, RuntimeRuleset};
use crate::snapshot::DocumentSnapshot;
use crate::types::{Category, FindingSeverity};
use std::sync::LazyLock;

static DEFAULT_ENGINE: LazyLock<ExecutionEngine> = LazyLock::new(ExecutionEngine::new);

/// Result of executing a ruleset against a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Findings in ruleset order
    pub findings: Vec<Finding>,
    /// Number of rules executed
    pub rules_executed: usize,
    /// Rules whose check returned an error
    pub rules_failed: usize,
    /// Rules with no automatic check
    pub rules_manual: usize,
}

/// Execution engine dispatching rules through a [`CheckRegistry`]
#[derive(Debug, Clone, Default)]
pub struct ExecutionEngine {
    registry: CheckRegistry,
}

impl ExecutionEngine {
    /// Engine with every built-in check registered
    pub fn new() -> Self {
        Self::with_registry(CheckRegistry::builtin())
    }

    pub fn with_registry(registry: CheckRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Evaluate one rule
    ///
    /// Operations without a registered check yield a single manual-review
    /// finding.
    ///
    /// # Errors
    ///
    /// Returns the check's `EvalError` unchanged; [`ExecutionEngine::execute`]
    /// is where failures are turned into findings.
    pub fn run_rule(
        &self,
        snapshot: &DocumentSnapshot,
        rule: &RuntimeRule,
    ) -> Result<Vec<Finding>, EvalError> {
        let ctx = CheckContext::new(snapshot, rule);
        match self.registry.get(rule.op) {
            Some(check) => check(&ctx),
            None => Ok(vec![checks::manual_review(&ctx)]),
        }
    }

    /// Run every rule and collect its findings
    pub fn run_ruleset(&self, snapshot: &DocumentSnapshot, ruleset: &RuntimeRuleset) -> Vec<Finding> {
        self.execute(snapshot, ruleset, |_, _| {}).findings
    }

    /// Like [`ExecutionEngine::run_ruleset`], reporting `(completed, total)`
    /// after each rule
    pub fn run_ruleset_with_progress(
        &self,
        snapshot: &DocumentSnapshot,
        ruleset: &RuntimeRuleset,
        on_progress: impl FnMut(usize, usize),
    ) -> Vec<Finding> {
        self.execute(snapshot, ruleset, on_progress).findings
    }

    /// Execute the ruleset, returning findings and execution statistics
    pub fn execute(
        &self,
        snapshot: &DocumentSnapshot,
        ruleset: &RuntimeRuleset,
        mut on_progress: impl FnMut(usize, usize),
    ) -> ExecutionResult {
        let total = ruleset.len();
        let mut findings = Vec::new();
        let mut rules_failed = 0;
        let mut rules_manual = 0;

        for (i, rule) in ruleset.rules().iter().enumerate() {
            if !self.registry.contains(rule.op) {
                rules_manual += 1;
            }
            match self.run_rule(snapshot, rule) {
                Ok(found) => {
                    tracing::debug!(rule = %rule.id, op = %rule.op, findings = found.len(), "rule evaluated");
                    findings.extend(found);
                }
                Err(err) => {
                    tracing::warn!(rule = %rule.id, error = %err, "rule evaluation failed");
                    rules_failed += 1;
                    findings.push(failure_finding(rule, &err));
                }
            }
            on_progress(i + 1, total);
        }

        if findings.is_empty() {
            findings.push(clean_result_finding(snapshot));
        }

        tracing::info!(
            rules = total,
            failed = rules_failed,
            manual = rules_manual,
            findings = findings.len(),
            "ruleset executed"
        );

        ExecutionResult {
            findings,
            rules_executed: total,
            rules_failed,
            rules_manual,
        }
    }
}

/// Evaluate one rule with the built-in checks
pub fn run_rule(snapshot: &DocumentSnapshot, rule: &RuntimeRule) -> Result<Vec<Finding>, EvalError> {
    DEFAULT_ENGINE.run_rule(snapshot, rule)
}

/// Run a ruleset with the built-in checks
pub fn run_ruleset(snapshot: &DocumentSnapshot, ruleset: &RuntimeRuleset) -> Vec<Finding> {
    DEFAULT_ENGINE.run_ruleset(snapshot, ruleset)
}

fn failure_finding(rule: &RuntimeRule, err: &EvalError) -> Finding {
    Finding::for_rule(
        rule,
        format!("Rule {} failed: {}", rule.id, err),
        "Check the rule arguments or review this requirement manually.",
    )
    .with_severity(FindingSeverity::NeedReview)
    .with_category(Category::Engine)
}

fn clean_result_finding(snapshot: &DocumentSnapshot) -> Finding {
    let finding = Finding::new(
        FindingSeverity::Low,
        Category::Info,
        "No violations found by the automatic checks.",
        "Full compliance may still need manual review of the remaining requirements.",
    );
    attach_location(snapshot, &finding, Some(DOCUMENT_ANCHOR), None)
}
