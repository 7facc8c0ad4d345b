#![forbid(unsafe_code)]

//! Operation registry
//!
//! Maps each runtime operation to the pure function that evaluates it.
//! Operations without an entry are still recognized: the executor turns
//! them into a manual-review finding instead of skipping them.

use crate::engine::checks::{self, CheckContext};
use crate::error::EvalError;
use crate::finding::Finding;
use crate::types::Op;
use std::collections::HashMap;

/// Evaluation function for one operation
pub type CheckFn = fn(&CheckContext<'_>) -> Result<Vec<Finding>, EvalError>;

/// Registry of evaluation functions, keyed by operation
#[derive(Clone)]
pub struct CheckRegistry {
    checks: HashMap<Op, CheckFn>,
}

impl CheckRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// Registry holding every check this crate implements
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Op::CheckStructurePresence, checks::structure::structure_presence);
        registry.register(Op::CheckPageFormat, checks::layout::page_format);
        registry.register(Op::CheckMargins, checks::layout::margins);
        registry.register(Op::CheckHeadingFormat, checks::heading::heading_format);
        registry.register(
            Op::CheckAbstractComponents,
            checks::structure::abstract_components,
        );
        registry.register(Op::CheckKeywordCount, checks::keywords::keyword_count);
        registry
    }

    /// Register or replace the check for `op`
    ///
    /// Returns the previously registered function, if any.
    pub fn register(&mut self, op: Op, check: CheckFn) -> Option<CheckFn> {
        self.checks.insert(op, check)
    }

    /// Get the check for an operation
    pub fn get(&self, op: Op) -> Option<CheckFn> {
        self.checks.get(&op).copied()
    }

    pub fn contains(&self, op: Op) -> bool {
        self.checks.contains_key(&op)
    }

    /// Operations with a registered check, sorted
    pub fn implemented_ops(&self) -> Vec<Op> {
        let mut ops: Vec<Op> = self.checks.keys().copied().collect();
        ops.sort();
        ops
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("ops", &self.implemented_ops())
            .finish()
    }
}
