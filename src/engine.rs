//! Rule execution engine and check registry

pub mod args;
pub mod checks;
pub mod executor;
pub mod registry;

pub use checks::CheckContext;
pub use executor::{ExecutionEngine, ExecutionResult, run_rule, run_ruleset};
pub use registry::{CheckFn, CheckRegistry};
