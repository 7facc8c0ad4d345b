#![forbid(unsafe_code)]

//! Rule definitions, compilation, and the runtime ruleset

pub mod compiler;
pub mod definition;
pub mod ruleset;

// Re-export core types
pub use compiler::{compile, compile_at, compile_file, default_output_path};
pub use definition::{load_definition, parse_json_definition, parse_toml_definition};
pub use ruleset::{RUNTIME_FORMAT, RUNTIME_VERSION, RuntimeRule, RuntimeRuleset, Standard};
