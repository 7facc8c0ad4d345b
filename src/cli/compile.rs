//! Compile command implementation
//!
//! Turns an authored rule definition into a runtime ruleset on disk.

use crate::cli::common::{EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS};
use crate::error::CompileError;
use crate::rules::{compile_file, default_output_path};
use std::path::{Path, PathBuf};

/// Run the compile command
///
/// Exit code:
/// - 0: ruleset written
/// - 2: I/O error
/// - 3: the definition is invalid
pub fn run_compile(definition: &Path, output: Option<&Path>) -> i32 {
    match run_compile_inner(definition, output) {
        Ok((rules, path)) => {
            println!("Compiled {} rules into {}", rules, path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

fn run_compile_inner(
    definition: &Path,
    output: Option<&Path>,
) -> Result<(usize, PathBuf), CompileError> {
    let ruleset = compile_file(definition, output)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(definition));
    Ok((ruleset.len(), path))
}

fn exit_code(err: &CompileError) -> i32 {
    match err {
        CompileError::Io(_) => EXIT_ERROR,
        _ => EXIT_PARSE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let io = CompileError::Io(std::io::Error::other("disk"));
        assert_eq!(exit_code(&io), EXIT_ERROR);
        assert_eq!(exit_code(&CompileError::Empty("rules")), EXIT_PARSE_ERROR);
        assert_eq!(
            exit_code(&CompileError::DuplicateRuleId("R1".to_string())),
            EXIT_PARSE_ERROR
        );
    }

    #[test]
    fn test_missing_definition_is_io_error() {
        let code = run_compile(Path::new("/nonexistent/rules.toml"), None);
        assert_eq!(code, EXIT_ERROR);
    }
}
