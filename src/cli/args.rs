//! CLI argument parsing using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for gostcheck commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// gostcheck CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "gostcheck")]
#[command(about = "Check documents against compiled GOST formatting rules")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides gostcheck.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// More log output on stderr; repeat for trace level
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available gostcheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a rule definition into a runtime ruleset
    Compile {
        /// Rule definition file (.toml or .json)
        definition: PathBuf,

        /// Output path (defaults to <stem>.runtime.json beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a document against a ruleset
    Check {
        /// Extracted document (JSON)
        document: PathBuf,

        /// Runtime ruleset or rule definition (overrides gostcheck.toml)
        #[arg(long)]
        ruleset: Option<PathBuf>,

        /// Output format (overrides gostcheck.toml)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the structural snapshot of a document as JSON
    Snapshot {
        /// Extracted document (JSON)
        document: PathBuf,
    },

    /// Re-resolve finding locations against a newer document version
    Relocate {
        /// Findings in JSONL, as written by `check --format jsonl`
        findings: PathBuf,

        /// The newer extracted document (JSON)
        document: PathBuf,
    },
}
