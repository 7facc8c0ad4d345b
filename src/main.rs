//! gostcheck CLI entry point

use clap::Parser;
use gostcheck::cli::{Command, args::Cli};
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gostcheck={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Command::Compile { definition, output } => {
            gostcheck::cli::compile::run_compile(&definition, output.as_deref())
        }
        Command::Check {
            document,
            ruleset,
            format,
        } => gostcheck::cli::check::run_check(&document, ruleset.as_deref(), format, cli.color),
        Command::Snapshot { document } => gostcheck::cli::snapshot::run_snapshot(&document),
        Command::Relocate { findings, document } => {
            gostcheck::cli::relocate::run_relocate(&findings, &document)
        }
    };

    process::exit(exit_code);
}
