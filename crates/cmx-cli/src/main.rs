//! # cmx CLI entry point
//!
//! Parses command-line arguments, loads configuration and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmx_cli::create::{run_create, CreateArgs};
use cmx_cli::delete::{run_delete, DeleteArgs};
use cmx_cli::history::{run_history, HistoryArgs};
use cmx_cli::patch::{run_patch, PatchArgs};
use cmx_cli::report::{run_report, ReportArgs};
use cmx_cli::stats::{run_stats, StatsArgs};
use cmx_cli::EXIT_ERROR;
use cmx_store::CmxConfig;

/// Compliance matrix CLI.
///
/// Reads and writes `register.json` and `matrix.json` in the configured data
/// directory.
#[derive(Parser, Debug)]
#[command(name = "cmx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register status counts and deadline statistics.
    Stats(StatsArgs),

    /// Add a register entry from a JSON file.
    Create(CreateArgs),

    /// Assessment of a register entry's compliance matrix, as JSON.
    Report(ReportArgs),

    /// Audit trail of a register entry.
    History(HistoryArgs),

    /// Apply a JSON patch to a register entry and record the changes.
    Patch(PatchArgs),

    /// Delete a register entry unless the deletion guard refuses.
    Delete(DeleteArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match CmxConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Stats(args) => run_stats(&args, &config),
        Commands::Create(args) => run_create(&args, &config),
        Commands::Report(args) => run_report(&args, &config),
        Commands::History(args) => run_history(&args, &config),
        Commands::Patch(args) => run_patch(&args, &config),
        Commands::Delete(args) => run_delete(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
