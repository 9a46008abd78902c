//! # `dispatch`
//!
//! Command-line front end for the greedy delivery dispatcher.
//!
//! ## Commands
//!
//! - `dispatch run <input>` - solve one problem, print a summary, optionally
//!   write the JSON report and CSV tables
//! - `dispatch visualize <input>` - print every agent's route leg by leg
//! - `dispatch check <dir>` - solve and validate every `test_case_*.json`
//!
//! Logs go to stderr; `RUST_LOG` overrides `--log-level`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;


use commands::RunArgs;

/// Greedy delivery dispatcher
#[derive(Parser, Debug)]
#[command(name = "dispatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DISPATCH_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign every package in an input file and report the result
    #[command(name = "run")]
    Run(RunArgs),

    /// Print the route each agent drives
    #[command(name = "visualize")]
    Visualize {
        /// Input JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Solve and validate every test_case_*.json in a directory
    #[command(name = "check")]
    Check {
        /// Directory holding the test cases
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Visualize { input } => commands::visualize::execute(&input),
        Commands::Check { dir } => commands::check::execute(&dir),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
