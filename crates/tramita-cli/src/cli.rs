//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tramita - monitor judicial cases from a control spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "tramita")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep the spreadsheet: query, analyze and update every case
    Run(RunArgs),

    /// Verify connectivity to the spreadsheet, the AI backend and the
    /// gazette API
    Check,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Process a single worksheet instead of all of them
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Query and analyze, but do not write to the spreadsheet
    #[arg(long)]
    pub dry_run: bool,

    /// Skip model analysis; statuses come from the query outcome alone
    #[arg(long)]
    pub no_ai: bool,
}
