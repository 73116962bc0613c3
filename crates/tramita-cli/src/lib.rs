//! Tramita CLI - judicial-case monitoring bot.
//!
//! Reads case numbers from a Google Sheets control spreadsheet, queries
//! the Comunica PJe gazette API for each case, asks the configured model
//! backend for an executive summary of the latest publications, and
//! writes status and summary back to the spreadsheet.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use cli::{Cli, Command, RunArgs};
pub use config::Config;
pub use error::{CliError, Result};
