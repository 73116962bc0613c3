//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Gazette API error
    #[error("Comunica API error: {0}")]
    Comunica(#[from] tramita_comunica::ComunicaError),

    /// Model backend error
    #[error("AI backend error: {0}")]
    Ai(#[from] tramita_ai::AiError),

    /// Spreadsheet error
    #[error("spreadsheet error: {0}")]
    Sheets(#[from] tramita_sheets::SheetsError),

    /// Connectivity verification failed
    #[error("connectivity check failed")]
    CheckFailed,
}
