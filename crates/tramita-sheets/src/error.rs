//! Error types for the Sheets client

use thiserror::Error;

/// Errors from the Google Sheets integration.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The service-account key file is missing or malformed
    #[error("credentials error: {0}")]
    Credentials(String),

    /// Token endpoint refused the signed assertion
    #[error("auth error: {0}")]
    Auth(String),

    /// Signing the service-account assertion failed
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Reading the key file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Connection or protocol-level failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body did not decode as expected
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}
