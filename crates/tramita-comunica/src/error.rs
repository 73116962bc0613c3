//! Error types for the Comunica PJe client

use thiserror::Error;

/// Errors from querying the Comunica PJe API.
#[derive(Debug, Error)]
pub enum ComunicaError {
    /// The API answered 429; callers should back off for a minute
    #[error("rate limit reached, wait before retrying")]
    RateLimited {
        /// The `x-ratelimit-limit` header, when the API sent one
        total: Option<u32>,
    },

    /// The API rejected the query parameters (HTTP 422)
    #[error("query parameters rejected by the API")]
    InvalidQuery,

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The request timed out
    #[error("request timed out")]
    Timeout,

    /// A response arrived but its body could not be decoded
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// Connection or protocol-level failure
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ComunicaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ComunicaError::Timeout
        } else if err.is_decode() {
            ComunicaError::InvalidBody(err.to_string())
        } else {
            ComunicaError::Transport(err.to_string())
        }
    }
}
