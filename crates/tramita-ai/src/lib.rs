//! Tramita AI
//!
//! Pluggable model backends for publication analysis.
//!
//! # Providers
//!
//! - [`GeminiProvider`]: hosted Google Gemini API
//! - [`OllamaProvider`]: locally served Ollama instance
//! - [`MockProvider`]: deterministic mock for testing
//!
//! All implement the [`AiProvider`] capability trait: `analyze` renders
//! the publications into a backend-specific prompt and returns the
//! model's **raw** reply (parsing it is `tramita-analysis`'s job), and
//! `test_connection` verifies the backend is reachable and configured.
//! The backend is chosen once at startup from configuration via
//! [`Backend`]; nothing switches on provider types at runtime.

#![warn(missing_docs)]

mod gemini;
mod ollama;
mod prompt;
mod provider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tramita_comunica::Publication;

pub use gemini::{GeminiProvider, DEFAULT_GEMINI_MODEL};
pub use ollama::{OllamaProvider, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
pub use provider::{AiProvider, Backend, EMPTY_DOCKET_RESPONSE};

/// Errors that can occur while talking to a model backend.
#[derive(Debug, Error)]
pub enum AiError {
    /// Backend is missing required configuration
    #[error("backend not configured: {0}")]
    NotConfigured(String),

    /// Network or API communication error
    #[error("communication error: {0}")]
    Communication(String),

    /// The backend answered, but not with usable text
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The requested model is not available on the backend
    #[error("model not available: {0}")]
    ModelNotAvailable(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::Communication(err.to_string())
    }
}

/// Mock provider for deterministic testing.
///
/// Returns queued responses in order, then a fixed default, without any
/// network calls. Clones share the queue and call counter.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    queued: Arc<Mutex<VecDeque<String>>>,
    call_count: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockProvider {
    /// Create a mock answering `response` to every `analyze` call.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail: false,
        }
    }

    /// Create a mock whose calls all fail with a communication error.
    pub fn failing() -> Self {
        let mut mock = Self::new("");
        mock.fail = true;
        mock
    }

    /// Queue a response consumed before the default kicks in.
    pub fn push_response(&self, response: impl Into<String>) {
        self.queued.lock().unwrap().push_back(response.into());
    }

    /// Number of `analyze` calls so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn analyze(&self, publications: &[Publication]) -> Result<String, AiError> {
        *self.call_count.lock().unwrap() += 1;

        if self.fail {
            return Err(AiError::Communication("mock failure".to_string()));
        }
        if publications.is_empty() {
            return Ok(EMPTY_DOCKET_RESPONSE.to_string());
        }

        let queued = self.queued.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| self.default_response.clone()))
    }

    async fn test_connection(&self) -> Result<String, AiError> {
        if self.fail {
            Err(AiError::Communication("mock failure".to_string()))
        } else {
            Ok("mock provider ready".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication() -> Publication {
        Publication {
            id: 1,
            available_on: "2024-01-15".to_string(),
            communication_type: "Intimação".to_string(),
            court: "TJSP".to_string(),
            organ: "3ª Vara Cível".to_string(),
            case_class: "Procedimento Comum".to_string(),
            text: "<p>Teor da intimação.</p>".to_string(),
            case_number: "1000000-11.2024.8.26.0100".to_string(),
            medium: "Diário".to_string(),
            hash: "h".to_string(),
            lawyers: vec![],
            recipients: vec![],
        }
    }

    #[tokio::test]
    async fn mock_returns_default_and_counts_calls() {
        let mock = MockProvider::new(r#"{"resumo": "ok"}"#);
        assert_eq!(mock.call_count(), 0);

        let text = mock.analyze(&[publication()]).await.unwrap();
        assert_eq!(text, r#"{"resumo": "ok"}"#);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn mock_queued_responses_come_first() {
        let mock = MockProvider::new("default");
        mock.push_response("first");

        assert_eq!(mock.analyze(&[publication()]).await.unwrap(), "first");
        assert_eq!(mock.analyze(&[publication()]).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn mock_clone_shares_state() {
        let mock = MockProvider::new("x");
        let clone = mock.clone();
        mock.analyze(&[publication()]).await.unwrap();
        assert_eq!(clone.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_docket_short_circuits() {
        let mock = MockProvider::new("unused");
        let text = mock.analyze(&[]).await.unwrap();
        assert_eq!(text, EMPTY_DOCKET_RESPONSE);
    }

    #[tokio::test]
    async fn failing_mock_errors() {
        let mock = MockProvider::failing();
        assert!(mock.analyze(&[publication()]).await.is_err());
        assert!(mock.test_connection().await.is_err());
    }
}
