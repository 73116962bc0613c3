//! The backend capability trait and startup selection

use crate::AiError;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tramita_comunica::Publication;

/// Canned reply used when there is nothing to analyze; shaped like a
/// regular model answer so the extraction cascade handles it uniformly.
pub const EMPTY_DOCKET_RESPONSE: &str =
    r#"{"resumo": "Sem publicações para analisar", "situacao": "NORMAL"}"#;

/// Capability interface over the supported model backends.
///
/// `analyze` returns the model's raw text; turning that into a
/// structured record is the caller's concern (via `tramita-analysis`).
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Ask the model for an analysis of the publications, newest first.
    async fn analyze(&self, publications: &[Publication]) -> Result<String, AiError>;

    /// Verify the backend is reachable and configured. `Ok` carries a
    /// human-readable connection message.
    async fn test_connection(&self) -> Result<String, AiError>;
}

/// Which model backend to use, decided once at startup from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Hosted Google Gemini API
    Gemini,
    /// Locally served Ollama instance
    Ollama,
}

impl FromStr for Backend {
    type Err = AiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "gemini" => Ok(Backend::Gemini),
            "ollama" => Ok(Backend::Ollama),
            other => Err(AiError::NotConfigured(format!(
                "unknown AI backend '{other}' (expected 'gemini' or 'ollama')"
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Gemini => write!(f, "gemini"),
            Backend::Ollama => write!(f, "ollama"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("Gemini".parse::<Backend>().unwrap(), Backend::Gemini);
        assert_eq!("OLLAMA".parse::<Backend>().unwrap(), Backend::Ollama);
        assert!("chatgpt".parse::<Backend>().is_err());
    }

    #[test]
    fn canned_empty_docket_reply_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(EMPTY_DOCKET_RESPONSE).unwrap();
        assert_eq!(value["situacao"], "NORMAL");
    }
}
