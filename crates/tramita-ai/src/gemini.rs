//! Hosted Google Gemini backend

use crate::prompt::{build_prompt, GEMINI_PROMPT};
use crate::provider::{AiProvider, EMPTY_DOCKET_RESPONSE};
use crate::AiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use tramita_comunica::Publication;

/// Model used when the configuration names none.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const PROBE_TIMEOUT_SECS: u64 = 10;

/// Placeholder shipped in the example configuration; treated the same
/// as a missing key.
const KEY_PLACEHOLDER: &str = "SUA_CHAVE_GEMINI_AQUI";

/// Provider backed by the hosted Gemini generateContent API.
pub struct GeminiProvider {
    api_key: String,
    model: String,
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: String,
}

impl GeminiProvider {
    /// Create a provider for `model` authenticated by `api_key`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("HTTP client construction failed - TLS misconfiguration");

        Self {
            api_key: api_key.into(),
            url: format!("{API_BASE}/{model}:generateContent"),
            model,
            client,
        }
    }

    fn key_is_usable(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != KEY_PLACEHOLDER
    }

    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
        timeout: Duration,
    ) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let envelope: ErrorEnvelope = response.json().await.unwrap_or_default();
            let message = if envelope.error.message.is_empty() {
                "unknown error".to_string()
            } else {
                envelope.error.message
            };
            return Err(AiError::Communication(format!("HTTP {status}: {message}")));
        }

        let body: GenerateResponse = response.json().await?;
        extract_text(&body)
            .ok_or_else(|| AiError::InvalidResponse("reply carried no text".to_string()))
    }
}

/// Pull the generated text out of the response, tolerating the shape
/// variations the API has shipped over time.
fn extract_text(response: &GenerateResponse) -> Option<String> {
    let content = &response.candidates.first()?.content;

    if let Some(part) = content.parts.first() {
        if let Some(text) = &part.text {
            return Some(text.clone());
        }
    }

    content.text.clone()
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn analyze(&self, publications: &[Publication]) -> Result<String, AiError> {
        if publications.is_empty() {
            return Ok(EMPTY_DOCKET_RESPONSE.to_string());
        }

        let prompt = build_prompt(GEMINI_PROMPT, publications);
        debug!(model = %self.model, prompt_len = prompt.len(), "calling Gemini");

        self.generate(
            &prompt,
            GenerationConfig {
                max_output_tokens: 2000,
                temperature: Some(0.1),
                response_mime_type: Some("application/json"),
            },
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
        .await
    }

    async fn test_connection(&self) -> Result<String, AiError> {
        if !self.key_is_usable() {
            return Err(AiError::NotConfigured("Gemini API key not set".to_string()));
        }

        self.generate(
            "Responda apenas: OK",
            GenerationConfig {
                max_output_tokens: 10,
                temperature: None,
                response_mime_type: None,
            },
            Duration::from_secs(PROBE_TIMEOUT_SECS),
        )
        .await?;

        Ok(format!("connected to model {}", self.model))
    }
}
