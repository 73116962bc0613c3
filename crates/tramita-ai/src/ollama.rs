//! Local Ollama backend

use crate::prompt::{build_prompt, OLLAMA_PROMPT};
use crate::provider::{AiProvider, EMPTY_DOCKET_RESPONSE};
use crate::AiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use tramita_comunica::Publication;

/// Default Ollama API endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model for local analysis.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b-instruct-q4_K_M";

// A local model can be slow; generation gets a generous timeout while
// the tags probe stays snappy.
const GENERATE_TIMEOUT_SECS: u64 = 60;
const TAGS_TIMEOUT_SECS: u64 = 5;

/// Provider backed by a locally served Ollama instance.
pub struct OllamaProvider {
    url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagModel {
    name: String,
}

impl OllamaProvider {
    /// Create a provider for `model` served at `url`.
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .build()
            .expect("HTTP client construction failed - TLS misconfiguration");

        Self {
            url: url.into(),
            model: model.into(),
            client,
        }
    }
}

#[async_trait]
impl AiProvider for OllamaProvider {
    async fn analyze(&self, publications: &[Publication]) -> Result<String, AiError> {
        if publications.is_empty() {
            return Ok(EMPTY_DOCKET_RESPONSE.to_string());
        }

        let prompt = build_prompt(OLLAMA_PROMPT, publications);
        debug!(model = %self.model, prompt_len = prompt.len(), "calling Ollama");

        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            options: OllamaOptions {
                temperature: 0.1,
                num_predict: 500,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Communication(format!(
                "Ollama answered HTTP {status}"
            )));
        }

        let body: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        Ok(body.response)
    }

    async fn test_connection(&self) -> Result<String, AiError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.url))
            .timeout(Duration::from_secs(TAGS_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AiError::Communication(format!("could not reach Ollama at {}", self.url))
                } else {
                    AiError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Communication(format!(
                "server answered HTTP {status}"
            )));
        }

        let tags: TagsResponse = response.json().await.unwrap_or_default();
        let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();

        let installed = names
            .iter()
            .any(|name| name.contains(&self.model) || self.model.contains(name.as_str()));

        if !installed {
            return Err(AiError::ModelNotAvailable(format!(
                "model '{}' not found; available: {}",
                self.model,
                names.join(", ")
            )));
        }

        Ok(format!("connected to Ollama with model {}", self.model))
    }
}
