//! Ollama generation client.
//!
//! Talks to a local Ollama runtime over HTTP.
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{GenerateRequest, LlmClient};
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for the lightweight model-listing call. Kept short so an
/// unreachable service is detected quickly; the generation call itself
/// uses the configured request timeout.
const TAGS_TIMEOUT_SECS: u64 = 5;

/// Ollama `/api/generate` request format.
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Decoding options accepted by Ollama.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
    repeat_penalty: f32,
}

/// Ollama `/api/generate` response format (non-streaming).
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Ollama `/api/tags` response format.
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

/// Ollama generation client.
pub struct OllamaClient {
    /// Base URL for the Ollama API
    base_url: String,

    /// HTTP client with the configured request timeout
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a client for the given endpoint with a bounded request
    /// timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn to_wire_request(&self, request: &GenerateRequest) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                top_p: request.top_p,
                num_predict: request.max_tokens,
                repeat_penalty: request.repeat_penalty,
            },
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn list_models(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        tracing::debug!("Listing Ollama models at {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(TAGS_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Llm(format!(
                "Ollama tags endpoint returned {}",
                response.status()
            )));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama tags response: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn generate(&self, request: &GenerateRequest) -> AppResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::info!("Sending generation request to Ollama (model: {})", request.model);

        let wire_request = self.to_wire_request(request);

        let response = self
            .client
            .post(&url)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let ollama_response: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Ollama response: {}", e)))?;

        tracing::debug!(
            "Received {} bytes of generated text from Ollama",
            ollama_response.response.len()
        );

        Ok(ollama_response.response.trim().to_string())
    }
}
