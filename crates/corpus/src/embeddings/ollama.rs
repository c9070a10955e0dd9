//! Ollama embedding provider.
//!
//! Semantic embeddings via Ollama's local API using models like
//! nomic-embed-text. The provider verifies that returned vectors match
//! the dimensions recorded at ingestion time.

use crate::embeddings::Embedder;
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama embeddings endpoint, relative to the base URL.
const EMBEDDINGS_ENDPOINT: &str = "/api/embeddings";

/// Request payload for the Ollama embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding provider.
#[derive(Debug)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a provider for the given endpoint and model.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::Embedding(format!("Failed to create HTTP client for Ollama: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            dimensions,
        })
    }
}

#[async_trait::async_trait]
impl Embedder for OllamaEmbedder {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}{}", self.base_url, EMBEDDINGS_ENDPOINT);
        let request = EmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Embedding(format!(
                "Ollama embeddings endpoint returned {}",
                response.status()
            )));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            AppError::Embedding(format!("Failed to parse embedding response: {}", e))
        })?;

        if parsed.embedding.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "Model '{}' returned {} dimensions, expected {}",
                self.model,
                parsed.embedding.len(),
                self.dimensions
            )));
        }

        Ok(parsed.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let embedder = OllamaEmbedder::new(
            "http://localhost:11434",
            "nomic-embed-text",
            768,
            Duration::from_secs(30),
        )
        .unwrap();

        assert_eq!(embedder.provider_name(), "ollama");
        assert_eq!(embedder.model_name(), "nomic-embed-text");
        assert_eq!(embedder.dimensions(), 768);
    }

    #[test]
    fn test_request_serialization() {
        let request = EmbeddingRequest {
            model: "nomic-embed-text".to_string(),
            prompt: "hello".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "nomic-embed-text");
        assert_eq!(value["prompt"], "hello");
    }
}
