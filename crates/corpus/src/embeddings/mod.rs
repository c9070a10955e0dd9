//! Embedding providers.
//!
//! The embedding model is an external collaborator consumed as a black
//! box: text in, fixed-size vector out. The store records which
//! provider produced the stored vectors; the factory reconstructs the
//! matching provider for query-time embedding.

pub mod hash;
pub mod ollama;

pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedder;

use crate::types::EmbeddingMeta;
use docqa_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Provider name ("hash", "ollama")
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;

    /// Embedding vector dimensions
    fn dimensions(&self) -> usize;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Create the embedding provider recorded in the store's metadata.
pub fn create_embedder(
    meta: &EmbeddingMeta,
    ollama_url: &str,
    timeout: Duration,
) -> AppResult<Arc<dyn Embedder>> {
    match meta.provider.as_str() {
        "hash" => Ok(Arc::new(HashEmbedder::new(meta.dimensions))),
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            ollama_url,
            &meta.model,
            meta.dimensions,
            timeout,
        )?)),
        other => Err(AppError::Embedding(format!(
            "Unknown embedding provider '{}'. Supported providers: hash, ollama",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hash_embedder() {
        let meta = EmbeddingMeta {
            provider: "hash".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
        };

        let embedder = create_embedder(&meta, "http://localhost:11434", Duration::from_secs(5))
            .unwrap();
        assert_eq!(embedder.provider_name(), "hash");
        assert_eq!(embedder.dimensions(), 384);
    }

    #[test]
    fn test_create_unknown_provider() {
        let meta = EmbeddingMeta {
            provider: "neural-net-9000".to_string(),
            model: "x".to_string(),
            dimensions: 8,
        };

        let result = create_embedder(&meta, "http://localhost:11434", Duration::from_secs(5));
        assert!(matches!(result, Err(AppError::Embedding(_))));
    }
}
