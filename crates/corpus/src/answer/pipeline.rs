//! Answer pipeline orchestration.
//!
//! One pipeline run turns a question into exactly one answer: retrieve,
//! try the generation service (when enabled), fall back to extractive
//! synthesis. Fatal store/index errors propagate before any answer path
//! is taken.

use crate::answer::fallback::synthesize;
use crate::answer::postprocess::post_process;
use crate::embeddings::create_embedder;
use crate::index::FlatIndex;
use crate::retrieve::Retriever;
use crate::store::PassageStore;
use crate::types::{Answer, AnswerSource};
use docqa_core::{AppConfig, AppResult};
use docqa_llm::{generate_primary, Generation, LlmClient, OllamaClient};
use std::sync::Arc;
use std::time::Duration;

/// Returned when retrieval surfaces no sufficiently relevant passages.
pub const NO_RELEVANT_MESSAGE: &str = "No relevant information found in the uploaded documents.";

/// The retrieval-and-answer-synthesis pipeline.
pub struct AnswerPipeline {
    retriever: Retriever,
    llm: Option<Arc<dyn LlmClient>>,
    config: AppConfig,
}

impl AnswerPipeline {
    /// Assemble a pipeline from pre-built parts. `llm: None` disables
    /// the primary generation tier entirely.
    pub fn new(retriever: Retriever, llm: Option<Arc<dyn LlmClient>>, config: AppConfig) -> Self {
        Self {
            retriever,
            llm,
            config,
        }
    }

    /// Open the store, load the index, and wire up the configured
    /// embedding provider and generation client.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = PassageStore::open(&config.index_path)?;
        let meta = store.embedding_meta()?;
        tracing::debug!(
            "Passage store ready: {} passages, embeddings by {}/{}",
            store.passage_count()?,
            meta.provider,
            meta.model
        );

        let timeout = Duration::from_secs(config.timeout_secs);
        let embedder = create_embedder(&meta, &config.ollama_url, timeout)?;
        let index = FlatIndex::load(&store)?;

        let retriever = Retriever::new(
            store,
            Box::new(index),
            embedder,
            config.top_k,
            config.relevance_threshold,
            config.min_passage_length,
        );

        let llm: Option<Arc<dyn LlmClient>> = if config.use_ollama {
            Some(Arc::new(OllamaClient::new(&config.ollama_url, timeout)?))
        } else {
            tracing::info!("Generation service disabled, extractive answers only");
            None
        };

        Ok(Self::new(retriever, llm, config.clone()))
    }

    /// Answer a single question.
    pub async fn answer(&self, question: &str) -> AppResult<Answer> {
        let retrieved = self.retriever.retrieve(question).await?;

        if retrieved.is_empty() {
            tracing::info!("No passages passed the relevance threshold");
            return Ok(Answer {
                text: NO_RELEVANT_MESSAGE.to_string(),
                source: AnswerSource::Canned,
            });
        }

        let passages: Vec<String> = retrieved.into_iter().map(|p| p.text).collect();

        if let Some(client) = &self.llm {
            let context = passages.join("\n\n");
            match generate_primary(client.as_ref(), &self.config, question, &context).await {
                Generation::Answer(text) => {
                    return Ok(Answer {
                        text: post_process(&text),
                        source: AnswerSource::Generated,
                    });
                }
                Generation::Unavailable => {
                    tracing::warn!("Generation unavailable, using extractive fallback");
                }
            }
        }

        Ok(synthesize(question, &passages, self.config.max_answer_length))
    }
}
