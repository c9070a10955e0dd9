//! Primary generation path.
//!
//! Selects a model, builds the instruction prompt, and calls the
//! generation service. The outcome is explicit: either an answer or
//! `Unavailable`. Service failures of every kind — unreachable host,
//! non-success status, malformed response, timeout, no usable model —
//! resolve to `Unavailable` and are logged; they are never errors at
//! this boundary.

use crate::client::{GenerateRequest, LlmClient};
use crate::select::select_model;
use docqa_core::AppConfig;

/// Outcome of the primary generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The service produced a non-empty answer.
    Answer(String),

    /// The service could not be used; the caller should fall back.
    Unavailable,
}

/// Attempt to answer `question` from `context` via the generation
/// service.
///
/// `context` is the retrieved passages, already normalized and joined by
/// blank lines.
pub async fn generate_primary(
    client: &dyn LlmClient,
    config: &AppConfig,
    question: &str,
    context: &str,
) -> Generation {
    let available = match client.list_models().await {
        Ok(models) => models,
        Err(e) => {
            tracing::warn!("Generation service unavailable: {}", e);
            return Generation::Unavailable;
        }
    };

    let Some(model) = select_model(&available) else {
        tracing::warn!(
            "No usable model among {} offered by the generation service",
            available.len()
        );
        return Generation::Unavailable;
    };

    tracing::info!("Generating answer with model '{}'", model);

    let request = GenerateRequest::new(build_prompt(question, context), model)
        .with_temperature(config.temperature)
        .with_top_p(config.top_p)
        .with_max_tokens(config.max_tokens)
        .with_repeat_penalty(config.repeat_penalty);

    match client.generate(&request).await {
        Ok(text) if !text.trim().is_empty() => Generation::Answer(text),
        Ok(_) => {
            tracing::warn!("Generation service returned an empty answer");
            Generation::Unavailable
        }
        Err(e) => {
            tracing::warn!("Generation failed: {}", e);
            Generation::Unavailable
        }
    }
}

/// Build the instruction prompt around the retrieved context.
fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a helpful assistant that answers questions based on provided document context. \
         Answer using only the information in the context below. If the answer cannot be found \
         in the context, say so clearly. Cite specific details from the context where possible.\n\n\
         Context from documents:\n{}\n\nQuestion: {}\n\nAnswer:",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::{AppError, AppResult};

    /// Stub client with scripted listing and generation outcomes.
    struct StubClient {
        models: AppResult<Vec<String>>,
        answer: AppResult<String>,
    }

    impl StubClient {
        fn new(models: AppResult<Vec<String>>, answer: AppResult<String>) -> Self {
            Self { models, answer }
        }
    }

    fn clone_result<T: Clone>(result: &AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => Ok(value.clone()),
            Err(e) => Err(AppError::Llm(e.to_string())),
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for StubClient {
        fn provider_name(&self) -> &str {
            "stub"
        }

        async fn list_models(&self) -> AppResult<Vec<String>> {
            clone_result(&self.models)
        }

        async fn generate(&self, _request: &GenerateRequest) -> AppResult<String> {
            clone_result(&self.answer)
        }
    }

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let client = StubClient::new(
            Ok(vec!["mistral:7b".to_string()]),
            Ok("Paris is the capital of France.".to_string()),
        );

        let outcome = generate_primary(&client, &config(), "capital?", "France...").await;
        assert_eq!(
            outcome,
            Generation::Answer("Paris is the capital of France.".to_string())
        );
    }

    #[tokio::test]
    async fn test_listing_failure_is_unavailable() {
        let client = StubClient::new(
            Err(AppError::Llm("connection refused".to_string())),
            Ok("unused".to_string()),
        );

        let outcome = generate_primary(&client, &config(), "q", "ctx").await;
        assert_eq!(outcome, Generation::Unavailable);
    }

    #[tokio::test]
    async fn test_no_usable_model_is_unavailable() {
        let client = StubClient::new(
            Ok(vec!["gemma:2b".to_string()]),
            Ok("unused".to_string()),
        );

        let outcome = generate_primary(&client, &config(), "q", "ctx").await;
        assert_eq!(outcome, Generation::Unavailable);
    }

    #[tokio::test]
    async fn test_generation_error_is_unavailable() {
        let client = StubClient::new(
            Ok(vec!["mistral:latest".to_string()]),
            Err(AppError::Llm("Ollama API error (500): boom".to_string())),
        );

        let outcome = generate_primary(&client, &config(), "q", "ctx").await;
        assert_eq!(outcome, Generation::Unavailable);
    }

    #[tokio::test]
    async fn test_empty_answer_is_unavailable() {
        let client = StubClient::new(
            Ok(vec!["mistral:latest".to_string()]),
            Ok("   ".to_string()),
        );

        let outcome = generate_primary(&client, &config(), "q", "ctx").await;
        assert_eq!(outcome, Generation::Unavailable);
    }

    #[test]
    fn test_prompt_embeds_context_and_question() {
        let prompt = build_prompt("What is Rust?", "Rust is a language.\n\nIt is fast.");
        assert!(prompt.contains("Context from documents:\nRust is a language.\n\nIt is fast."));
        assert!(prompt.contains("Question: What is Rust?"));
        assert!(prompt.contains("only the information in the context"));
    }
}
