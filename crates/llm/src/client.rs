//! Generation client abstraction and request type.

use docqa_core::AppResult;

/// A single non-streaming generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The full prompt text to send
    pub prompt: String,

    /// Model identifier (e.g., "mistral:7b")
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling threshold
    pub top_p: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Repetition penalty
    pub repeat_penalty: f32,
}

impl GenerateRequest {
    /// Create a request with default decoding parameters.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: 0.2,
            top_p: 0.8,
            max_tokens: 800,
            repeat_penalty: 1.1,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the nucleus sampling threshold.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the repetition penalty.
    pub fn with_repeat_penalty(mut self, repeat_penalty: f32) -> Self {
        self.repeat_penalty = repeat_penalty;
        self
    }
}

/// Trait for generation-service clients.
///
/// Abstracts the external service so the pipeline can be exercised with
/// stub implementations in tests. Implementations report failures as
/// `AppError::Llm`; the primary generation path maps every such failure
/// to [`crate::Generation::Unavailable`].
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "ollama").
    fn provider_name(&self) -> &str;

    /// List the model identifiers the service currently offers.
    async fn list_models(&self) -> AppResult<Vec<String>>;

    /// Perform a non-streaming generation and return the response text.
    async fn generate(&self, request: &GenerateRequest) -> AppResult<String>;
}
