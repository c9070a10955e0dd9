//! Error types for docqa.
//!
//! A single error enum covers every fatal error category in the
//! application. Generation-service failures are deliberately NOT part of
//! this taxonomy: the primary generation client resolves them internally
//! and the pipeline falls back to extractive synthesis, so they never
//! reach a caller as errors.

use thiserror::Error;

/// Unified fatal error type for docqa.
///
/// Functions return `Result<T, AppError>`. We never panic — errors must
/// be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (invalid environment values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Passage store / vector index errors (missing or incomplete data)
    #[error("Index error: {0}")]
    Index(String),

    /// Embedding provider errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Generation service errors (resolved below the fallback layer)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
