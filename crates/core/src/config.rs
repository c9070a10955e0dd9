//! Configuration loading for docqa.
//!
//! All tunables come from the process environment with sensible
//! defaults. The configuration is read exactly once at startup into an
//! immutable [`AppConfig`] value that is passed into components at
//! construction time; nothing re-reads the environment per query.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Default location of the SQLite passage store.
pub const DEFAULT_INDEX_PATH: &str = "embeddings/passages.db";

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Main application configuration.
///
/// Holds every knob the pipeline needs: retrieval bounds, answer
/// shaping limits, and decoding parameters for the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite passage store (written by ingestion)
    pub index_path: PathBuf,

    /// Number of nearest neighbors requested per query
    pub top_k: usize,

    /// Maximum relevance distance; passages at or above it are dropped
    pub relevance_threshold: f32,

    /// Minimum passage length (characters) to take part in answering
    pub min_passage_length: usize,

    /// Maximum final answer length (characters) for extractive answers
    pub max_answer_length: usize,

    /// Whether to try the Ollama generation service before falling back
    pub use_ollama: bool,

    /// Base URL of the Ollama API
    pub ollama_url: String,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Nucleus sampling threshold for generation
    pub top_p: f32,

    /// Maximum tokens the generation service may produce
    pub max_tokens: u32,

    /// Repetition penalty for generation
    pub repeat_penalty: f32,

    /// Request timeout for generation calls, in seconds
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            top_k: 12,
            relevance_threshold: 1.5,
            min_passage_length: 100,
            max_answer_length: 800,
            use_ollama: true,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            temperature: 0.2,
            top_p: 0.8,
            max_tokens: 800,
            repeat_penalty: 1.1,
            timeout_secs: 45,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DOCQA_INDEX`: path to the SQLite passage store
    /// - `TOP_K_CHUNKS`: neighbors requested per query
    /// - `RELEVANCE_THRESHOLD`: maximum relevance distance
    /// - `MIN_CHUNK_LENGTH`: minimum passage length in characters
    /// - `MAX_ANSWER_LENGTH`: maximum extractive answer length
    /// - `USE_OLLAMA`: `true` (default) to try generation first
    /// - `OLLAMA_URL`: base URL of the Ollama API
    /// - `OLLAMA_TEMPERATURE`, `OLLAMA_TOP_P`, `OLLAMA_MAX_TOKENS`,
    ///   `OLLAMA_REPEAT_PENALTY`, `OLLAMA_TIMEOUT`: decoding parameters
    ///
    /// A present-but-unparseable value is a configuration error rather
    /// than a silent fallback to the default.
    pub fn load() -> AppResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            index_path: std::env::var("DOCQA_INDEX")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_path),
            top_k: env_parse("TOP_K_CHUNKS", defaults.top_k)?,
            relevance_threshold: env_parse("RELEVANCE_THRESHOLD", defaults.relevance_threshold)?,
            min_passage_length: env_parse("MIN_CHUNK_LENGTH", defaults.min_passage_length)?,
            max_answer_length: env_parse("MAX_ANSWER_LENGTH", defaults.max_answer_length)?,
            use_ollama: env_flag("USE_OLLAMA", defaults.use_ollama),
            ollama_url: std::env::var("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            temperature: env_parse("OLLAMA_TEMPERATURE", defaults.temperature)?,
            top_p: env_parse("OLLAMA_TOP_P", defaults.top_p)?,
            max_tokens: env_parse("OLLAMA_MAX_TOKENS", defaults.max_tokens)?,
            repeat_penalty: env_parse("OLLAMA_REPEAT_PENALTY", defaults.repeat_penalty)?,
            timeout_secs: env_parse("OLLAMA_TIMEOUT", defaults.timeout_secs)?,
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn env_parse<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            AppError::Config(format!("Invalid value for {}: '{}'", name, value))
        }),
        Err(_) => Ok(default),
    }
}

/// Read a boolean flag: the literal `true` (case-insensitive) enables it,
/// anything else disables it.
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => value.eq_ignore_ascii_case("true"),
        Err(_) => default,
    }
}
