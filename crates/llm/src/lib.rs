//! Generation-service integration for docqa.
//!
//! Provides the client abstraction for the external generation service
//! (Ollama), the model-selection policy, and the primary generation path
//! with its explicit two-outcome result: an answer, or `Unavailable`.
//! Every service failure resolves to `Unavailable` — the pipeline then
//! falls back to extractive synthesis instead of surfacing an error.

pub mod client;
pub mod primary;
pub mod providers;
pub mod select;

// Re-export main types
pub use client::{GenerateRequest, LlmClient};
pub use primary::{generate_primary, Generation};
pub use providers::OllamaClient;
pub use select::select_model;
