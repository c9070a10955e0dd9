//! Corpus type definitions.

use serde::{Deserialize, Serialize};

/// One unit of previously ingested document text, addressable by
/// ordinal id. Read-only to the answering core; rows are created by the
/// ingestion side through [`crate::store::PassageStore`]'s write API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Ordinal position in the index
    pub id: i64,

    /// Passage text as stored at ingestion time
    pub text: String,

    /// Optional source label (e.g., originating document name)
    pub source: Option<String>,
}

/// A passage surfaced by the vector index for one query, paired with
/// its relevance distance (lower = more similar). Created per query and
/// discarded after the pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedPassage {
    /// Normalized passage text
    pub text: String,

    /// Non-negative relevance distance from the vector index
    pub distance: f32,
}

/// Embedding configuration recorded in the store at ingestion time.
///
/// The query side must embed with the same provider and model that
/// produced the stored vectors, so the store carries this alongside the
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingMeta {
    /// Provider name ("hash" or "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,
}

/// How the final answer was produced. Diagnostic only — logged, never
/// part of the returned payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Produced by the generation service
    Generated,

    /// Produced by the extractive fallback synthesizer
    Extractive,

    /// A fixed informative message (no qualifying passages)
    Canned,
}

impl AnswerSource {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Extractive => "extractive",
            Self::Canned => "canned",
        }
    }
}

/// The final answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Answer text
    pub text: String,

    /// Provenance, for diagnostics only
    pub source: AnswerSource,
}
