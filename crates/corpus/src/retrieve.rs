//! Threshold-filtered passage retrieval.

use crate::embeddings::Embedder;
use crate::index::VectorIndex;
use crate::store::PassageStore;
use crate::types::RetrievedPassage;
use docqa_core::{normalize, AppResult};
use std::sync::Arc;

/// Retrieval engine: embeds a question and surfaces the most relevant
/// stored passages.
pub struct Retriever {
    store: PassageStore,
    index: Box<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
    relevance_threshold: f32,
    min_passage_length: usize,
}

impl Retriever {
    /// Assemble a retriever over an opened store and loaded index.
    pub fn new(
        store: PassageStore,
        index: Box<dyn VectorIndex>,
        embedder: Arc<dyn Embedder>,
        top_k: usize,
        relevance_threshold: f32,
        min_passage_length: usize,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
            top_k,
            relevance_threshold,
            min_passage_length,
        }
    }

    /// Retrieve the passages most relevant to `question`, ascending by
    /// distance.
    ///
    /// Neighbors whose id has no stored passage are silently skipped —
    /// an index/store size mismatch is not fatal. Passages shorter than
    /// the minimum length, or at or beyond the relevance threshold, are
    /// dropped. An empty result is valid and means "no sufficiently
    /// relevant context".
    pub async fn retrieve(&self, question: &str) -> AppResult<Vec<RetrievedPassage>> {
        let query = normalize(question);
        let query_vector = self.embedder.embed(&query).await?;

        let neighbors = self.index.search(&query_vector, self.top_k)?;
        tracing::debug!("Retrieved {} neighbors before filtering", neighbors.len());

        let mut hits = Vec::new();
        for (id, distance) in neighbors {
            let Some(passage) = self.store.passage(id)? else {
                tracing::debug!("Neighbor id {} has no stored passage, skipping", id);
                continue;
            };

            let text = normalize(&passage.text);
            if text.chars().count() < self.min_passage_length {
                continue;
            }

            if distance < self.relevance_threshold {
                hits.push(RetrievedPassage { text, distance });
            }
        }

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::info!(
            "{} passages passed the relevance threshold ({:.2})",
            hits.len(),
            self.relevance_threshold
        );

        Ok(hits)
    }
}
