//! Deterministic trigram-hash embedding provider.
//!
//! Produces content-dependent vectors from character trigrams and word
//! hashes. Not semantically meaningful the way a neural model is, but
//! deterministic, offline, and consistent — the same text always maps
//! to the same unit vector, which makes it suitable for tests and for
//! corpora indexed without a running model server.

use crate::embeddings::Embedder;
use docqa_core::AppResult;
use std::collections::HashMap;

/// Trigram-hash embedding provider.
#[derive(Debug)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create a provider with the given output dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lower = text.to_lowercase();

        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in lower.split_whitespace().filter(|w| w.len() > 2) {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let mut hash = 0u64;
                for ch in window {
                    hash = hash.wrapping_mul(37).wrapping_add(*ch as u64);
                }
                vector[(hash as usize) % self.dimensions] += (*freq as f32).sqrt();
            }

            let word_hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
            vector[(word_hash as usize) % self.dimensions] += *freq as f32;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

#[async_trait::async_trait]
impl Embedder for HashEmbedder {
    fn provider_name(&self) -> &str {
        "hash"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.embed_text(text))
    }
}
