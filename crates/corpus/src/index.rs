//! Vector index for nearest-neighbor lookup.
//!
//! The index is consumed as a black box behind [`VectorIndex`]: a query
//! vector and a k produce an ordered list of (passage id, distance).
//! The bundled implementation is a flat scan over the vectors stored
//! alongside the passages.

use crate::store::PassageStore;
use docqa_core::AppResult;

/// Trait for nearest-neighbor backends.
pub trait VectorIndex: Send + Sync {
    /// Return the `top_k` nearest neighbors to `query` as
    /// (passage id, distance) pairs, ascending by distance.
    fn search(&self, query: &[f32], top_k: usize) -> AppResult<Vec<(i64, f32)>>;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    /// Whether the index holds no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flat (exhaustive) index over the store's embedding vectors, using
/// squared L2 distance.
pub struct FlatIndex {
    vectors: Vec<(i64, Vec<f32>)>,
}

impl FlatIndex {
    /// Load every embedding from the store. Malformed embedding blobs
    /// surface here as fatal index errors.
    pub fn load(store: &PassageStore) -> AppResult<Self> {
        let vectors = store.vectors()?;
        tracing::debug!("Loaded {} vectors into flat index", vectors.len());
        Ok(Self { vectors })
    }
}

impl VectorIndex for FlatIndex {
    fn search(&self, query: &[f32], top_k: usize) -> AppResult<Vec<(i64, f32)>> {
        let mut scored: Vec<(i64, f32)> = self
            .vectors
            .iter()
            .map(|(id, vector)| (*id, squared_l2(query, vector)))
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        tracing::debug!(
            "Index search returned {} neighbors (requested top-{})",
            scored.len(),
            top_k
        );

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}

/// Squared Euclidean distance between two vectors. A dimension mismatch
/// yields an infinite distance, so the vector can never pass a
/// relevance threshold.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
