//! Seams to the external collaborators: the two stores and the two models.
//!
//! Stores are opaque read-only search interfaces; model backends are pure
//! scoring functions. Implementations return `anyhow::Result` so adapters
//! can wrap the underlying cause into the core error taxonomy.

use async_trait::async_trait;

use crate::types::Candidate;

/// Full-text store. Results come back ordered by descending lexical score,
/// length at most `k`. A store failure must be propagated, never masked by
/// an empty list.
#[async_trait]
pub trait LexicalStore: Send + Sync {
    async fn lexical_search(&self, text: &str, k: usize) -> anyhow::Result<Vec<Candidate>>;
}

/// Vector store. `score` on returned candidates is the raw distance
/// (lower = closer); results come back ordered by ascending distance,
/// length at most `k`.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn semantic_search(&self, vector: &[f32], k: usize) -> anyhow::Result<Vec<Candidate>>;
}

/// Embedding model: pure function `text -> vector` of fixed dimension.
/// CPU-bound; callers are expected to dispatch through the admission-gated
/// provider rather than invoking this inline on a request task.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Cross-encoder model: one relevance scalar per (query, content) pair.
/// The score of a pair must not depend on the order or composition of the
/// rest of the candidate set.
pub trait CrossEncoder: Send + Sync {
    fn score(&self, query: &str, content: &str) -> anyhow::Result<f32>;
}
