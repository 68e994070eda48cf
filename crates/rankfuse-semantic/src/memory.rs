//! In-memory vector store using exact L2 distance.
//!
//! Holds one embedding per chunk and scans the lot on every search; fine
//! for fixture corpora, not a real index. Returned candidates carry the
//! raw distance in `score`, per the [`VectorStore`] contract.

use async_trait::async_trait;

use rankfuse_core::traits::VectorStore;
use rankfuse_core::types::{Candidate, ChunkRecord};

pub struct MemoryVectorStore {
    entries: Vec<(ChunkRecord, Vec<f32>)>,
}

impl MemoryVectorStore {
    /// Pair each chunk with its embedding. All embeddings must share one
    /// dimensionality; mixed lengths are a seeding bug.
    pub fn new(entries: Vec<(ChunkRecord, Vec<f32>)>) -> anyhow::Result<Self> {
        if let Some((_, first)) = entries.first() {
            let dim = first.len();
            for (record, vector) in &entries {
                if vector.len() != dim {
                    anyhow::bail!(
                        "chunk {} embedded with {} dims, expected {}",
                        record.chunk_id,
                        vector.len(),
                        dim
                    );
                }
            }
        }
        Ok(Self { entries })
    }

    fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn semantic_search(&self, vector: &[f32], k: usize) -> anyhow::Result<Vec<Candidate>> {
        if let Some((record, stored)) = self.entries.first() {
            if stored.len() != vector.len() {
                anyhow::bail!(
                    "query vector has {} dims, index built with {} (first chunk {})",
                    vector.len(),
                    stored.len(),
                    record.chunk_id
                );
            }
        }

        let mut hits: Vec<Candidate> = self
            .entries
            .iter()
            .map(|(record, stored)| {
                Candidate::from_record(record.clone(), Self::l2_distance(vector, stored))
            })
            .collect();
        hits.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.chunk_id.cmp(&b.chunk_id))
        });
        hits.truncate(k);
        Ok(hits)
    }
}
