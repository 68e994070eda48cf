//! Adapter over a [`VectorStore`].
//!
//! The store speaks distances (lower = closer); everything downstream of
//! the adapters speaks relevance (higher = better). The adapter converts
//! each hit's distance to `1 / (1 + distance)`, which preserves ordering,
//! then re-sorts descending with ties broken by ascending chunk id.

use std::sync::Arc;

use tracing::debug;

use rankfuse_core::error::{Error, Result};
use rankfuse_core::traits::VectorStore;
use rankfuse_core::types::Candidate;

#[derive(Clone)]
pub struct SemanticRetriever {
    store: Arc<dyn VectorStore>,
}

impl SemanticRetriever {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Top-k nearest chunks for a query vector, scored as similarities.
    /// Store failures surface as [`Error::Retrieval`] with the cause.
    pub async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<Candidate>> {
        let hits = self
            .store
            .semantic_search(vector, k)
            .await
            .map_err(Error::Retrieval)?;

        let mut hits: Vec<Candidate> = hits
            .into_iter()
            .map(|mut c| {
                c.score = 1.0 / (1.0 + c.score.max(0.0));
                c
            })
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk_id.cmp(&b.chunk_id))
        });
        hits.truncate(k);
        debug!(hits = hits.len(), k, "semantic retrieval complete");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rankfuse_core::types::ChunkRecord;

    struct ScriptedStore(Vec<Candidate>);

    #[async_trait]
    impl VectorStore for ScriptedStore {
        async fn semantic_search(&self, _v: &[f32], _k: usize) -> anyhow::Result<Vec<Candidate>> {
            Ok(self.0.clone())
        }
    }

    fn at_distance(chunk_id: i64, distance: f32) -> Candidate {
        Candidate::from_record(
            ChunkRecord {
                chunk_id,
                document_id: 1,
                content: format!("chunk {chunk_id}"),
                source_title: None,
                source_url: None,
            },
            distance,
        )
    }

    #[tokio::test]
    async fn closest_hit_ranks_first() {
        let store = ScriptedStore(vec![
            at_distance(4, 0.8),
            at_distance(2, 0.1),
            at_distance(6, 0.8),
        ]);
        let retriever = SemanticRetriever::new(Arc::new(store));
        let hits = retriever.search(&[0.0; 4], 10).await.expect("search");
        let ids: Vec<i64> = hits.iter().map(|h| h.chunk_id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
        assert!(hits[0].score > hits[1].score);
        // Equal distances convert to equal similarities; chunk_id decides.
        assert!((hits[1].score - hits[2].score).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        struct BrokenStore;

        #[async_trait]
        impl VectorStore for BrokenStore {
            async fn semantic_search(
                &self,
                _v: &[f32],
                _k: usize,
            ) -> anyhow::Result<Vec<Candidate>> {
                anyhow::bail!("vector index offline")
            }
        }

        let retriever = SemanticRetriever::new(Arc::new(BrokenStore));
        let err = retriever.search(&[0.0; 4], 3).await.expect_err("fails");
        assert!(matches!(err, Error::Retrieval(_)));
    }
}
