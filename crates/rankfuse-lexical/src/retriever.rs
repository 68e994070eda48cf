//! Adapter over a [`LexicalStore`].
//!
//! The store is trusted for relevance but not for ordering discipline:
//! the adapter re-sorts descending by score with ties broken by ascending
//! chunk id, so downstream fusion sees a fully deterministic list.

use std::sync::Arc;

use tracing::debug;

use rankfuse_core::error::{Error, Result};
use rankfuse_core::traits::LexicalStore;
use rankfuse_core::types::Candidate;

#[derive(Clone)]
pub struct LexicalRetriever {
    store: Arc<dyn LexicalStore>,
}

impl LexicalRetriever {
    pub fn new(store: Arc<dyn LexicalStore>) -> Self {
        Self { store }
    }

    /// Top-k keyword matches, strictly ordered. A store failure surfaces
    /// as [`Error::Retrieval`] carrying the cause; it is never masked by
    /// an empty result.
    pub async fn search(&self, text: &str, k: usize) -> Result<Vec<Candidate>> {
        let mut hits = self
            .store
            .lexical_search(text, k)
            .await
            .map_err(Error::Retrieval)?;

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk_id.cmp(&b.chunk_id))
        });
        hits.truncate(k);
        debug!(hits = hits.len(), k, "lexical retrieval complete");
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
    impl LexicalStore for ScriptedStore {
        async fn lexical_search(&self, _text: &str, _k: usize) -> anyhow::Result<Vec<Candidate>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl LexicalStore for BrokenStore {
        async fn lexical_search(&self, _text: &str, _k: usize) -> anyhow::Result<Vec<Candidate>> {
            anyhow::bail!("index unavailable")
        }
    }

    fn candidate(chunk_id: i64, score: f32) -> Candidate {
        Candidate::from_record(
            ChunkRecord {
                chunk_id,
                document_id: 1,
                content: format!("chunk {chunk_id}"),
                source_title: None,
                source_url: None,
            },
            score,
        )
    }

    #[tokio::test]
    async fn reorders_sloppy_store_output() {
        let store = ScriptedStore(vec![
            candidate(5, 0.2),
            candidate(9, 0.9),
            candidate(3, 0.2),
        ]);
        let retriever = LexicalRetriever::new(Arc::new(store));
        let hits = retriever.search("anything", 10).await.expect("search");
        let ids: Vec<i64> = hits.iter().map(|h| h.chunk_id).collect();
        assert_eq!(ids, vec![9, 3, 5], "score desc, chunk_id asc on ties");
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let retriever = LexicalRetriever::new(Arc::new(BrokenStore));
        let err = retriever.search("anything", 3).await.expect_err("fails");
        assert!(matches!(err, Error::Retrieval(_)));
    }
}
