//! In-memory full-text store.
//!
//! Scores a chunk by the fraction of query tokens it contains, weighted by
//! term frequency. Good enough to exercise the pipeline end to end without
//! standing up a real text index; chunks with no matching token are not
//! returned at all.

use async_trait::async_trait;

use rankfuse_core::traits::LexicalStore;
use rankfuse_core::types::{Candidate, ChunkRecord};

pub struct MemoryTextStore {
    chunks: Vec<ChunkRecord>,
}

impl MemoryTextStore {
    pub fn new(chunks: Vec<ChunkRecord>) -> Self {
        Self { chunks }
    }

    fn score(query_tokens: &[String], content: &str) -> f32 {
        let content_lower = content.to_lowercase();
        let content_tokens: Vec<&str> = content_lower.split_whitespace().collect();
        if content_tokens.is_empty() {
            return 0.0;
        }
        let mut matched = 0usize;
        let mut occurrences = 0usize;
        for token in query_tokens {
            let count = content_tokens.iter().filter(|t| *t == token).count();
            if count > 0 {
                matched += 1;
                occurrences += count;
            }
        }
        if matched == 0 {
            return 0.0;
        }
        let coverage = matched as f32 / query_tokens.len() as f32;
        let tf = occurrences as f32 / content_tokens.len() as f32;
        coverage + tf
    }
}

#[async_trait]
impl LexicalStore for MemoryTextStore {
    async fn lexical_search(&self, text: &str, k: usize) -> anyhow::Result<Vec<Candidate>> {
        let query_tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if query_tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Candidate> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let score = Self::score(&query_tokens, &chunk.content);
                (score > 0.0).then(|| Candidate::from_record(chunk.clone(), score))
            })
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk_id.cmp(&b.chunk_id))
        });
        hits.truncate(k);
        Ok(hits)
    }
}
