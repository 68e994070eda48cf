//! Token-overlap cross-encoder.
//!
//! Scores a (query, content) pair by the fraction of query tokens present
//! in the content. A crude proxy for a learned cross-encoder, but it is a
//! genuine pure pairwise function: the score never depends on the other
//! candidates in the batch, which is the invariant the reranker relies on.

use rankfuse_core::traits::CrossEncoder;

pub struct TokenOverlapEncoder;

impl CrossEncoder for TokenOverlapEncoder {
    fn score(&self, query: &str, content: &str) -> anyhow::Result<f32> {
        let query_lower = query.to_lowercase();
        let query_tokens: Vec<&str> = query_lower.split_whitespace().collect();
        if query_tokens.is_empty() {
            return Ok(0.0);
        }
        let content_lower = content.to_lowercase();
        let matched = query_tokens
            .iter()
            .filter(|t| content_lower.contains(**t))
            .count();
        Ok(matched as f32 / query_tokens.len() as f32)
    }
}
