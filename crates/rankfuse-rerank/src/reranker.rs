//! Admission-gated cross-encoder reranking.
//!
//! Validation happens before a ticket is taken: an oversized candidate set
//! is rejected with zero scoring calls. Scoring itself is CPU-bound and
//! runs on the blocking pool while the caller holds one gate ticket; the
//! ticket is dropped before the results are assembled, so backend errors
//! and cancellations free the slot for the next waiter.

use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use tracing::{info, warn};

use rankfuse_core::error::{Error, Result};
use rankfuse_core::gate::AdmissionGate;
use rankfuse_core::traits::CrossEncoder;
use rankfuse_core::types::{Candidate, RankedResult, RerankOutcome};

#[derive(Clone)]
pub struct Reranker {
    encoder: Arc<dyn CrossEncoder>,
    gate: AdmissionGate,
    max_candidates: usize,
}

impl Reranker {
    pub fn new(encoder: Arc<dyn CrossEncoder>, gate: AdmissionGate, max_candidates: usize) -> Self {
        Self {
            encoder,
            gate,
            max_candidates,
        }
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// One tiny scoring call so the first real request does not pay model
    /// spin-up. Failure is logged, not fatal; the service still starts.
    pub async fn warmup(&self) {
        let encoder = Arc::clone(&self.encoder);
        let outcome =
            tokio::task::spawn_blocking(move || encoder.score("warmup", "warmup document")).await;
        match outcome {
            Ok(Ok(_)) => info!("reranker warmup complete"),
            Ok(Err(e)) => warn!("reranker warmup failed: {e}"),
            Err(e) => warn!("reranker warmup task failed: {e}"),
        }
    }

    /// Re-score `candidates` against `query` and return the top
    /// `min(top_k, candidates.len())` by cross-encoder score.
    ///
    /// Ties keep the candidates' input order; ranks are contiguous
    /// 1..=returned_count; `original_score` passes through untouched.
    pub async fn rerank(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
        top_k: usize,
    ) -> Result<RerankOutcome> {
        if query.trim().is_empty() {
            return Err(Error::Validation("query must not be blank".to_string()));
        }
        if candidates.is_empty() {
            return Err(Error::Validation(
                "candidate set must not be empty".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(Error::Validation("top_k must be positive".to_string()));
        }
        if candidates.len() > self.max_candidates {
            return Err(Error::Validation(format!(
                "too many candidates: got {}, max {}",
                candidates.len(),
                self.max_candidates
            )));
        }

        let started = Instant::now();
        let ticket = self.gate.admit().await.map_err(Error::Rerank)?;

        let encoder = Arc::clone(&self.encoder);
        let owned_query = query.to_string();
        let contents: Vec<String> = candidates.iter().map(|c| c.content.clone()).collect();
        let outcome = tokio::task::spawn_blocking(move || {
            contents
                .iter()
                .map(|content| encoder.score(&owned_query, content))
                .collect::<anyhow::Result<Vec<f32>>>()
        })
        .await;
        drop(ticket);

        let scores = match outcome {
            Ok(Ok(scores)) => scores,
            Ok(Err(e)) => return Err(Error::Rerank(e)),
            Err(join) => return Err(Error::Rerank(anyhow!("scoring task panicked: {join}"))),
        };

        let reranked_count = candidates.len();
        let returned_count = top_k.min(reranked_count);
        let mut scored: Vec<(Candidate, f32)> = candidates.into_iter().zip(scores).collect();
        // Stable sort: candidates with equal scores stay in input order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let results: Vec<RankedResult> = scored
            .into_iter()
            .take(returned_count)
            .enumerate()
            .map(|(i, (candidate, score))| RankedResult::reranked(i + 1, candidate, score))
            .collect();

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            reranked = reranked_count,
            returned = returned_count,
            latency_ms,
            "rerank complete"
        );
        Ok(RerankOutcome {
            query: query.to_string(),
            results,
            reranked_count,
            returned_count,
            latency_ms,
        })
    }
}
