//! Reciprocal Rank Fusion.
//!
//! Each candidate contributes `1 / (K + rank)` per list it appears in,
//! rank 1 = best within that list. A chunk surfacing on both paths sums
//! both terms, which rewards cross-method consensus. Fusing ranks instead
//! of raw scores sidesteps normalization entirely: lexical rank scores and
//! vector similarities live on incomparable scales, and either subsystem
//! may change its scoring function without touching fusion.

use std::collections::HashMap;

use tracing::debug;

use rankfuse_core::types::{Candidate, ChunkId};

const DEFAULT_RRF_K: f64 = 60.0;

/// RRF parameters. `k` is the smoothing constant: higher flattens the
/// rank-score curve, lower sharpens the value of top ranks. K=60 is the
/// value from Cormack et al. (2009) and the default everywhere.
#[derive(Debug, Clone)]
pub struct RrfConfig {
    pub k: f64,
}

impl Default for RrfConfig {
    fn default() -> Self {
        Self { k: DEFAULT_RRF_K }
    }
}

impl RrfConfig {
    fn sanitized_k(&self) -> f64 {
        if self.k.is_finite() && self.k >= 0.0 {
            self.k
        } else {
            DEFAULT_RRF_K
        }
    }
}

/// A deduplicated candidate with its accumulated fused score and the
/// 1-based rank it held in each contributing list.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub candidate: Candidate,
    pub fused_score: f64,
    pub lexical_rank: Option<usize>,
    pub semantic_rank: Option<usize>,
}

impl FusedCandidate {
    /// Best rank across the contributing lists; used as the first
    /// tie-break when fused scores collide.
    fn best_rank(&self) -> usize {
        match (self.lexical_rank, self.semantic_rank) {
            (Some(l), Some(s)) => l.min(s),
            (Some(l), None) => l,
            (None, Some(s)) => s,
            (None, None) => usize::MAX,
        }
    }
}

/// Fuse two ranked candidate lists and keep the top `limit`.
///
/// Both inputs must already be ordered best-first (the retriever adapters
/// guarantee this). Ordering of the output is fully deterministic:
/// fused score descending, then smaller contributing rank, then ascending
/// chunk id. Passing the lists in either order produces the same scores
/// and the same final order.
pub fn fuse(
    lexical: &[Candidate],
    semantic: &[Candidate],
    limit: usize,
    config: &RrfConfig,
) -> Vec<FusedCandidate> {
    let k = config.sanitized_k();
    let mut by_id: HashMap<ChunkId, FusedCandidate> =
        HashMap::with_capacity(lexical.len() + semantic.len());

    for (i, candidate) in lexical.iter().enumerate() {
        let rank = i + 1;
        let contribution = 1.0 / (k + rank as f64);
        by_id
            .entry(candidate.chunk_id)
            .and_modify(|fused| {
                fused.fused_score += contribution;
                fused.lexical_rank = Some(rank);
            })
            .or_insert_with(|| FusedCandidate {
                candidate: candidate.clone(),
                fused_score: contribution,
                lexical_rank: Some(rank),
                semantic_rank: None,
            });
    }

    for (i, candidate) in semantic.iter().enumerate() {
        let rank = i + 1;
        let contribution = 1.0 / (k + rank as f64);
        by_id
            .entry(candidate.chunk_id)
            .and_modify(|fused| {
                fused.fused_score += contribution;
                fused.semantic_rank = Some(rank);
            })
            .or_insert_with(|| FusedCandidate {
                candidate: candidate.clone(),
                fused_score: contribution,
                lexical_rank: None,
                semantic_rank: Some(rank),
            });
    }

    let mut fused: Vec<FusedCandidate> = by_id.into_values().collect();
    fused.sort_by(|a, b| {
        b.fused_score
            .total_cmp(&a.fused_score)
            .then_with(|| a.best_rank().cmp(&b.best_rank()))
            .then_with(|| a.candidate.chunk_id.cmp(&b.candidate.chunk_id))
    });
    fused.truncate(limit);
    debug!(
        lexical = lexical.len(),
        semantic = semantic.len(),
        fused = fused.len(),
        "rrf fusion complete"
    );
    fused
}
