//! Hybrid query orchestration.
//!
//! Hybrid mode runs lexical retrieval and embed-then-semantic retrieval as
//! two concurrent branches under independent deadlines, joins both, and
//! only then fuses. The failure policy is all-or-nothing: if either branch
//! errors or times out, the whole query fails and no single-mode result is
//! substituted, since RRF is undefined with one list missing. Any embedding
//! ticket held by a cancelled branch is returned to its gate when the
//! branch future drops.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use rankfuse_core::config::Settings;
use rankfuse_core::error::{Error, Result};
use rankfuse_core::types::{Candidate, QueryMode, QueryResponse, RankedResult};
use rankfuse_embed::EmbeddingProvider;
use rankfuse_fusion::{fuse, RrfConfig};
use rankfuse_lexical::LexicalRetriever;
use rankfuse_semantic::SemanticRetriever;

pub struct HybridQueryEngine {
    lexical: LexicalRetriever,
    semantic: SemanticRetriever,
    embedder: EmbeddingProvider,
    fusion: RrfConfig,
    branch_timeout: Duration,
}

impl HybridQueryEngine {
    pub fn new(
        lexical: LexicalRetriever,
        semantic: SemanticRetriever,
        embedder: EmbeddingProvider,
        settings: &Settings,
    ) -> Self {
        Self {
            lexical,
            semantic,
            embedder,
            fusion: RrfConfig {
                k: settings.fusion.rrf_k,
            },
            branch_timeout: Duration::from_millis(settings.query.branch_timeout_ms),
        }
    }

    /// Gate handle used by the semantic path, exposed for observation.
    pub fn embedding_gate(&self) -> &rankfuse_core::gate::AdmissionGate {
        self.embedder.gate()
    }

    /// Answer `text` in the requested mode, returning at most `k` results
    /// ranked 1..n.
    pub async fn query(&self, text: &str, mode: QueryMode, k: usize) -> Result<QueryResponse> {
        if text.trim().is_empty() {
            return Err(Error::Validation("query must not be blank".to_string()));
        }
        if k == 0 {
            return Err(Error::Validation("k must be positive".to_string()));
        }

        let started = Instant::now();
        let results = match mode {
            QueryMode::Lexical => {
                let hits = self
                    .deadline("lexical retrieval", self.lexical.search(text, k))
                    .await?;
                Self::rank_single(hits)
            }
            QueryMode::Semantic => {
                let hits = self
                    .deadline("semantic retrieval", self.semantic_branch(text, k))
                    .await?;
                Self::rank_single(hits)
            }
            QueryMode::Hybrid => self.hybrid(text, k).await?,
        };

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            %mode,
            k,
            returned = results.len(),
            latency_ms,
            "query complete"
        );
        Ok(QueryResponse {
            mode,
            results,
            latency_ms,
        })
    }

    /// Embed the query under the admission gate, then search the vector
    /// store. One branch of hybrid mode; the whole semantic path in
    /// semantic mode.
    async fn semantic_branch(&self, text: &str, k: usize) -> Result<Vec<Candidate>> {
        let vector = self.embedder.embed(text).await?;
        self.semantic.search(&vector, k).await
    }

    async fn hybrid(&self, text: &str, k: usize) -> Result<Vec<RankedResult>> {
        // Both branches start together; try_join! is the join barrier and
        // drops the surviving branch as soon as the other fails.
        let (lexical_hits, semantic_hits) = tokio::try_join!(
            self.deadline("lexical branch", self.lexical.search(text, k)),
            self.deadline("semantic branch", self.semantic_branch(text, k)),
        )?;
        debug!(
            lexical = lexical_hits.len(),
            semantic = semantic_hits.len(),
            "hybrid branches joined"
        );

        let fused = fuse(&lexical_hits, &semantic_hits, k, &self.fusion);
        Ok(fused
            .into_iter()
            .enumerate()
            .map(|(i, f)| RankedResult::fused(i + 1, f.candidate, f.fused_score))
            .collect())
    }

    /// Single-mode ranking: the adapter already ordered the hits, so ranks
    /// follow list position and the store-native score doubles as the
    /// ranking score.
    fn rank_single(hits: Vec<Candidate>) -> Vec<RankedResult> {
        hits.into_iter()
            .enumerate()
            .map(|(i, candidate)| {
                let score = f64::from(candidate.score);
                RankedResult::fused(i + 1, candidate, score)
            })
            .collect()
    }

    async fn deadline<T>(
        &self,
        stage: &'static str,
        fut: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.branch_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                stage,
                deadline_ms: self.branch_timeout.as_millis() as u64,
            }),
        }
    }
}
