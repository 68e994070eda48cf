//! Domain types shared by the retriever, fusion, and rerank crates.

use serde::{Deserialize, Serialize};

pub type ChunkId = i64;
pub type DocumentId = i64;

/// Which retrieval paths a query exercises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Lexical,
    Semantic,
    Hybrid,
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryMode::Lexical => write!(f, "lexical"),
            QueryMode::Semantic => write!(f, "semantic"),
            QueryMode::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// A chunk record as stored in the corpus. Both backing stores index the
/// same records; the vector store additionally holds an embedding per chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk_id: ChunkId,
    pub document_id: DocumentId,
    pub content: String,
    pub source_title: Option<String>,
    pub source_url: Option<String>,
}

/// One retrieval hit before fusion or reranking.
///
/// `score` is store-native: lexical rank score for the text path, a
/// similarity derived from vector distance for the semantic path. Higher is
/// always better once a candidate leaves its retriever adapter. The same
/// chunk may surface on both paths; identity is `chunk_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub chunk_id: ChunkId,
    pub document_id: DocumentId,
    pub content: String,
    pub score: f32,
    pub source_title: Option<String>,
    pub source_url: Option<String>,
}

impl Candidate {
    pub fn from_record(record: ChunkRecord, score: f32) -> Self {
        Self {
            chunk_id: record.chunk_id,
            document_id: record.document_id,
            content: record.content,
            score,
            source_title: record.source_title,
            source_url: record.source_url,
        }
    }
}

/// A candidate after ranking. Exactly one of `fused_score` /
/// `reranker_score` is set, depending on which phase produced the result.
/// `original_score` always carries the store-native score unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub rank: usize,
    pub chunk_id: ChunkId,
    pub document_id: DocumentId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fused_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranker_score: Option<f32>,
    pub original_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RankedResult {
    pub fn fused(rank: usize, candidate: Candidate, fused_score: f64) -> Self {
        Self {
            rank,
            chunk_id: candidate.chunk_id,
            document_id: candidate.document_id,
            content: candidate.content,
            fused_score: Some(fused_score),
            reranker_score: None,
            original_score: candidate.score,
            source_title: candidate.source_title,
            source_url: candidate.source_url,
        }
    }

    pub fn reranked(rank: usize, candidate: Candidate, reranker_score: f32) -> Self {
        Self {
            rank,
            chunk_id: candidate.chunk_id,
            document_id: candidate.document_id,
            content: candidate.content,
            fused_score: None,
            reranker_score: Some(reranker_score),
            original_score: candidate.score,
            source_title: candidate.source_title,
            source_url: candidate.source_url,
        }
    }
}

/// Final answer for `query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub mode: QueryMode,
    pub results: Vec<RankedResult>,
    pub latency_ms: f64,
}

/// Final answer for `rerank`. Echoes the query back and carries the
/// summary counters callers rely on: `reranked_count` is how many
/// candidates were actually scored, `returned_count` the length after
/// truncation to `top_k`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankOutcome {
    pub query: String,
    pub results: Vec<RankedResult>,
    pub reranked_count: usize,
    pub returned_count: usize,
    pub latency_ms: f64,
}
