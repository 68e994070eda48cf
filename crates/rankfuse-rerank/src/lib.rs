//! rankfuse-rerank
//!
//! Cross-encoder reranking behind a bounded admission gate. The scoring
//! model is an external collaborator reached through the [`CrossEncoder`]
//! trait; [`overlap::TokenOverlapEncoder`] is the in-repo backend used by
//! the demo binary and tests.
//!
//! [`CrossEncoder`]: rankfuse_core::traits::CrossEncoder

pub mod overlap;
pub mod reranker;

pub use overlap::TokenOverlapEncoder;
pub use reranker::Reranker;
