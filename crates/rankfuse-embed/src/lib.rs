//! rankfuse-embed
//!
//! Embedding backends and the admission-gated [`EmbeddingProvider`] that
//! fronts them. The real model process is an external collaborator; the
//! in-repo [`HashEmbedder`] is a deterministic stand-in used by the demo
//! binary and the test suites.

pub mod hashing;
pub mod provider;

pub use hashing::HashEmbedder;
pub use provider::EmbeddingProvider;

use std::sync::Arc;

use rankfuse_core::config::EmbeddingSettings;
use rankfuse_core::traits::Embedder;

/// Build the default embedding backend for the configured dimension.
pub fn default_embedder(settings: &EmbeddingSettings) -> Arc<dyn Embedder> {
    Arc::new(HashEmbedder::new(settings.dim))
}
