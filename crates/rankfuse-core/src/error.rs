//! Error taxonomy for the query and rerank pipelines.
//!
//! Every variant is terminal for the current request; the core never
//! retries internally. Hybrid queries fail whole: a single-branch failure
//! is surfaced as-is, never papered over with a single-mode result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request, rejected before any work starts.
    #[error("invalid request: {0}")]
    Validation(String),

    /// An underlying store (or the embedding backend feeding it) failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] anyhow::Error),

    /// A branch or scoring call exceeded its deadline.
    #[error("{stage} exceeded deadline of {deadline_ms} ms")]
    Timeout {
        stage: &'static str,
        deadline_ms: u64,
    },

    /// The cross-encoder scoring backend failed.
    #[error("rerank scoring failed: {0}")]
    Rerank(#[source] anyhow::Error),
}

impl Error {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
