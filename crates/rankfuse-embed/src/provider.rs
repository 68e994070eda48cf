//! Admission-gated front-end over an [`Embedder`] backend.
//!
//! Embedding is CPU-bound, so each call first takes a ticket from the
//! gate and then runs the backend on the blocking pool. The ticket lives
//! in the call's future: success, backend error, deadline expiry, and
//! cancellation all return it to the gate.

use std::sync::Arc;

use anyhow::anyhow;
use tracing::debug;

use rankfuse_core::error::{Error, Result};
use rankfuse_core::gate::AdmissionGate;
use rankfuse_core::traits::Embedder;

#[derive(Clone)]
pub struct EmbeddingProvider {
    backend: Arc<dyn Embedder>,
    gate: AdmissionGate,
}

impl EmbeddingProvider {
    pub fn new(backend: Arc<dyn Embedder>, gate: AdmissionGate) -> Self {
        Self { backend, gate }
    }

    pub fn dim(&self) -> usize {
        self.backend.dim()
    }

    /// Handle to the gate this provider admits through, for callers that
    /// need to size or observe it (tests, capacity reporting).
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Embed one query text. Waits for a gate ticket when the gate is
    /// saturated, in best-effort FIFO order.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let ticket = self.gate.admit().await.map_err(Error::Retrieval)?;

        let backend = Arc::clone(&self.backend);
        let owned = text.to_string();
        let outcome = tokio::task::spawn_blocking(move || backend.embed(&owned)).await;
        drop(ticket);

        let vector = match outcome {
            Ok(Ok(vector)) => vector,
            Ok(Err(e)) => return Err(Error::Retrieval(e)),
            Err(join) => return Err(Error::Retrieval(anyhow!("embedding task panicked: {join}"))),
        };

        if vector.len() != self.backend.dim() {
            return Err(Error::Retrieval(anyhow!(
                "embedding backend produced {} dims, expected {}",
                vector.len(),
                self.backend.dim()
            )));
        }
        debug!(dim = vector.len(), "embedded query text");
        Ok(vector)
    }
}
