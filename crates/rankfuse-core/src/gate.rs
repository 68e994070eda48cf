//! Bounded-concurrency admission gates for CPU-bound model work.
//!
//! A gate is a counting semaphore passed by handle into the orchestrator
//! and reranker, never a module-level singleton, so capacity stays
//! injectable in tests. Waiters are admitted in best-effort FIFO order.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Handle to a bounded pool of admission tickets.
#[derive(Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One occupied slot in a gate. Dropping the ticket frees the slot, so a
/// ticket held across an await is released on success, error, timeout, and
/// cancellation alike.
pub struct AdmissionTicket {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` concurrent holders.
    /// A capacity of zero is clamped to one; a gate that can never admit
    /// would deadlock every caller.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free. Primarily for tests and introspection.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a free slot. Blocks (asynchronously) until one opens; the
    /// gate is never closed in normal operation, so failure here means the
    /// process is shutting down.
    pub async fn admit(&self) -> anyhow::Result<AdmissionTicket> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| anyhow::anyhow!("admission gate closed"))?;
        Ok(AdmissionTicket { _permit: permit })
    }
}

impl std::fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("capacity", &self.capacity)
            .field("available", &self.available())
            .finish()
    }
}
