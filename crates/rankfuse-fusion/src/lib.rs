//! rankfuse-fusion
//!
//! Reciprocal Rank Fusion over the lexical and semantic candidate lists.
//! Pure functions, no I/O; the orchestrator calls in after its join
//! barrier.

pub mod rrf;

pub use rrf::{fuse, FusedCandidate, RrfConfig};
