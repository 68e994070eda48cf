//! rankfuse-hybrid
//!
//! The hybrid query orchestrator: dispatches a query to the lexical path,
//! the semantic path, or both, joins the concurrent branches, fuses with
//! RRF, and returns the ranked top-k.

pub mod engine;

pub use engine::HybridQueryEngine;
