//! rankfuse-lexical
//!
//! Keyword-path retrieval: the adapter that fronts an opaque full-text
//! store, plus an in-memory token-overlap store for tests and the demo
//! binary.

pub mod memory;
pub mod retriever;

pub use memory::MemoryTextStore;
pub use retriever::LexicalRetriever;
