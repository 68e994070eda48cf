//! rankfuse-semantic
//!
//! Embedding-similarity retrieval: the adapter that fronts an opaque
//! vector store, plus an in-memory L2 store for tests and the demo binary.

pub mod memory;
pub mod retriever;

pub use memory::MemoryVectorStore;
pub use retriever::SemanticRetriever;
