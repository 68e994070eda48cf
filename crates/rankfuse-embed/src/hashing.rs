//! Deterministic hashing embedder.
//!
//! Buckets each whitespace token into the output vector by its xxHash64
//! value and L2-normalizes the result. Not a semantic model, but stable
//! across runs, which is what the demo corpus and the concurrency tests
//! need: identical text always maps to the identical vector.

use std::hash::{Hash, Hasher};

use rankfuse_core::traits::Embedder;
use twox_hash::XxHash64;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "embedding dimension must be positive");
        Self { dim }
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}
