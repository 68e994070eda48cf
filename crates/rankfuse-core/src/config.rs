//! Configuration loading.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` (selected by
//! `RUST_ENV`) + `APP_*` environment variables into a typed [`Settings`].
//! Nested keys use a double underscore in the environment, e.g.
//! `APP_RERANK__MAX_CANDIDATES=200`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub embedding: EmbeddingSettings,
    pub rerank: RerankSettings,
    pub fusion: FusionSettings,
    pub query: QuerySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Output dimensionality the embedding backend must produce.
    pub dim: usize,
    /// Gate capacity for concurrent embedding calls. Embedding is
    /// CPU-bound: capacity 1 serializes every query, unbounded thrashes
    /// the cores, so the default leaves one core of headroom.
    pub concurrency: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            dim: 384,
            concurrency: num_cpus::get().saturating_sub(1).max(1),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RerankSettings {
    /// Gate capacity for concurrent cross-encoder calls.
    pub concurrency: usize,
    /// Hard cap on the candidate set size accepted per rerank call.
    pub max_candidates: usize,
}

impl Default for RerankSettings {
    fn default() -> Self {
        Self {
            concurrency: 2,
            max_candidates: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FusionSettings {
    /// RRF smoothing constant K.
    pub rrf_k: f64,
}

impl Default for FusionSettings {
    fn default() -> Self {
        Self { rrf_k: 60.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Result count when the caller does not specify k.
    pub default_k: usize,
    /// Per-branch deadline inside a query, in milliseconds.
    pub branch_timeout_ms: u64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_k: 5,
            branch_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let settings: Settings = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("failed to load settings: {e}"))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.embedding.dim == 0 {
            anyhow::bail!("embedding.dim must be positive");
        }
        if self.rerank.max_candidates == 0 {
            anyhow::bail!("rerank.max_candidates must be positive");
        }
        if self.query.default_k == 0 {
            anyhow::bail!("query.default_k must be positive");
        }
        if !self.fusion.rrf_k.is_finite() || self.fusion.rrf_k < 0.0 {
            anyhow::bail!("fusion.rrf_k must be finite and non-negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.embedding.dim, 384);
        assert!(settings.embedding.concurrency >= 1);
        assert_eq!(settings.rerank.concurrency, 2);
        assert_eq!(settings.rerank.max_candidates, 100);
        assert!((settings.fusion.rrf_k - 60.0).abs() < f64::EPSILON);
        assert_eq!(settings.query.branch_timeout_ms, 30_000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_dim_is_rejected() {
        let mut settings = Settings::default();
        settings.embedding.dim = 0;
        assert!(settings.validate().is_err());
    }
}
