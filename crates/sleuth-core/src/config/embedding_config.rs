use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "ollama" or "tfidf".
    pub provider: String,
    /// Model name requested from the provider.
    pub model: String,
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// Maximum texts per provider batch call.
    pub batch_size: usize,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: defaults::DEFAULT_OLLAMA_URL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}
