//! Provider registry.
//!
//! Priority order:
//! 1. Ollama (local server, sentence-embedding model)
//! 2. TF-IDF (always available, lowest quality)

pub mod ollama_provider;
pub mod tfidf_fallback;

pub use ollama_provider::OllamaProvider;
pub use tfidf_fallback::TfIdfFallback;

use sleuth_core::config::EmbeddingConfig;
use sleuth_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Create the configured provider, falling back to TF-IDF when it cannot be
/// reached or the name is unknown.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "ollama" => {
            let provider = OllamaProvider::new(
                config.model.clone(),
                config.dimensions,
                Some(config.base_url.clone()),
            );
            if provider.health_check() {
                info!(provider = "ollama", model = %config.model, "embedding provider connected");
                Box::new(provider)
            } else {
                warn!("Ollama unavailable, falling back to TF-IDF");
                Box::new(TfIdfFallback::new(config.dimensions))
            }
        }
        "tfidf" => {
            info!(provider = "tfidf", "using TF-IDF embedding provider");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
        other => {
            warn!(provider = other, "unknown provider, using TF-IDF fallback");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
    }
}
