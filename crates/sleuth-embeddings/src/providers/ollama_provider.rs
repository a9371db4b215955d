//! Ollama local embedding provider.
//!
//! Talks to a local Ollama server (`/api/embed`). The default model,
//! `all-minilm`, is the MiniLM-L6 sentence-transformer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sleuth_core::errors::{EmbeddingError, SleuthResult};
use sleuth_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

/// Ollama local embedding provider.
///
/// Uses the blocking `reqwest` client; call it from a thread that may block
/// (the hint matcher runs it on tokio's blocking pool).
pub struct OllamaProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// `base_url` defaults to `http://localhost:11434` if `None`. The provider
    /// reports unavailable until [`OllamaProvider::health_check`] succeeds.
    pub fn new(model: String, dimensions: usize, base_url: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| "http://localhost:11434".to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            dimensions,
            available: AtomicBool::new(false),
        }
    }

    /// Check if the Ollama server is reachable.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send();

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    fn request_embeddings(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("Ollama returned {status}: {body}"),
            }
            .into());
        }

        let resp: OllamaEmbedResponse =
            response.json().map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama JSON parse error: {e}"),
            })?;

        let dims = self.dimensions;
        Ok(resp
            .embeddings
            .into_iter()
            .map(|mut v| {
                v.resize(dims, 0.0);
                v
            })
            .collect())
    }
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed(&self, text: &str) -> SleuthResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
