//! Fallback chain for embedding generation.
//!
//! Providers are tried in priority order. A batch is always served entirely
//! by one provider, so every vector of a single request shares one space.
//! Every fallback is recorded as a `DegradationEvent`.

use std::sync::Mutex;

use chrono::Utc;
use sleuth_core::errors::{EmbeddingError, SleuthResult};
use sleuth_core::models::DegradationEvent;
use sleuth_core::traits::IEmbeddingProvider;
use tracing::warn;

pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed `texts` in chunks of at most `chunk_size`, all with the same
    /// provider. A provider failing on any chunk is abandoned and the whole
    /// batch moves to the next one.
    ///
    /// Returns the vectors and the name of the provider that produced them.
    pub fn embed_batch(
        &self,
        texts: &[String],
        chunk_size: usize,
    ) -> SleuthResult<(Vec<Vec<f32>>, &str)> {
        let chunk_size = chunk_size.max(1);
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }

            match embed_with(provider.as_ref(), texts, chunk_size) {
                Ok(vecs) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((vecs, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "batch embed failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    fn record_fallback(&self, fallback: &str) {
        let primary_name = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
        if let Ok(mut events) = self.events.lock() {
            events.push(DegradationEvent {
                component: "embeddings".to_string(),
                failure: format!("{primary_name} unavailable"),
                fallback_used: fallback.to_string(),
                timestamp: Utc::now(),
            });
        }
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Dimensions of the first available provider.
    pub fn active_dimensions(&self) -> Option<usize> {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.dimensions())
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Embed every chunk with one provider, or fail as a whole.
fn embed_with(
    provider: &dyn IEmbeddingProvider,
    texts: &[String],
    chunk_size: usize,
) -> SleuthResult<Vec<Vec<f32>>> {
    let mut out = Vec::with_capacity(texts.len());
    for chunk in texts.chunks(chunk_size) {
        let vecs = provider.embed_batch(chunk)?;
        if vecs.len() != chunk.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "{} returned {} vectors for {} texts",
                    provider.name(),
                    vecs.len(),
                    chunk.len()
                ),
            }
            .into());
        }
        out.extend(vecs);
    }
    Ok(out)
}
