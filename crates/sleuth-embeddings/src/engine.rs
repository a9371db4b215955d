//! EmbeddingEngine, the entry point for sleuth-embeddings.
//!
//! Coordinates provider selection, the fallback chain and the L1 cache.
//! Implements `IEmbeddingProvider`.

use sleuth_core::config::EmbeddingConfig;
use sleuth_core::errors::{EmbeddingError, SleuthResult};
use sleuth_core::models::DegradationEvent;
use sleuth_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::degradation::DegradationChain;
use crate::providers;

/// The main embedding engine.
///
/// Wraps provider selection, caching and fallback into a single provider.
/// Every batch it returns comes from one provider, so a hint and the
/// descriptions it is compared with always share a vector space.
pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create a new engine from configuration.
    ///
    /// The configured provider goes first; TF-IDF is appended as the last
    /// resort unless it already is the primary.
    pub fn new(config: EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        let primary = providers::create_provider(&config);
        let primary_is_tfidf = primary.name() == providers::TfIdfFallback::NAME;
        chain.push(primary);
        if !primary_is_tfidf {
            chain.push(Box::new(providers::TfIdfFallback::new(config.dimensions)));
        }
        Self::with_chain(chain, config)
    }

    /// Create an engine over an explicit provider chain.
    pub fn with_chain(chain: DegradationChain, config: EmbeddingConfig) -> Self {
        let cache = L1MemoryCache::new(config.l1_cache_size);

        info!(
            provider = chain.active_provider_name(),
            chain_len = chain.len(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );

        Self {
            chain,
            cache,
            config,
        }
    }

    /// Embed a batch with caching. Cached vectors are only reused when the
    /// provider that serves the misses is the one that produced them.
    fn embed_cached(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let active = self.chain.active_provider_name().to_string();
        let mut slots: Vec<Option<Vec<f32>>> = texts
            .iter()
            .map(|t| self.cache.get(&L1MemoryCache::key(&active, t)))
            .collect();

        let misses: Vec<String> = texts
            .iter()
            .zip(&slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(t, _)| t.clone())
            .collect();

        let hits = texts.len() - misses.len();
        if misses.is_empty() {
            debug!(provider = %active, hits, "embedding batch served from cache");
            return Ok(slots.into_iter().flatten().collect());
        }

        let (fresh, used) = self.chain.embed_batch(&misses, self.config.batch_size)?;
        let used = used.to_string();

        if used != active && hits > 0 {
            // Cached vectors belong to another space; redo the whole batch.
            debug!(cached = %active, used = %used, "provider changed, re-embedding batch");
            let (all, used) = self.chain.embed_batch(texts, self.config.batch_size)?;
            let used = used.to_string();
            self.validate(&all)?;
            for (text, vec) in texts.iter().zip(&all) {
                self.cache.insert(L1MemoryCache::key(&used, text), vec.clone());
            }
            return Ok(all);
        }

        self.validate(&fresh)?;
        let mut fresh = fresh.into_iter();
        for (text, slot) in texts.iter().zip(slots.iter_mut()) {
            if slot.is_none() {
                if let Some(vec) = fresh.next() {
                    self.cache.insert(L1MemoryCache::key(&used, text), vec.clone());
                    *slot = Some(vec);
                }
            }
        }

        debug!(provider = %used, hits, misses = misses.len(), "embedding batch complete");
        Ok(slots.into_iter().flatten().collect())
    }

    fn validate(&self, vecs: &[Vec<f32>]) -> SleuthResult<()> {
        match vecs.iter().find(|v| v.len() != self.config.dimensions) {
            Some(bad) => Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: bad.len(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Drain accumulated degradation events.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    /// Get the active provider name.
    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> SleuthResult<Vec<f32>> {
        self.embed_cached(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "empty embedding batch".to_string(),
                }
                .into()
            })
    }

    fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        self.embed_cached(texts)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "sleuth-embedding-engine"
    }

    fn is_available(&self) -> bool {
        self.chain.active_dimensions().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tfidf_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            provider: "tfidf".to_string(),
            dimensions: 128,
            ..Default::default()
        })
    }

    #[test]
    fn tfidf_primary_is_not_duplicated() {
        let engine = tfidf_engine();
        assert_eq!(engine.chain.len(), 1);
        assert_eq!(engine.active_provider(), "tfidf-fallback");
    }

    #[test]
    fn embed_returns_configured_dims() {
        let engine = tfidf_engine();
        assert_eq!(engine.embed("a poet").unwrap().len(), 128);
        assert!(engine.is_available());
    }

    #[test]
    fn repeated_text_hits_cache() {
        let engine = tfidf_engine();
        let texts = vec!["singer".to_string(), "actor".to_string()];
        let first = engine.embed_batch(&texts).unwrap();
        let second = engine.embed_batch(&texts).unwrap();
        assert_eq!(first, second);
        assert!(engine.cache.get(&L1MemoryCache::key("tfidf-fallback", "singer")).is_some());
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(tfidf_engine().embed_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(providers::TfIdfFallback::new(16)));
        let engine = EmbeddingEngine::with_chain(
            chain,
            EmbeddingConfig {
                dimensions: 32,
                ..Default::default()
            },
        );
        assert!(engine.embed("mismatch").is_err());
    }

    #[test]
    fn unknown_provider_falls_back_to_tfidf() {
        let engine = EmbeddingEngine::new(EmbeddingConfig {
            provider: "word2vec".to_string(),
            dimensions: 64,
            ..Default::default()
        });
        assert_eq!(engine.active_provider(), "tfidf-fallback");
    }
}
