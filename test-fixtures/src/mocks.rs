//! Mock embedding providers.

use std::sync::Mutex;

use sleuth_core::errors::{EmbeddingError, SleuthResult};
use sleuth_core::traits::IEmbeddingProvider;

/// Embeds text as a keyword-presence vector.
///
/// Dimension `i` is 1.0 when keyword `i` occurs in the lowercased text; a
/// final constant dimension keeps every vector non-zero. Texts sharing
/// keywords are therefore more similar, which makes ranking outcomes easy to
/// control from a test.
pub struct KeywordProvider {
    keywords: Vec<String>,
}

impl KeywordProvider {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = self
            .keywords
            .iter()
            .map(|k| if lower.contains(k.as_str()) { 1.0 } else { 0.0 })
            .collect();
        v.push(0.1);
        v
    }
}

impl IEmbeddingProvider for KeywordProvider {
    fn embed(&self, text: &str) -> SleuthResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.keywords.len() + 1
    }

    fn name(&self) -> &str {
        "keyword-mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Records every batch it is asked to embed, delegating to a
/// [`KeywordProvider`] for the vectors.
pub struct RecordingProvider {
    inner: KeywordProvider,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingProvider {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            inner: KeywordProvider::new(keywords),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every recorded call, oldest first. Single embeds appear as one-text batches.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// First text of every recorded call (the hint in a ranking request).
    pub fn first_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|batch| batch.into_iter().next())
            .collect()
    }

    fn record(&self, texts: &[String]) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(texts.to_vec());
        }
    }
}

impl IEmbeddingProvider for RecordingProvider {
    fn embed(&self, text: &str) -> SleuthResult<Vec<f32>> {
        self.record(&[text.to_string()]);
        self.inner.embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        self.record(texts);
        self.inner.embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "recording-mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// A provider whose every call fails.
pub struct FailingProvider {
    available: bool,
}

impl FailingProvider {
    /// Reports itself available but fails on use.
    pub fn new() -> Self {
        Self { available: true }
    }

    /// Reports itself unavailable.
    pub fn offline() -> Self {
        Self { available: false }
    }

    fn failure(&self) -> EmbeddingError {
        if self.available {
            EmbeddingError::InferenceFailed {
                reason: "mock failure".to_string(),
            }
        } else {
            EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
        }
    }
}

impl Default for FailingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IEmbeddingProvider for FailingProvider {
    fn embed(&self, _text: &str) -> SleuthResult<Vec<f32>> {
        Err(self.failure().into())
    }

    fn embed_batch(&self, _texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        Err(self.failure().into())
    }

    fn dimensions(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "failing-mock"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
