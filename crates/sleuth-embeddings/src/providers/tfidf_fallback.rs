//! TF-IDF sparse-to-dense fallback provider.
//!
//! Generates fixed-dimension vectors from weighted term frequencies. No model,
//! no network; hints and descriptions that share vocabulary land close together.

use std::collections::HashMap;

use rayon::prelude::*;
use sleuth_core::errors::SleuthResult;
use sleuth_core::traits::IEmbeddingProvider;

/// Function words that carry no identifying signal in a hint.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "her", "his",
    "in", "is", "it", "of", "on", "or", "she", "that", "the", "to", "was", "who", "with",
];

/// TF-IDF fallback embedding provider.
///
/// Produces deterministic dense vectors by hashing terms into fixed-dimension
/// buckets and weighting by term frequency.
pub struct TfIdfFallback {
    dimensions: usize,
}

impl TfIdfFallback {
    pub const NAME: &'static str = "tfidf-fallback";

    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Lowercase alphanumeric terms of at least two characters, minus stopwords.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() >= 2)
            .map(|s| s.to_lowercase())
            .filter(|s| !STOPWORDS.contains(&s.as_str()))
            .collect()
    }

    fn tfidf_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            let freq = count / total;
            // IDF approximation: longer terms are rarer.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += freq * idf;
        }

        // L2 normalize.
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for TfIdfFallback {
    fn embed(&self, text: &str) -> SleuthResult<Vec<f32>> {
        Ok(self.tfidf_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
        Ok(texts.par_iter().map(|t| self.tfidf_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_available(&self) -> bool {
        true
    }
}
