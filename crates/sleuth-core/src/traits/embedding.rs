use crate::errors::SleuthResult;
use crate::similarity::cosine_similarity;

/// Embedding generation provider.
///
/// Implementations must map every text into one stable vector space for the
/// lifetime of the provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> SleuthResult<Vec<f32>>;

    /// Embed a batch of texts. Output order matches input order.
    fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;

    /// Similarity of two embeddings in [-1, 1]. Cosine unless overridden.
    fn similarity(&self, a: &[f32], b: &[f32]) -> f64 {
        cosine_similarity(a, b)
    }
}
