/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("model load failed: {model}: {reason}")]
    ModelLoadFailed { model: String, reason: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },
}
