//! Error types. One enum per subsystem, wrapped by [`SleuthError`].

mod dataset_error;
mod embedding_error;
mod session_error;

pub use dataset_error::DatasetError;
pub use embedding_error::EmbeddingError;
pub use session_error::SessionError;

/// Top-level error for the Sleuth workspace.
#[derive(Debug, thiserror::Error)]
pub enum SleuthError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("session error: {0}")]
    SessionError(#[from] SessionError),

    #[error("dataset error: {0}")]
    DatasetError(#[from] DatasetError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SleuthError {
    /// Whether this error is a caller-contract violation rather than a
    /// failure of the engine or one of its collaborators.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, SleuthError::SessionError(_))
    }
}

pub type SleuthResult<T> = Result<T, SleuthError>;
