/// Dataset loading errors.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("malformed dataset row {row}: {reason}")]
    Malformed { row: u64, reason: String },

    #[error("dataset has no `name` column")]
    MissingNameColumn,

    #[error("duplicate candidate name: {name}")]
    DuplicateName { name: String },

    #[error("dataset contains no candidates")]
    Empty,
}
