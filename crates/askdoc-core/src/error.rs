use thiserror::Error;

/// Top-level error type for the askdoc system.
///
/// Each variant wraps a subsystem-specific failure as a message string.
/// Subsystem crates return `AskdocError` directly or define their own error
/// types with `From<AskdocError>` impls so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AskdocError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AskdocError {
    fn from(err: serde_json::Error) -> Self {
        AskdocError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for askdoc operations.
pub type Result<T> = std::result::Result<T, AskdocError>;
