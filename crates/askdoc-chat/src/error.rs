//! Error types for the chat pipeline.

use askdoc_core::error::AskdocError;

/// Errors from the chat pipeline.
///
/// Rewriting failures never appear here: they are absorbed inside the
/// orchestrator and fall back to the original question.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("completion error: {0}")]
    Completion(String),
    #[error("embedding error: {0}")]
    Embedding(String),
    #[error("search error: {0}")]
    Search(String),
}

impl From<AskdocError> for ChatError {
    fn from(err: AskdocError) -> Self {
        match err {
            AskdocError::Embedding(msg) => ChatError::Embedding(msg),
            AskdocError::Search(msg) => ChatError::Search(msg),
            AskdocError::Completion(msg) => ChatError::Completion(msg),
            other => ChatError::Completion(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Completion("model overloaded".to_string());
        assert_eq!(err.to_string(), "completion error: model overloaded");

        let err = ChatError::Embedding("bad input".to_string());
        assert_eq!(err.to_string(), "embedding error: bad input");

        let err = ChatError::Search("index unreachable".to_string());
        assert_eq!(err.to_string(), "search error: index unreachable");
    }

    #[test]
    fn test_from_askdoc_error_maps_variants() {
        let err: ChatError = AskdocError::Embedding("e".to_string()).into();
        assert!(matches!(err, ChatError::Embedding(_)));

        let err: ChatError = AskdocError::Search("s".to_string()).into();
        assert!(matches!(err, ChatError::Search(_)));

        let err: ChatError = AskdocError::Completion("c".to_string()).into();
        assert!(matches!(err, ChatError::Completion(_)));
    }

    #[test]
    fn test_from_askdoc_error_other_collapses_to_completion() {
        let err: ChatError = AskdocError::Config("missing".to_string()).into();
        assert!(matches!(err, ChatError::Completion(_)));
        assert!(err.to_string().contains("missing"));
    }
}
