//! Vector search trait, match type, and a scripted mock.

use askdoc_core::error::AskdocError;

/// One nearest-neighbor match from the index, similarity-ranked.
///
/// Only the `text` metadata field matters to the pipeline; everything else
/// the index stores alongside a vector is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalMatch {
    pub id: String,
    pub score: f32,
    pub text: Option<String>,
}

impl RetrievalMatch {
    pub fn with_text(id: impl Into<String>, score: f32, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score,
            text: Some(text.into()),
        }
    }
}

/// Service for nearest-neighbor search over a hosted vector index.
///
/// The index decides the ordering; matches come back in descending
/// similarity and are used in that order.
#[async_trait::async_trait]
pub trait VectorSearchService: Send + Sync {
    /// Return up to `top_k` nearest neighbors to the query vector,
    /// including their text payloads.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievalMatch>, AskdocError>;
}

// ---------------------------------------------------------------------------
// MockSearch - scripted matches for testing
// ---------------------------------------------------------------------------

/// Mock search service returning a fixed match list (or a fixed failure).
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    matches: Vec<RetrievalMatch>,
    fail_with: Option<String>,
}

impl MockSearch {
    /// Return the given matches on every query, truncated to `top_k`.
    pub fn returning(matches: Vec<RetrievalMatch>) -> Self {
        Self {
            matches,
            fail_with: None,
        }
    }

    /// Return no matches.
    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    /// Fail every query.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            matches: Vec::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl VectorSearchService for MockSearch {
    async fn query(
        &self,
        _vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievalMatch>, AskdocError> {
        if let Some(ref message) = self.fail_with {
            return Err(AskdocError::Search(message.clone()));
        }
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_matches() {
        let mock = MockSearch::returning(vec![
            RetrievalMatch::with_text("a", 0.9, "first"),
            RetrievalMatch::with_text("b", 0.8, "second"),
        ]);
        let matches = mock.query(&[0.0; 4], 10).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_mock_truncates_to_top_k() {
        let mock = MockSearch::returning(vec![
            RetrievalMatch::with_text("a", 0.9, "first"),
            RetrievalMatch::with_text("b", 0.8, "second"),
            RetrievalMatch::with_text("c", 0.7, "third"),
        ]);
        let matches = mock.query(&[0.0; 4], 2).await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_empty() {
        let mock = MockSearch::empty();
        assert!(mock.query(&[0.0; 4], 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockSearch::failing("index down");
        let result = mock.query(&[0.0; 4], 10).await;
        assert!(matches!(result, Err(AskdocError::Search(_))));
    }
}
