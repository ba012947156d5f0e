//! Embedding service trait and a deterministic mock.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use askdoc_core::error::AskdocError;

/// Dimensionality of the mock vectors, matching text-embedding-004.
const MOCK_DIMENSIONS: usize = 768;

/// Service for generating text embeddings.
///
/// Implementations convert text into fixed-dimensional vectors; the
/// dimensionality is fixed by the model in use, not by the caller.
#[async_trait::async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generate an embedding vector for the given text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AskdocError>;

    /// Dimensionality of vectors produced by this service.
    fn dimensions(&self) -> usize;
}

// ---------------------------------------------------------------------------
// MockEmbedding - deterministic hash-based vectors for testing
// ---------------------------------------------------------------------------

/// Mock embedding service that returns deterministic 768-dimensional vectors.
///
/// The output is derived from a hash of the input text, so identical inputs
/// always produce identical outputs. This allows testing the pipeline
/// without a hosted model.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedding;

impl MockEmbedding {
    pub fn new() -> Self {
        Self
    }

    fn hash_to_vector(text: &str) -> Vec<f32> {
        let mut result = Vec::with_capacity(MOCK_DIMENSIONS);
        for i in 0..MOCK_DIMENSIONS {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            i.hash(&mut hasher);
            let h = hasher.finish();
            let val = ((h as f64) / (u64::MAX as f64)) * 2.0 - 1.0;
            result.push(val as f32);
        }

        // L2-normalize to unit vectors, matching the hosted model's output.
        let norm: f32 = result.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut result {
                *val /= norm;
            }
        }

        result
    }
}

#[async_trait::async_trait]
impl EmbeddingService for MockEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AskdocError> {
        if text.is_empty() {
            return Err(AskdocError::Embedding(
                "Cannot embed empty text".to_string(),
            ));
        }
        Ok(Self::hash_to_vector(text))
    }

    fn dimensions(&self) -> usize {
        MOCK_DIMENSIONS
    }
}

/// Mock embedding service that fails every call.
#[derive(Debug, Clone, Default)]
pub struct FailingEmbedding;

#[async_trait::async_trait]
impl EmbeddingService for FailingEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AskdocError> {
        Err(AskdocError::Embedding("embedding unavailable".to_string()))
    }

    fn dimensions(&self) -> usize {
        MOCK_DIMENSIONS
    }
}
