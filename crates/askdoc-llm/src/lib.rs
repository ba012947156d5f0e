//! Hosted language-model capabilities: completion and text embedding.
//!
//! Defines the service traits the chat pipeline depends on, the Gemini
//! HTTP client implementing both, and mock implementations for tests.

pub mod completion;
pub mod embedding;
pub mod gemini;

pub use completion::{CompletionService, MockCompletion};
pub use embedding::{EmbeddingService, FailingEmbedding, MockEmbedding};
pub use gemini::GeminiClient;
