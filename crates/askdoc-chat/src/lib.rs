//! Request-orchestration pipeline for the RAG chat backend.
//!
//! Builds the message sequence, rewrites the question into a standalone
//! query, embeds it, retrieves context from the vector index, and asks the
//! model to answer strictly from that context.

pub mod error;
pub mod messages;
pub mod orchestrator;
pub mod prompt;

pub use error::ChatError;
pub use messages::build_messages;
pub use orchestrator::ChatOrchestrator;
