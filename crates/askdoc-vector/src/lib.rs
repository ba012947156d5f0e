//! Hosted vector-index search capability.
//!
//! Defines the nearest-neighbor search trait, the Pinecone data-plane
//! client, and a scripted mock for tests.

pub mod pinecone;
pub mod search;

pub use pinecone::PineconeIndex;
pub use search::{MockSearch, RetrievalMatch, VectorSearchService};
