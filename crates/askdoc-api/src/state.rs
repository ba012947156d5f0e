//! Application state shared across requests.
//!
//! Holds the process-scoped orchestrator, which in turn holds the hosted
//! service handles. Everything is read-only from the handler's
//! perspective, so no locking is needed.

use std::sync::Arc;

use askdoc_chat::ChatOrchestrator;
use askdoc_core::config::AppConfig;
use askdoc_llm::{CompletionService, EmbeddingService};
use askdoc_vector::VectorSearchService;

/// Shared application state, cheap to clone across handler tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl AppState {
    /// Wire the service handles into an orchestrator and wrap them as
    /// shared state.
    pub fn new(
        config: AppConfig,
        completion: Arc<dyn CompletionService>,
        embedding: Arc<dyn EmbeddingService>,
        search: Arc<dyn VectorSearchService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(ChatOrchestrator::new(completion, embedding, search)),
        }
    }
}
