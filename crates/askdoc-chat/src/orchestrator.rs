//! Chat orchestrator: the fixed four-stage request pipeline.
//!
//! Normalize history, rewrite the question, embed + retrieve, generate the
//! answer. Strictly sequential within one request, stateless across
//! requests; nothing is cached, retried, or persisted.

use std::sync::Arc;

use askdoc_core::types::ConversationTurn;
use askdoc_llm::{CompletionService, EmbeddingService};
use askdoc_vector::VectorSearchService;
use tracing::{debug, warn};

use crate::error::ChatError;
use crate::messages::build_messages;
use crate::prompt;

/// Number of nearest neighbors requested from the index.
const TOP_K: usize = 10;

/// Coordinates the completion, embedding, and search services for one
/// request at a time.
///
/// Service handles are process-scoped, constructed once, and shared
/// read-only across requests.
pub struct ChatOrchestrator {
    completion: Arc<dyn CompletionService>,
    embedding: Arc<dyn EmbeddingService>,
    search: Arc<dyn VectorSearchService>,
}

impl ChatOrchestrator {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        embedding: Arc<dyn EmbeddingService>,
        search: Arc<dyn VectorSearchService>,
    ) -> Self {
        Self {
            completion,
            embedding,
            search,
        }
    }

    /// Answer a question against the indexed document.
    ///
    /// Any completion, embedding, or search failure past the rewriting
    /// stage short-circuits the remaining stages and propagates to the
    /// caller; rewriting itself is best-effort.
    pub async fn answer(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ChatError> {
        // Stage 1: history normalization.
        let messages = build_messages(question, history);

        // Stage 2: query rewriting, falling back to the original question.
        let rewritten = self.rewrite_query(question, &messages).await;
        debug!(rewritten = %rewritten, "Query ready for retrieval");

        // Stage 3: embed + retrieve.
        let vector = self.embedding.embed(&rewritten).await?;
        let matches = self.search.query(&vector, TOP_K).await?;
        let context = prompt::join_context(&matches);
        debug!(
            matches = matches.len(),
            context_len = context.len(),
            "Context assembled"
        );

        // Stage 4: answer generation over the original message sequence.
        // The rewritten query is used for retrieval only.
        let instruction = prompt::answer_instruction(&context);
        let answer = self.completion.complete(&messages, &instruction).await?;

        Ok(answer)
    }

    /// Ask the model to rephrase the latest question as a standalone query.
    ///
    /// Best-effort: any failure or blank output falls back to the original
    /// question text and never blocks the pipeline.
    async fn rewrite_query(&self, question: &str, messages: &[ConversationTurn]) -> String {
        match self
            .completion
            .complete(messages, prompt::REWRITE_INSTRUCTION)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => question.to_string(),
            Err(e) => {
                warn!(error = %e, "Query rewriting failed, using original question");
                question.to_string()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
