//! Route handler for the chat endpoint.

use askdoc_core::types::ConversationTurn;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::PipelineFailure;
use crate::state::AppState;

/// Request body for `POST /chat`.
///
/// `history` may be absent or null; both mean an empty history. An unknown
/// role in a history turn fails deserialization before the pipeline runs.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub history: Option<Vec<ConversationTurn>>,
}

/// Response body: always well-formed JSON with an `answer` field, whether
/// success, content-level refusal, or failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
}

/// POST /chat - run the four-stage pipeline and return the answer.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatAnswer>, PipelineFailure> {
    let history = request.history.unwrap_or_default();
    let answer = state
        .orchestrator
        .answer(&request.question, &history)
        .await?;
    Ok(Json(ChatAnswer { answer }))
}
