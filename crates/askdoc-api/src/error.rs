//! Uniform failure response for the chat route.
//!
//! Every unrecovered pipeline error collapses to the same payload: HTTP
//! 500 with `{"answer": "Something went wrong."}`. The cause is logged
//! server-side and never detailed to the client.

use askdoc_chat::ChatError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::handlers::ChatAnswer;

/// Fixed client-visible failure text.
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// Wrapper turning any `ChatError` into the uniform 500 response.
#[derive(Debug)]
pub struct PipelineFailure(pub ChatError);

impl From<ChatError> for PipelineFailure {
    fn from(err: ChatError) -> Self {
        PipelineFailure(err)
    }
}

impl IntoResponse for PipelineFailure {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Chat pipeline failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatAnswer {
                answer: GENERIC_FAILURE.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_maps_to_500() {
        let failure = PipelineFailure(ChatError::Search("index down".to_string()));
        let resp = failure.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_failure_body_never_leaks_cause() {
        let failure = PipelineFailure(ChatError::Embedding(
            "secret key rejected by upstream".to_string(),
        ));
        let resp = failure.into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(!text.contains("secret"));
        assert_eq!(text, r#"{"answer":"Something went wrong."}"#);
    }
}
