//! Completion service trait and a scripted mock for tests.

use std::sync::Mutex;

use askdoc_core::error::AskdocError;
use askdoc_core::types::ConversationTurn;

/// Service for generating text from a role-tagged message sequence.
///
/// The system instruction constrains the model independently of the
/// conversational content; the pipeline uses two different instructions
/// for query rewriting and answer generation.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate text for the given messages under the given instruction.
    ///
    /// A response with no extractable text is an error; the caller decides
    /// whether that error is absorbed or propagated.
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        system_instruction: &str,
    ) -> Result<String, AskdocError>;
}

// ---------------------------------------------------------------------------
// MockCompletion - scripted replies for testing
// ---------------------------------------------------------------------------

/// Mock completion service that replays scripted replies in order.
///
/// Records every call's system instruction and message count so tests can
/// assert on exactly what the pipeline sent. Once the script is exhausted
/// the last reply repeats.
#[derive(Debug, Default)]
pub struct MockCompletion {
    replies: Vec<Result<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// One recorded `complete` invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_instruction: String,
    pub message_count: usize,
    pub last_message: Option<ConversationTurn>,
}

impl MockCompletion {
    /// Reply with the same text on every call.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            replies: vec![Ok(text.into())],
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replay the given outcomes in order; `Err` entries become
    /// `AskdocError::Completion` failures.
    pub fn scripted(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: vec![Err(message.into())],
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl CompletionService for MockCompletion {
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        system_instruction: &str,
    ) -> Result<String, AskdocError> {
        let call_index = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|e| AskdocError::Completion(format!("mock lock poisoned: {}", e)))?;
            calls.push(RecordedCall {
                system_instruction: system_instruction.to_string(),
                message_count: messages.len(),
                last_message: messages.last().cloned(),
            });
            calls.len() - 1
        };

        let reply = self
            .replies
            .get(call_index)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_else(|| Err("no scripted reply".to_string()));

        reply.map_err(AskdocError::Completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replying_returns_text() {
        let mock = MockCompletion::replying("hello");
        let out = mock.complete(&[ConversationTurn::user("hi")], "sys").await;
        assert_eq!(out.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_mock_failing_returns_error() {
        let mock = MockCompletion::failing("boom");
        let out = mock.complete(&[], "sys").await;
        assert!(matches!(out, Err(AskdocError::Completion(_))));
    }

    #[tokio::test]
    async fn test_mock_scripted_replays_in_order() {
        let mock = MockCompletion::scripted(vec![
            Ok("first".to_string()),
            Err("second fails".to_string()),
        ]);
        assert_eq!(mock.complete(&[], "a").await.unwrap(), "first");
        assert!(mock.complete(&[], "b").await.is_err());
        // Exhausted script repeats the last entry.
        assert!(mock.complete(&[], "c").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockCompletion::replying("ok");
        let messages = vec![
            ConversationTurn::user("one"),
            ConversationTurn::assistant("two"),
            ConversationTurn::user("three"),
        ];
        mock.complete(&messages, "rewrite it").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_instruction, "rewrite it");
        assert_eq!(calls[0].message_count, 3);
        assert_eq!(calls[0].last_message.as_ref().unwrap().content, "three");
    }
}
