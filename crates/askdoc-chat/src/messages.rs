//! History normalization.

use askdoc_core::types::ConversationTurn;

/// Build the message sequence for the model calls: the caller's history in
/// order, followed by the current question as a final user turn.
///
/// Invariant: the result has `history.len() + 1` elements and the last one
/// is always the question with role `user`.
pub fn build_messages(question: &str, history: &[ConversationTurn]) -> Vec<ConversationTurn> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.extend_from_slice(history);
    messages.push(ConversationTurn::user(question));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdoc_core::types::Role;

    #[test]
    fn test_empty_history_yields_single_message() {
        let messages = build_messages("What is a stack?", &[]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "What is a stack?");
    }

    #[test]
    fn test_length_is_history_plus_one() {
        let history = vec![
            ConversationTurn::user("first"),
            ConversationTurn::assistant("second"),
            ConversationTurn::user("third"),
        ];
        let messages = build_messages("fourth", &history);
        assert_eq!(messages.len(), history.len() + 1);
    }

    #[test]
    fn test_history_order_preserved_and_question_last() {
        let history = vec![
            ConversationTurn::user("hello"),
            ConversationTurn::assistant("hi there"),
        ];
        let messages = build_messages("what next?", &history);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].content, "hi there");
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "what next?");
    }
}
