//! System instructions and context assembly.

use askdoc_vector::RetrievalMatch;

/// Instruction for the query-rewriting call.
pub const REWRITE_INSTRUCTION: &str =
    "Rephrase the last user question as a standalone query.";

/// Fixed sentence the model is told to return when the context is
/// insufficient. Advisory only: adherence is up to the model.
pub const REFUSAL_SENTENCE: &str = "I could not find the answer in the provided document.";

/// Separator between retrieved passages in the context blob.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Join match texts into a single context blob, in index order.
///
/// Matches without a text payload are skipped. Zero matches yield the
/// empty string; that is not an error.
pub fn join_context(matches: &[RetrievalMatch]) -> String {
    matches
        .iter()
        .filter_map(|m| m.text.as_deref())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Instruction for the answer-generation call, with the context blob
/// embedded verbatim.
pub fn answer_instruction(context: &str) -> String {
    format!(
        "Use only the given context. If the answer is not found, say: \"{}\" Context: {}",
        REFUSAL_SENTENCE, context
    )
}
