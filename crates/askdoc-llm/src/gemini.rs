//! Gemini HTTP client implementing both completion and embedding.
//!
//! Talks to the generativelanguage API directly with hand-written wire
//! types: `generateContent` for completions and `embedContent` for
//! embeddings. Uses the `GEMINI_API_KEY` passed in via config.

use askdoc_core::config::GeminiConfig;
use askdoc_core::error::AskdocError;
use askdoc_core::types::{ConversationTurn, Role};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::completion::CompletionService;
use crate::embedding::EmbeddingService;

/// Client for the Gemini generateContent and embedContent endpoints.
///
/// Holds a single connection pool for the process lifetime. No request
/// timeout is configured: a hung upstream call hangs the request.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.chat_model, self.config.api_key
        )
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:embedContent?key={}",
            self.config.endpoint, self.config.embedding_model, self.config.api_key
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Instruction,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Instruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    content: EmbedContent,
}

#[derive(Debug, Serialize)]
struct EmbedContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
    status: Option<String>,
}

/// Map a conversation role to the wire role Gemini expects.
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn to_contents(messages: &[ConversationTurn]) -> Vec<Content> {
    messages
        .iter()
        .map(|m| Content {
            role: wire_role(m.role).to_string(),
            parts: vec![Part {
                text: m.content.clone(),
            }],
        })
        .collect()
}

/// Pull the generated text out of a response, tolerating missing pieces.
///
/// Multiple parts are concatenated. Returns `None` when no candidate
/// carries any non-blank text.
fn extract_text(response: &GenerateResponse) -> Option<String> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())?;

    let text: String = parts.iter().map(|p| p.text.as_str()).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Render an upstream error body into a message, preferring the structured
/// Gemini error format when it parses.
fn upstream_error(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GeminiErrorBody>(body) {
        format!(
            "Gemini API error ({}): {} - {}",
            status,
            parsed.error.status.unwrap_or_else(|| "Unknown".to_string()),
            parsed.error.message
        )
    } else {
        format!("Gemini API error ({}): {}", status, body)
    }
}

#[async_trait::async_trait]
impl CompletionService for GeminiClient {
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        system_instruction: &str,
    ) -> Result<String, AskdocError> {
        let request = GenerateRequest {
            contents: to_contents(messages),
            system_instruction: Instruction {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AskdocError::Completion(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AskdocError::Completion(upstream_error(status, &body)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AskdocError::Completion(format!("Failed to parse response: {}", e)))?;

        let text = extract_text(&parsed)
            .ok_or_else(|| AskdocError::Completion("Response contained no text".to_string()))?;
        debug!(chars = text.len(), "Gemini completion received");
        Ok(text)
    }
}

#[async_trait::async_trait]
impl EmbeddingService for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AskdocError> {
        if text.is_empty() {
            return Err(AskdocError::Embedding(
                "Cannot embed empty text".to_string(),
            ));
        }

        let request = EmbedRequest {
            content: EmbedContent {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };

        let response = self
            .client
            .post(self.embed_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AskdocError::Embedding(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AskdocError::Embedding(upstream_error(status, &body)));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AskdocError::Embedding(format!("Failed to parse response: {}", e)))?;

        debug!(
            dimensions = parsed.embedding.values.len(),
            "Gemini embedding received"
        );
        Ok(parsed.embedding.values)
    }

    fn dimensions(&self) -> usize {
        match self.config.embedding_model.as_str() {
            "gemini-embedding-001" => 768,
            "text-embedding-004" => 768,
            _ => 768,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_role_mapping() {
        assert_eq!(wire_role(Role::User), "user");
        assert_eq!(wire_role(Role::Assistant), "model");
    }

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateRequest {
            contents: to_contents(&[
                ConversationTurn::user("What is a stack?"),
                ConversationTurn::assistant("A data structure."),
            ]),
            system_instruction: Instruction {
                parts: vec![Part {
                    text: "Answer briefly.".to_string(),
                }],
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "What is a stack?");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Answer briefly."
        );
    }

    #[test]
    fn test_embed_request_shape() {
        let request = EmbedRequest {
            content: EmbedContent {
                parts: vec![Part {
                    text: "query text".to_string(),
                }],
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["content"]["parts"][0]["text"], "query text");
    }

    #[test]
    fn test_extract_text_happy_path() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"A stack is "},{"text":"LIFO."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response).unwrap(), "A stack is LIFO.");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_text(&response).is_none());

        let response: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(extract_text(&response).is_none());
    }

    #[test]
    fn test_extract_text_missing_content() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(extract_text(&response).is_none());
    }

    #[test]
    fn test_extract_text_blank_parts() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  \n"}]}}]}"#)
                .unwrap();
        assert!(extract_text(&response).is_none());
    }

    #[test]
    fn test_embed_response_parse() {
        let response: EmbedResponse =
            serde_json::from_str(r#"{"embedding":{"values":[0.1,-0.2,0.3]}}"#).unwrap();
        assert_eq!(response.embedding.values, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_upstream_error_structured() {
        let body = r#"{"error":{"message":"API key not valid","code":400,"status":"INVALID_ARGUMENT"}}"#;
        let msg = upstream_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(msg.contains("INVALID_ARGUMENT"));
        assert!(msg.contains("API key not valid"));
    }

    #[test]
    fn test_upstream_error_unstructured() {
        let msg = upstream_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }

    #[test]
    fn test_urls_include_model_and_key() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: "k123".to_string(),
            ..GeminiConfig::default()
        });
        let url = client.generate_url();
        assert!(url.contains("gemini-2.0-flash:generateContent"));
        assert!(url.ends_with("key=k123"));

        let url = client.embed_url();
        assert!(url.contains("text-embedding-004:embedContent"));
    }

    #[test]
    fn test_dimensions() {
        let client = GeminiClient::new(GeminiConfig::default());
        assert_eq!(EmbeddingService::dimensions(&client), 768);
    }
}
