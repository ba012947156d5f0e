//! Pinecone data-plane query client.
//!
//! Queries an existing index at its data-plane host; index creation and
//! upserts happen elsewhere. Only the `text` metadata field of each match
//! is read.

use askdoc_core::config::PineconeConfig;
use askdoc_core::error::AskdocError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::{RetrievalMatch, VectorSearchService};

/// Client for a single Pinecone index.
///
/// No request timeout is configured: a hung upstream call hangs the
/// request.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    client: Client,
    config: PineconeConfig,
}

impl PineconeIndex {
    pub fn new(config: PineconeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.config.index_host.trim_end_matches('/'))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    top_k: usize,
    vector: &'a [f32],
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
struct Match {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<MatchMetadata>,
}

/// Match metadata; fields other than `text` are ignored.
#[derive(Debug, Deserialize)]
struct MatchMetadata {
    text: Option<String>,
}

impl From<Match> for RetrievalMatch {
    fn from(m: Match) -> Self {
        RetrievalMatch {
            id: m.id,
            score: m.score,
            text: m.metadata.and_then(|meta| meta.text),
        }
    }
}

#[async_trait::async_trait]
impl VectorSearchService for PineconeIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievalMatch>, AskdocError> {
        let request = QueryRequest {
            top_k,
            vector,
            include_metadata: true,
        };

        let response = self
            .client
            .post(self.query_url())
            .header("Api-Key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AskdocError::Search(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AskdocError::Search(format!(
                "Pinecone API error ({}): {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| AskdocError::Search(format!("Failed to parse response: {}", e)))?;

        debug!(matches = parsed.matches.len(), "Pinecone query complete");

        Ok(parsed.matches.into_iter().map(RetrievalMatch::from).collect())
    }
}
