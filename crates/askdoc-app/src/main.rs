//! askdoc application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Load `.env` and build the configuration from the environment
//! 2. Construct the Gemini and Pinecone clients (once per process)
//! 3. Start the axum HTTP server with the chat route

use std::sync::Arc;

use askdoc_api::{routes, AppState};
use askdoc_core::config::AppConfig;
use askdoc_llm::GeminiClient;
use askdoc_vector::PineconeIndex;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting askdoc v{}", env!("CARGO_PKG_VERSION"));

    // Config. Credentials are not validated here: a missing key surfaces
    // on the first request that needs it.
    let config = AppConfig::from_env();
    tracing::info!(
        port = config.server.port,
        chat_model = %config.gemini.chat_model,
        embedding_model = %config.gemini.embedding_model,
        "Configuration loaded from environment"
    );

    // Hosted-service clients, shared read-only across requests.
    let gemini = Arc::new(GeminiClient::new(config.gemini.clone()));
    let pinecone = Arc::new(PineconeIndex::new(config.pinecone.clone()));

    let state = AppState::new(
        config,
        Arc::clone(&gemini) as Arc<dyn askdoc_llm::CompletionService>,
        gemini,
        pinecone,
    );

    routes::start_server(state).await?;

    Ok(())
}
