//! Router setup and server startup.
//!
//! Configures the axum Router with the CORS allow-list, request tracing,
//! and the chat route.

use axum::http::{header, HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with the chat route and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS: fixed origin allow-list from config; requests from other
    // origins still execute but get no permissive CORS headers.
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured port.
pub async fn start_server(state: AppState) -> Result<(), askdoc_core::error::AskdocError> {
    let addr = format!("0.0.0.0:{}", state.config.server.port);
    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| askdoc_core::error::AskdocError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| askdoc_core::error::AskdocError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
