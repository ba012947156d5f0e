//! askdoc API crate - axum HTTP server for the chat route.
//!
//! Provides the single `POST /chat` endpoint with CORS and request
//! tracing, and the uniform failure response contract.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::PipelineFailure;
pub use routes::create_router;
pub use state::AppState;
