//! Route table for the RAG HTTP API.

use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, ApiState};

/// Build the full application router.
pub fn create_app(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/roles", get(handlers::list_roles))
        .route("/ask", post(handlers::ask))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
