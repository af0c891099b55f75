//! C14: the RAG HTTP API. Wires the router, facts assembler, retriever,
//! and answer orchestrator behind three endpoints, served by Axum.

pub mod handlers;
pub mod routes;

pub use handlers::ApiState;
pub use routes::create_app;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::RagError;

/// Structured error response shape shared by every handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::IndexUnavailable(_) => Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "INDEX_UNAVAILABLE", message: err.to_string() },
            RagError::RoleNotFound(_) => Self { status: StatusCode::BAD_REQUEST, code: "ROLE_NOT_FOUND", message: err.to_string() },
            RagError::GeneratorExhausted => Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "GENERATOR_EXHAUSTED", message: err.to_string() },
            RagError::Index(_) => Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "INDEX_ERROR", message: err.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": { "code": self.code, "message": self.message } });
        (self.status, Json(body)).into_response()
    }
}
