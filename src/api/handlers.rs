//! Request handlers for the three RAG endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ingest::{HashEmbedder, VectorStore};
use crate::rag::{facts, orchestrator, retriever, router, Generator};
use crate::types::{Dataset, Role};

use super::ApiError;

/// Shared, read-only handler state — opened once at startup.
#[derive(Clone)]
pub struct ApiState {
    pub dataset: Arc<Dataset>,
    pub store: Arc<VectorStore>,
    pub embedder: Arc<HashEmbedder>,
    pub generator: Arc<Generator>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub role: Option<String>,
    pub since: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub role: String,
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub available_roles: Vec<String>,
    pub default_role: String,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /` — liveness check.
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "ok", service: "elyx-server" })
}

/// `GET /roles` — the closed role set plus the router's default.
pub async fn list_roles() -> Json<RolesResponse> {
    Json(RolesResponse {
        available_roles: Role::ALL.iter().map(|r| r.display_name().to_string()).collect(),
        default_role: Role::DEFAULT.display_name().to_string(),
    })
}

/// `POST /ask` — route, assemble facts, retrieve context, and orchestrate
/// a cited answer.
pub async fn ask(State(state): State<ApiState>, Json(req): Json<AskRequest>) -> Result<Json<AskResponse>, ApiError> {
    let role = router::route(&req.question, req.role.as_deref());

    let facts_block = facts::assemble(role.display_name(), &state.dataset, req.since)?;
    let retrieved = retriever::retrieve(&state.store, &state.embedder, &req.question, role, None, req.since)?;
    let result = orchestrator::orchestrate(&state.generator, role, &req.question, &facts_block, &retrieved).await?;

    Ok(Json(AskResponse { role: role.display_name().to_string(), answer: result.answer, sources: result.sources }))
}
