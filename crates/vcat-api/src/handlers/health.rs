//! Health and build-info handlers.

use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

use crate::error::ApiError;
use crate::response::{JsonBody, StatusMessage};
use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Build info reported by `/app/statusz`.
#[derive(Serialize)]
pub struct StatusResponse {
    pub commit: String,
    pub version: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> JsonBody<HealthResponse> {
    JsonBody(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn app_healthz() -> JsonBody<StatusMessage> {
    JsonBody(StatusMessage::new(StatusCode::OK, "Hello World!"))
}

pub async fn app_statusz(State(state): State<AppState>) -> JsonBody<StatusResponse> {
    JsonBody(StatusResponse {
        commit: state.config.commit.clone(),
        version: state.config.version.clone(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("no route")
}
