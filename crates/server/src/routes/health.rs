//! Health check endpoint

use axum::{Json, response::IntoResponse};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// GET /health - Report that the server is up
pub async fn check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
