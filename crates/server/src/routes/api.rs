//! Demo endpoints exercising the request metrics middleware

use axum::{Extension, Json, extract::Path, response::IntoResponse};
use serde_json::{Value as JsonValue, json};

use crate::error::AppError;
use crate::middleware::MetricsKey;

/// GET / - Service banner
pub async fn index() -> Json<JsonValue> {
    Json(json!({ "service": "routestats" }))
}

/// GET /api/{user}/{thing} - Look up a user's thing; `missing` never exists
pub async fn thing(
    Path((user, thing)): Path<(String, String)>,
) -> Result<Json<JsonValue>, AppError> {
    if thing == "missing" {
        return Err(AppError::NotFound(format!("{} has no {}", user, thing)));
    }

    Ok(Json(json!({ "user": user, "thing": thing })))
}

/// GET /reports/{id} - Reports are tracked under one fixed route key
pub async fn report(Path(id): Path<String>) -> impl IntoResponse {
    (
        Extension(MetricsKey::new("reports")),
        Json(json!({ "report": id })),
    )
}
