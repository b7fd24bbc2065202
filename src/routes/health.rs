use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe; deliberately does not touch the database.
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
        })),
    )
}
