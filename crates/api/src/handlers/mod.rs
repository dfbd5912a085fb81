//! Request handlers.
//!
//! Handlers validate and normalise input, delegate to the session lifecycle,
//! and map errors via [`AppError`](crate::error::AppError).

pub mod auth;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Fallback for unmatched routes: 404 with the same JSON shape as other errors.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "code": "NOT_FOUND",
            "path": uri.path(),
        })),
    )
}
