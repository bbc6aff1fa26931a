//! HTTP-Handler, gruppiert nach Routen-Bereich

pub mod admin;
pub mod auth;
pub mod bugs;
pub mod users;

use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde_json::json;

/// GET /api/health – Liveness-Check ohne Authentifizierung
pub async fn health() -> Response {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
    .into_response()
}
