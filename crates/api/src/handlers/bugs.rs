//! Handler fuer die Bug-Routen (/api/bugs*)
//!
//! Alle Routen erfordern Authentifizierung; eine Eigentums-Beschraenkung
//! gibt es bewusst nicht (jeder angemeldete Benutzer darf aendern).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use bugtracker_db::models::{BugStatus, BugUpdate, Stufe};
use bugtracker_tracking::NeuerBugEingabe;

use crate::error::ApiResult;
use crate::middleware::AuthIdentitaet;
use crate::state::ApiState;

/// GET /api/bugs
pub async fn list_bugs(State(state): State<ApiState>) -> ApiResult<Response> {
    let bugs = state.bugs.liste().await?;
    Ok(Json(json!({ "bugs": bugs })).into_response())
}

/// GET /api/bugs/:id
pub async fn get_bug(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let bug = state.bugs.laden(id).await?;
    Ok(Json(json!({ "bug": bug })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CreateBugBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Option<Stufe>,
    pub priority: Option<Stufe>,
}

/// POST /api/bugs
pub async fn create_bug(
    State(state): State<ApiState>,
    Extension(identitaet): Extension<AuthIdentitaet>,
    Json(body): Json<CreateBugBody>,
) -> ApiResult<Response> {
    let bug = state
        .bugs
        .erstellen(
            identitaet.user_id,
            NeuerBugEingabe {
                title: body.title,
                description: body.description,
                severity: body.severity,
                priority: body.priority,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Bug created successfully",
            "bug": bug,
        })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct UpdateBugBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Stufe>,
    pub priority: Option<Stufe>,
    pub status: Option<BugStatus>,
}

/// PUT /api/bugs/:id
pub async fn update_bug(
    State(state): State<ApiState>,
    Extension(identitaet): Extension<AuthIdentitaet>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBugBody>,
) -> ApiResult<Response> {
    let bug = state
        .bugs
        .aktualisieren(
            id,
            identitaet.user_id,
            BugUpdate {
                title: body.title,
                description: body.description,
                severity: body.severity,
                priority: body.priority,
                status: body.status,
            },
        )
        .await?;

    Ok(Json(json!({
        "message": "Bug updated successfully",
        "bug": bug,
    }))
    .into_response())
}

/// DELETE /api/bugs/:id
pub async fn delete_bug(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    state.bugs.loeschen(id).await?;
    Ok(Json(json!({ "message": "Bug deleted successfully" })).into_response())
}
