//! Handler fuer die Admin-Routen (/api/admin/*)
//!
//! Alle Routen laufen hinter `authentifizieren` + `admin_erforderlich`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use bugtracker_db::{
    models::{BenutzerUpdate, PraesenzStatus, Rolle},
    UserRepository,
};
use bugtracker_tracking::STANDARD_LIMIT;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthIdentitaet;
use crate::state::ApiState;

/// GET /api/admin/stats
pub async fn get_stats(State(state): State<ApiState>) -> ApiResult<Response> {
    let stats = state.statistik.erheben().await?;
    Ok(Json(json!({ "stats": stats })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct AktivitaetenQuery {
    pub limit: Option<i64>,
}

/// GET /api/admin/activities?limit=n
pub async fn get_activities(
    State(state): State<ApiState>,
    Query(query): Query<AktivitaetenQuery>,
) -> ApiResult<Response> {
    let limit = query.limit.unwrap_or(STANDARD_LIMIT).max(1);
    let aktivitaeten = state.log.letzte(limit).await?;
    Ok(Json(json!({ "activities": aktivitaeten })).into_response())
}

/// GET /api/admin/users – vollstaendige Ansicht
pub async fn list_users(State(state): State<ApiState>) -> ApiResult<Response> {
    let benutzer = UserRepository::list(state.db.as_ref()).await?;
    let eintraege: Vec<_> = benutzer.iter().map(|u| u.oeffentlich()).collect();
    Ok(Json(json!({ "users": eintraege })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct AdminCreateUserBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Rolle>,
}

/// POST /api/admin/users – Konto mit waehlbarer Rolle anlegen
///
/// Loggt im Gegensatz zum Selbst-Signup keinen Aktivitaetseintrag.
pub async fn create_user(
    State(state): State<ApiState>,
    Json(body): Json<AdminCreateUserBody>,
) -> ApiResult<Response> {
    let benutzer = state
        .auth
        .konto_erstellen(
            &body.name,
            &body.email,
            &body.password,
            body.role.unwrap_or(Rolle::User),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": benutzer.oeffentlich(),
        })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Rolle>,
    pub status: Option<PraesenzStatus>,
}

/// PUT /api/admin/users/:id
pub async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdminUpdateUserBody>,
) -> ApiResult<Response> {
    let benutzer = UserRepository::update(
        state.db.as_ref(),
        id,
        BenutzerUpdate {
            name: body.name,
            email: body.email,
            rolle: body.role,
            status: body.status,
        },
    )
    .await
    .map_err(|e| match e {
        bugtracker_db::DbError::NichtGefunden(_) => ApiError::NichtGefunden("Benutzer".into()),
        andere => ApiError::Datenbank(andere),
    })?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": benutzer.oeffentlich(),
    }))
    .into_response())
}

/// DELETE /api/admin/users/:id
///
/// Das eigene Konto kann nicht geloescht werden.
pub async fn delete_user(
    State(state): State<ApiState>,
    Extension(identitaet): Extension<AuthIdentitaet>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    if id == identitaet.user_id {
        return Err(ApiError::Validierung(
            "Cannot delete your own account".into(),
        ));
    }

    let geloescht = UserRepository::delete(state.db.as_ref(), id).await?;
    if !geloescht {
        return Err(ApiError::NichtGefunden("Benutzer".into()));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })).into_response())
}

/// GET /api/admin/bugs – Admin-Sicht auf alle Bugs
pub async fn list_bugs(State(state): State<ApiState>) -> ApiResult<Response> {
    let bugs = state.bugs.liste().await?;
    Ok(Json(json!({ "bugs": bugs })).into_response())
}

/// DELETE /api/admin/bugs/:id
pub async fn delete_bug(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    state.bugs.loeschen(id).await?;
    Ok(Json(json!({ "message": "Bug deleted successfully" })).into_response())
}
