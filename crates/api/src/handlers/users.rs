//! Handler fuer die Benutzer-Routen (/api/users*)

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use bugtracker_db::{
    models::{BenutzerUpdate, PraesenzStatus},
    UserRepository,
};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthIdentitaet;
use crate::state::ApiState;

/// GET /api/users – reduzierte Team-Ansicht
pub async fn list_users(State(state): State<ApiState>) -> ApiResult<Response> {
    let benutzer = UserRepository::list(state.db.as_ref()).await?;

    let eintraege: Vec<_> = benutzer
        .iter()
        .map(|u| {
            json!({
                "id": u.id,
                "name": u.name,
                "email": u.email,
                "status": u.status,
                "role": u.rolle,
            })
        })
        .collect();

    Ok(Json(json!({ "users": eintraege })).into_response())
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let benutzer = UserRepository::get_by_id(state.db.as_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NichtGefunden("Benutzer".into()))?;

    Ok(Json(json!({ "user": benutzer.oeffentlich() })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ProfilBody {
    pub name: Option<String>,
    pub status: Option<PraesenzStatus>,
}

/// PUT /api/users/profile – eigenes Profil (nur Name und Status)
pub async fn update_profile(
    State(state): State<ApiState>,
    Extension(identitaet): Extension<AuthIdentitaet>,
    Json(body): Json<ProfilBody>,
) -> ApiResult<Response> {
    let benutzer = UserRepository::update(
        state.db.as_ref(),
        identitaet.user_id,
        BenutzerUpdate {
            name: body.name,
            status: body.status,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| match e {
        bugtracker_db::DbError::NichtGefunden(_) => ApiError::NichtGefunden("Benutzer".into()),
        andere => ApiError::Datenbank(andere),
    })?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": benutzer.oeffentlich(),
    }))
    .into_response())
}
