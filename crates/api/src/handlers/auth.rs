//! Handler fuer die Auth-Routen (/api/auth/*)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::json;

use bugtracker_db::{
    models::{AktivitaetsTyp, BenutzerUpdate, PraesenzStatus, Rolle},
    UserRepository,
};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthIdentitaet;
use crate::state::ApiState;

#[derive(Debug, Deserialize)]
pub struct SignupBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<ApiState>,
    Json(body): Json<SignupBody>,
) -> ApiResult<Response> {
    let benutzer = state
        .auth
        .konto_erstellen(&body.name, &body.email, &body.password, Rolle::User)
        .await?;

    state
        .log
        .aufzeichnen(
            AktivitaetsTyp::UserCreated,
            benutzer.id,
            None,
            &format!("{} created an account", benutzer.name),
            None,
        )
        .await?;

    let token = state.token.ausstellen(&benutzer)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created successfully",
            "user": benutzer.oeffentlich(),
            "token": token,
        })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct SigninBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<ApiState>,
    Json(body): Json<SigninBody>,
) -> ApiResult<Response> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validierung(
            "E-Mail und Passwort sind erforderlich".into(),
        ));
    }

    let benutzer = state
        .auth
        .anmeldedaten_pruefen(&body.email, &body.password)
        .await?;

    // Anwesenheitsstatus aktualisieren
    let benutzer = UserRepository::update(
        state.db.as_ref(),
        benutzer.id,
        BenutzerUpdate {
            status: Some(PraesenzStatus::Online),
            ..Default::default()
        },
    )
    .await?;

    state
        .log
        .aufzeichnen(
            AktivitaetsTyp::UserLogin,
            benutzer.id,
            None,
            &format!("{} logged in", benutzer.name),
            None,
        )
        .await?;

    let token = state.token.ausstellen(&benutzer)?;

    Ok(Json(json!({
        "message": "Signed in successfully",
        "user": benutzer.oeffentlich(),
        "token": token,
    }))
    .into_response())
}

/// POST /api/auth/signout
///
/// Das Token bleibt bis zu seinem Ablauf gueltig (keine Widerrufsliste);
/// hier wird nur der Anwesenheitsstatus zurueckgesetzt und geloggt.
pub async fn signout(
    State(state): State<ApiState>,
    Extension(identitaet): Extension<AuthIdentitaet>,
) -> ApiResult<Response> {
    UserRepository::update(
        state.db.as_ref(),
        identitaet.user_id,
        BenutzerUpdate {
            status: Some(PraesenzStatus::Offline),
            ..Default::default()
        },
    )
    .await?;

    state
        .log
        .aufzeichnen(
            AktivitaetsTyp::UserLogout,
            identitaet.user_id,
            None,
            "User logged out",
            None,
        )
        .await?;

    Ok(Json(json!({ "message": "Signed out successfully" })).into_response())
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ApiState>,
    Extension(identitaet): Extension<AuthIdentitaet>,
) -> ApiResult<Response> {
    let benutzer = UserRepository::get_by_id(state.db.as_ref(), identitaet.user_id)
        .await?
        .ok_or_else(|| ApiError::NichtGefunden("Benutzer".into()))?;

    Ok(Json(json!({ "user": benutzer.oeffentlich() })).into_response())
}
