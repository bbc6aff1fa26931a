//! Access Guard – Axum-Middleware fuer Authentifizierung und Rollenpruefung
//!
//! `authentifizieren` laeuft auf allen geschuetzten Routen und haengt die
//! dekodierte Identitaet als Extension an den Request. `admin_erforderlich`
//! laeuft danach auf Admin-Routen. Unauthentifizierte Requests erreichen
//! nie einen Handler.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use bugtracker_db::models::Rolle;

use crate::error::fehler_antwort;
use crate::state::ApiState;

/// Authentifizierte Identitaet eines Requests
#[derive(Debug, Clone)]
pub struct AuthIdentitaet {
    pub user_id: Uuid,
    pub rolle: Rolle,
}

impl AuthIdentitaet {
    pub fn ist_admin(&self) -> bool {
        self.rolle == Rolle::Admin
    }
}

/// Extrahiert Bearer-Token aus dem Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Middleware: Token pruefen und Identitaet anhaengen
pub async fn authentifizieren(
    State(state): State<ApiState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        return fehler_antwort(StatusCode::UNAUTHORIZED, "Authorization-Header fehlt");
    };

    match state.token.pruefen(token) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthIdentitaet {
                user_id: claims.sub,
                rolle: claims.role,
            });
            next.run(req).await
        }
        Err(_) => fehler_antwort(
            StatusCode::UNAUTHORIZED,
            "Token ungueltig oder abgelaufen",
        ),
    }
}

/// Middleware: Admin-Rolle erzwingen; muss nach `authentifizieren` laufen
pub async fn admin_erforderlich(req: Request, next: Next) -> Response {
    match req.extensions().get::<AuthIdentitaet>() {
        None => fehler_antwort(StatusCode::UNAUTHORIZED, "Nicht authentifiziert"),
        Some(identitaet) if !identitaet.ist_admin() => {
            fehler_antwort(StatusCode::FORBIDDEN, "Admin-Rolle erforderlich")
        }
        Some(_) => next.run(req).await,
    }
}
