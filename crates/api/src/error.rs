//! HTTP-Fehlerabbildung
//!
//! Jeder Handler-Fehler wird lokal gefangen und in Statuscode plus kurze
//! JSON-Meldung uebersetzt. Unerwartete Fehler werden serverseitig geloggt
//! und als opakes 500 ausgeliefert.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use bugtracker_auth::AuthError;
use bugtracker_tracking::TrackingError;

/// Alle moeglichen Fehler an der HTTP-Grenze
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Nicht authentifiziert: {0}")]
    NichtAuthentifiziert(String),

    #[error("Zugriff verweigert: {0}")]
    ZugriffVerweigert(String),

    #[error("{0} nicht gefunden")]
    NichtGefunden(String),

    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] bugtracker_db::DbError),

    #[error("Interner Fehler: {0}")]
    Intern(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP-Statuscode fuer diesen Fehler
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NichtAuthentifiziert(_) => StatusCode::UNAUTHORIZED,
            Self::ZugriffVerweigert(_) => StatusCode::FORBIDDEN,
            Self::NichtGefunden(_) => StatusCode::NOT_FOUND,
            Self::Validierung(_) => StatusCode::BAD_REQUEST,
            Self::Auth(e) => match e {
                AuthError::Validierung(_)
                | AuthError::EmailFormat(_)
                | AuthError::PasswortRichtlinie(_) => StatusCode::BAD_REQUEST,
                AuthError::EmailVergeben => StatusCode::CONFLICT,
                AuthError::UngueltigeAnmeldedaten | AuthError::TokenUngueltig => {
                    StatusCode::UNAUTHORIZED
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Tracking(e) => match e {
                TrackingError::Validierung(_) => StatusCode::BAD_REQUEST,
                TrackingError::NichtGefunden(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Datenbank(_) | Self::Intern(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status();

        // Interne Details gehen ins Log, nicht zum Aufrufer
        let nachricht = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(fehler = %self, "Interner Fehler im Handler");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": nachricht }))).into_response()
    }
}

/// Fehlerantwort fuer Middleware-Pfade (ausserhalb von `ApiResult`)
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "error": nachricht }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuscodes_der_fehlertaxonomie() {
        assert_eq!(
            ApiError::Auth(AuthError::EmailVergeben).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Auth(AuthError::UngueltigeAnmeldedaten).http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Auth(AuthError::PasswortRichtlinie(6)).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Tracking(TrackingError::nicht_gefunden("Bug")).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ZugriffVerweigert("Admin".into()).http_status(),
            StatusCode::FORBIDDEN
        );
    }
}
