//! Fehlertypen fuer das Tracking-Crate

use thiserror::Error;

/// Alle moeglichen Fehler in Bug-Verwaltung und Aktivitaetslog
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    #[error("{0} nicht gefunden")]
    NichtGefunden(String),

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] bugtracker_db::DbError),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl TrackingError {
    pub fn validierung(msg: impl Into<String>) -> Self {
        Self::Validierung(msg.into())
    }

    pub fn nicht_gefunden(was: impl Into<String>) -> Self {
        Self::NichtGefunden(was.into())
    }
}

/// Result-Alias fuer das Tracking-Crate
pub type TrackingResult<T> = Result<T, TrackingError>;
