//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabevalidierung ---
    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    #[error("Ungueltiges E-Mail-Format: {0}")]
    EmailFormat(String),

    #[error("Passwort zu kurz: mindestens {0} Zeichen erforderlich")]
    PasswortRichtlinie(usize),

    #[error("E-Mail bereits registriert")]
    EmailVergeben,

    // --- Authentifizierung ---
    // Bewusst dieselbe Meldung fuer "unbekannte E-Mail" und "falsches
    // Passwort" (kein Konto-Enumeration-Leak)
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Token ---
    #[error("Token ungueltig oder abgelaufen")]
    TokenUngueltig,

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] bugtracker_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    pub fn validierung(msg: impl Into<String>) -> Self {
        Self::Validierung(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
