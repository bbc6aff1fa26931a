//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die SQLite-Implementierungen liegen unter
//! `sqlite/`; Tests verwenden dieselben Traits gegen eine In-Memory-DB.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use crate::error::DbResult;
use crate::models::{
    AktivitaetRecord, BenutzerRecord, BenutzerUpdate, BugRecord, BugStatus, BugUpdate,
    NeueAktivitaet, NeuerBenutzer, NeuerBug, Rolle, Stufe,
};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://bugtracker.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://bugtracker.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync {
    /// Einen neuen Benutzer anlegen (E-Mail muss eindeutig sein)
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand seiner E-Mail laden (Vergleich case-sensitiv)
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Benutzerfelder aktualisieren; nur gesetzte Felder werden geaendert
    async fn update(&self, id: Uuid, data: BenutzerUpdate) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer endgueltig loeschen
    async fn delete(&self, id: Uuid) -> DbResult<bool>;

    /// Alle Benutzer laden
    async fn list(&self) -> DbResult<Vec<BenutzerRecord>>;

    /// Gesamtzahl der Benutzer
    async fn count(&self) -> DbResult<i64>;

    /// Anzahl der Benutzer mit der gegebenen Rolle
    async fn count_by_role(&self, rolle: Rolle) -> DbResult<i64>;
}

/// Repository fuer Bug-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait BugRepository: Send + Sync {
    /// Einen neuen Bug anlegen (Status ist immer "open")
    async fn create(&self, data: NeuerBug<'_>) -> DbResult<BugRecord>;

    /// Einen Bug anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BugRecord>>;

    /// Bugfelder aktualisieren; nur gesetzte Felder werden geaendert.
    /// Aktualisiert `updated_at` auf den aktuellen Zeitpunkt.
    async fn update(&self, id: Uuid, data: BugUpdate) -> DbResult<BugRecord>;

    /// Einen Bug endgueltig loeschen
    async fn delete(&self, id: Uuid) -> DbResult<bool>;

    /// Alle Bugs laden, neueste zuerst
    async fn list(&self) -> DbResult<Vec<BugRecord>>;

    /// Gesamtzahl der Bugs
    async fn count(&self) -> DbResult<i64>;

    /// Anzahl der Bugs mit dem gegebenen Status
    async fn count_by_status(&self, status: BugStatus) -> DbResult<i64>;

    /// Anzahl der Bugs mit der gegebenen Severity
    async fn count_by_severity(&self, severity: Stufe) -> DbResult<i64>;

    /// Anzahl der Bugs die seit `seit` auf "resolved" aktualisiert wurden
    async fn count_resolved_since(&self, seit: DateTime<Utc>) -> DbResult<i64>;
}

/// Repository fuer den Aktivitaetslog (append-only)
#[allow(async_fn_in_trait)]
pub trait ActivityRepository: Send + Sync {
    /// Einen Eintrag anhaengen; Eintraege werden nie veraendert oder geloescht
    async fn append(&self, data: NeueAktivitaet<'_>) -> DbResult<AktivitaetRecord>;

    /// Die `limit` neuesten Eintraege, neueste zuerst
    async fn list_recent(&self, limit: i64) -> DbResult<Vec<AktivitaetRecord>>;
}
