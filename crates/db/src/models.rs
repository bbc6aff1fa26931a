//! Datenbankmodelle fuer den Bugtracker
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den API-DTOs getrennt und dienen als reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Rolle eines Benutzers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rolle {
    User,
    Admin,
}

impl Rolle {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Rolle {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unbekannte Rolle: {other}")),
        }
    }
}

/// Anwesenheitsstatus eines Benutzers
///
/// Die Wire-Werte sind grossgeschrieben ("Online"/"Offline").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PraesenzStatus {
    Online,
    Offline,
}

impl PraesenzStatus {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

impl std::str::FromStr for PraesenzStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Online" => Ok(Self::Online),
            "Offline" => Ok(Self::Offline),
            other => Err(format!("Unbekannter Status: {other}")),
        }
    }
}

/// Benutzer-Datensatz aus der Datenbank
///
/// Implementiert bewusst kein `Serialize`: der Passwort-Hash darf nie in
/// einer Antwort landen. Nach aussen geht nur `BenutzerOeffentlich`.
#[derive(Debug, Clone)]
pub struct BenutzerRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub rolle: Rolle,
    pub status: PraesenzStatus,
    pub created_at: DateTime<Utc>,
}

impl BenutzerRecord {
    /// Oeffentliche Darstellung ohne Passwort-Hash
    pub fn oeffentlich(&self) -> BenutzerOeffentlich {
        BenutzerOeffentlich {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.rolle,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Benutzer-Darstellung fuer API-Antworten (ohne Passwort-Hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenutzerOeffentlich {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Rolle,
    pub status: PraesenzStatus,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub rolle: Rolle,
    pub status: PraesenzStatus,
}

/// Daten zum Aktualisieren eines Benutzers
#[derive(Debug, Clone, Default)]
pub struct BenutzerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub rolle: Option<Rolle>,
    pub status: Option<PraesenzStatus>,
}

// ---------------------------------------------------------------------------
// Bugs
// ---------------------------------------------------------------------------

/// Einstufung eines Bugs (verwendet fuer Severity und Prioritaet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stufe {
    Low,
    Medium,
    High,
    Critical,
}

impl Stufe {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::str::FromStr for Stufe {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("Unbekannte Stufe: {other}")),
        }
    }
}

/// Lebenszyklus-Status eines Bugs
///
/// Alle Uebergaenge sind erlaubt; jeder tatsaechliche Wechsel erzeugt genau
/// einen `status_changed`-Aktivitaetseintrag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BugStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl BugStatus {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for BugStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(format!("Unbekannter Bug-Status: {other}")),
        }
    }
}

/// Bug-Datensatz aus der Datenbank
///
/// `reporter_id` ist nach Erstellung unveraenderlich; der Anzeigename des
/// Melders wird beim Lesen aufgeloest und nie am Datensatz gecacht.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: Stufe,
    pub priority: Stufe,
    pub status: BugStatus,
    pub reporter_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Bugs
#[derive(Debug, Clone)]
pub struct NeuerBug<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub severity: Stufe,
    pub priority: Stufe,
    pub reporter_id: Uuid,
}

/// Daten zum Aktualisieren eines Bugs (partielle Semantik)
///
/// Nicht gesetzte Felder bleiben unveraendert.
#[derive(Debug, Clone, Default)]
pub struct BugUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Stufe>,
    pub priority: Option<Stufe>,
    pub status: Option<BugStatus>,
}

// ---------------------------------------------------------------------------
// Aktivitaeten
// ---------------------------------------------------------------------------

/// Typ eines Aktivitaetseintrags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AktivitaetsTyp {
    BugCreated,
    BugUpdated,
    StatusChanged,
    UserCreated,
    UserLogin,
    UserLogout,
}

impl AktivitaetsTyp {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::BugCreated => "bug_created",
            Self::BugUpdated => "bug_updated",
            Self::StatusChanged => "status_changed",
            Self::UserCreated => "user_created",
            Self::UserLogin => "user_login",
            Self::UserLogout => "user_logout",
        }
    }
}

impl std::str::FromStr for AktivitaetsTyp {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug_created" => Ok(Self::BugCreated),
            "bug_updated" => Ok(Self::BugUpdated),
            "status_changed" => Ok(Self::StatusChanged),
            "user_created" => Ok(Self::UserCreated),
            "user_login" => Ok(Self::UserLogin),
            "user_logout" => Ok(Self::UserLogout),
            other => Err(format!("Unbekannter Aktivitaetstyp: {other}")),
        }
    }
}

/// Aktivitaets-Datensatz (append-only, wird nie aktualisiert oder geloescht)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AktivitaetRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub typ: AktivitaetsTyp,
    pub user_id: Uuid,
    pub bug_id: Option<Uuid>,
    pub message: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Anhaengen eines neuen Aktivitaetseintrags
#[derive(Debug, Clone)]
pub struct NeueAktivitaet<'a> {
    pub typ: AktivitaetsTyp,
    pub user_id: Uuid,
    pub bug_id: Option<Uuid>,
    pub message: &'a str,
    pub metadata: Option<serde_json::Value>,
}
