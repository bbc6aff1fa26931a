//! bugtracker-db – Datenbank-Abstraktion
//!
//! Stellt das Repository-Pattern fuer Benutzer, Bugs und den Aktivitaetslog
//! bereit. Die konkrete Implementierung laeuft auf SQLite (sqlx) mit
//! WAL-Modus; Tests verwenden eine In-Memory-Datenbank.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use repository::{ActivityRepository, BugRepository, DatabaseConfig, UserRepository};
pub use sqlite::SqliteDb;
