//! Geteilter Zustand fuer alle HTTP-Handler

use std::sync::Arc;

use bugtracker_auth::{AuthService, TokenDienst};
use bugtracker_db::SqliteDb;
use bugtracker_tracking::{AktivitaetsLog, BugDienst, StatistikDienst};

/// Axum-State: Datenbank-Handle plus die Dienste der Fachschicht
///
/// Alles haengt am selben `SqliteDb`-Handle, der beim Start geoeffnet und
/// hier injiziert wird (kein globaler Verbindungszustand).
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<SqliteDb>,
    pub auth: Arc<AuthService<SqliteDb>>,
    pub token: Arc<TokenDienst>,
    pub bugs: Arc<BugDienst<SqliteDb>>,
    pub log: Arc<AktivitaetsLog<SqliteDb>>,
    pub statistik: Arc<StatistikDienst<SqliteDb>>,
}

impl ApiState {
    /// Verdrahtet alle Dienste auf einem gemeinsamen Datenbank-Handle
    pub fn neu(db: Arc<SqliteDb>, token: Arc<TokenDienst>) -> Self {
        Self {
            auth: Arc::new(AuthService::neu(Arc::clone(&db))),
            bugs: Arc::new(BugDienst::neu(Arc::clone(&db))),
            log: Arc::new(AktivitaetsLog::neu(Arc::clone(&db))),
            statistik: Arc::new(StatistikDienst::neu(Arc::clone(&db))),
            token,
            db,
        }
    }
}
