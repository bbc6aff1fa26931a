//! Dashboard-Statistiken fuer die Admin-Ansicht

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use bugtracker_db::{
    models::{BugStatus, Rolle, Stufe},
    repository::{BugRepository, UserRepository},
};

use crate::error::TrackingResult;

/// Aggregierte Kennzahlen fuer das Admin-Dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistik {
    pub total_bugs: i64,
    pub open_bugs: i64,
    pub in_progress_bugs: i64,
    pub resolved_bugs: i64,
    pub closed_bugs: i64,
    pub critical_bugs: i64,
    pub high_bugs: i64,
    pub medium_bugs: i64,
    pub low_bugs: i64,
    /// Bugs die heute (UTC, ab Mitternacht) auf "resolved" gesetzt wurden
    pub resolved_today: i64,
    pub total_users: i64,
    pub admin_users: i64,
}

/// Statistik-Dienst – reine Zaehlabfragen, keine Seiteneffekte
pub struct StatistikDienst<D>
where
    D: BugRepository + UserRepository,
{
    db: Arc<D>,
}

impl<D> StatistikDienst<D>
where
    D: BugRepository + UserRepository,
{
    pub fn neu(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Erhebt alle Kennzahlen
    pub async fn erheben(&self) -> TrackingResult<Statistik> {
        let db = self.db.as_ref();

        let heute_beginn = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("Mitternacht ist immer gueltig")
            .and_utc();

        Ok(Statistik {
            total_bugs: BugRepository::count(db).await?,
            open_bugs: BugRepository::count_by_status(db, BugStatus::Open).await?,
            in_progress_bugs: BugRepository::count_by_status(db, BugStatus::InProgress).await?,
            resolved_bugs: BugRepository::count_by_status(db, BugStatus::Resolved).await?,
            closed_bugs: BugRepository::count_by_status(db, BugStatus::Closed).await?,
            critical_bugs: BugRepository::count_by_severity(db, Stufe::Critical).await?,
            high_bugs: BugRepository::count_by_severity(db, Stufe::High).await?,
            medium_bugs: BugRepository::count_by_severity(db, Stufe::Medium).await?,
            low_bugs: BugRepository::count_by_severity(db, Stufe::Low).await?,
            resolved_today: BugRepository::count_resolved_since(db, heute_beginn).await?,
            total_users: UserRepository::count(db).await?,
            admin_users: UserRepository::count_by_role(db, Rolle::Admin).await?,
        })
    }
}
