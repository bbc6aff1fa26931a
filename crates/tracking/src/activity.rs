//! Aktivitaetslog – append-only Lesepfad und Aufzeichnung
//!
//! Eintraege werden synchron zur ausloesenden Operation angehaengt und in
//! normalem Betrieb nie veraendert oder geloescht. Der Lesepfad loest
//! Benutzer- und Bug-Referenzen per Nachschlag auf; haengende Referenzen
//! lassen den Lesevorgang nicht fehlschlagen.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bugtracker_db::{
    models::{AktivitaetsTyp, NeueAktivitaet},
    repository::{ActivityRepository, BugRepository, UserRepository},
};

use crate::error::TrackingResult;

/// Standard-Limit fuer die "letzte Aktivitaeten"-Abfrage
pub const STANDARD_LIMIT: i64 = 10;

/// Referenz auf den handelnden Benutzer, soweit aufloesbar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRef {
    pub id: Uuid,
    pub name: String,
}

/// Referenz auf den betroffenen Bug, soweit aufloesbar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugRef {
    pub id: Uuid,
    pub title: String,
}

/// Aktivitaetseintrag mit aufgeloesten Referenzen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AktivitaetAufgeloest {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub typ: AktivitaetsTyp,
    pub message: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    /// None wenn der Benutzer inzwischen geloescht wurde
    pub user: Option<BenutzerRef>,
    /// None bei benutzerbezogenen Eintraegen oder geloeschtem Bug
    pub bug: Option<BugRef>,
}

/// Aktivitaetslog-Dienst
pub struct AktivitaetsLog<D>
where
    D: ActivityRepository + UserRepository + BugRepository,
{
    db: Arc<D>,
}

impl<D> AktivitaetsLog<D>
where
    D: ActivityRepository + UserRepository + BugRepository,
{
    pub fn neu(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Haengt einen Eintrag an den Log an
    pub async fn aufzeichnen(
        &self,
        typ: AktivitaetsTyp,
        user_id: Uuid,
        bug_id: Option<Uuid>,
        message: &str,
        metadata: Option<serde_json::Value>,
    ) -> TrackingResult<()> {
        ActivityRepository::append(
            self.db.as_ref(),
            NeueAktivitaet {
                typ,
                user_id,
                bug_id,
                message,
                metadata,
            },
        )
        .await?;
        Ok(())
    }

    /// Die `limit` neuesten Eintraege, neueste zuerst, mit aufgeloesten Referenzen
    pub async fn letzte(&self, limit: i64) -> TrackingResult<Vec<AktivitaetAufgeloest>> {
        let eintraege = ActivityRepository::list_recent(self.db.as_ref(), limit).await?;

        let benutzer: HashMap<Uuid, String> = UserRepository::list(self.db.as_ref())
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let bugs: HashMap<Uuid, String> = BugRepository::list(self.db.as_ref())
            .await?
            .into_iter()
            .map(|b| (b.id, b.title))
            .collect();

        Ok(eintraege
            .into_iter()
            .map(|e| {
                let user = benutzer.get(&e.user_id).map(|name| BenutzerRef {
                    id: e.user_id,
                    name: name.clone(),
                });
                let bug = e.bug_id.and_then(|bug_id| {
                    bugs.get(&bug_id).map(|title| BugRef {
                        id: bug_id,
                        title: title.clone(),
                    })
                });
                AktivitaetAufgeloest {
                    id: e.id,
                    typ: e.typ,
                    message: e.message,
                    metadata: e.metadata,
                    created_at: e.created_at,
                    user,
                    bug,
                }
            })
            .collect())
    }
}
