//! Bug-Lebenszyklus-Verwaltung
//!
//! Alle Status sind von allen anderen erreichbar; ein tatsaechlicher
//! Statuswechsel erzeugt genau einen `status_changed`-Eintrag im
//! Aktivitaetslog, ein unveraenderter Status keinen. Der Anzeigename des
//! Melders wird bei jedem Lesen aufgeloest und nie am Bug gecacht.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use bugtracker_db::{
    models::{AktivitaetsTyp, BugRecord, BugUpdate, NeueAktivitaet, NeuerBug, Stufe},
    repository::{ActivityRepository, BugRepository, UserRepository},
};

use crate::error::{TrackingError, TrackingResult};

/// Platzhalter fuer nicht aufloesbare Melder-Referenzen
pub const UNBEKANNTER_MELDER: &str = "Unknown";

/// Bug mit aufgeloestem Melder-Anzeigenamen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugMitMelder {
    #[serde(flatten)]
    pub bug: BugRecord,
    pub reported_by: String,
}

/// Eingabe zum Erstellen eines neuen Bugs
#[derive(Debug, Clone, Default)]
pub struct NeuerBugEingabe {
    pub title: String,
    pub description: String,
    pub severity: Option<Stufe>,
    pub priority: Option<Stufe>,
}

/// Bug-Dienst – Lebenszyklus und Aktivitaets-Kopplung
///
/// `D` ist der Storage-Handle (SQLite-Pool); die Trait-Grenzen erlauben in
/// Tests den Austausch gegen eine In-Memory-Datenbank.
pub struct BugDienst<D>
where
    D: BugRepository + UserRepository + ActivityRepository,
{
    db: Arc<D>,
}

impl<D> BugDienst<D>
where
    D: BugRepository + UserRepository + ActivityRepository,
{
    pub fn neu(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Erstellt einen Bug und haengt einen `bug_created`-Eintrag an
    pub async fn erstellen(
        &self,
        reporter_id: Uuid,
        eingabe: NeuerBugEingabe,
    ) -> TrackingResult<BugMitMelder> {
        if eingabe.title.trim().is_empty() || eingabe.description.trim().is_empty() {
            return Err(TrackingError::validierung(
                "Titel und Beschreibung sind erforderlich",
            ));
        }

        let bug = BugRepository::create(
            self.db.as_ref(),
            NeuerBug {
                title: &eingabe.title,
                description: &eingabe.description,
                severity: eingabe.severity.unwrap_or(Stufe::Medium),
                priority: eingabe.priority.unwrap_or(Stufe::Medium),
                reporter_id,
            },
        )
        .await?;

        ActivityRepository::append(
            self.db.as_ref(),
            NeueAktivitaet {
                typ: AktivitaetsTyp::BugCreated,
                user_id: reporter_id,
                bug_id: Some(bug.id),
                message: &format!("reported issue \"{}\"", bug.title),
                metadata: None,
            },
        )
        .await?;

        tracing::info!(bug_id = %bug.id, reporter_id = %reporter_id, "Bug erstellt");

        let reported_by = self.melder_name(reporter_id).await?;
        Ok(BugMitMelder { bug, reported_by })
    }

    /// Aktualisiert einen Bug partiell; nicht gesetzte Felder bleiben unveraendert
    ///
    /// Wechselt der Status tatsaechlich, wird genau ein
    /// `status_changed`-Eintrag mit {oldStatus, newStatus} angehaengt.
    /// Schlaegt der Append fehl, schlaegt die gesamte Operation fehl.
    pub async fn aktualisieren(
        &self,
        bug_id: Uuid,
        acting_user_id: Uuid,
        patch: BugUpdate,
    ) -> TrackingResult<BugMitMelder> {
        let vorher = BugRepository::get_by_id(self.db.as_ref(), bug_id)
            .await?
            .ok_or_else(|| TrackingError::nicht_gefunden("Bug"))?;

        let status_wechsel = match patch.status {
            Some(neu) if neu != vorher.status => Some((vorher.status, neu)),
            _ => None,
        };

        let bug = BugRepository::update(self.db.as_ref(), bug_id, patch).await?;

        if let Some((alt, neu)) = status_wechsel {
            ActivityRepository::append(
                self.db.as_ref(),
                NeueAktivitaet {
                    typ: AktivitaetsTyp::StatusChanged,
                    user_id: acting_user_id,
                    bug_id: Some(bug.id),
                    message: &format!("changed status to \"{}\"", neu.als_str()),
                    metadata: Some(json!({
                        "oldStatus": alt.als_str(),
                        "newStatus": neu.als_str(),
                    })),
                },
            )
            .await?;

            tracing::info!(
                bug_id = %bug.id,
                alt = alt.als_str(),
                neu = neu.als_str(),
                "Bug-Status gewechselt"
            );
        }

        let reported_by = self.melder_name(bug.reporter_id).await?;
        Ok(BugMitMelder { bug, reported_by })
    }

    /// Loescht einen Bug endgueltig
    ///
    /// Erzeugt bewusst keinen Aktivitaetseintrag (Asymmetrie gegenueber
    /// Erstellung und Statuswechsel, Verhalten des Vorgaengers).
    pub async fn loeschen(&self, bug_id: Uuid) -> TrackingResult<()> {
        let geloescht = BugRepository::delete(self.db.as_ref(), bug_id).await?;
        if !geloescht {
            return Err(TrackingError::nicht_gefunden("Bug"));
        }
        tracing::info!(bug_id = %bug_id, "Bug geloescht");
        Ok(())
    }

    /// Alle Bugs, neueste zuerst, mit aufgeloesten Melder-Namen
    pub async fn liste(&self) -> TrackingResult<Vec<BugMitMelder>> {
        let bugs = BugRepository::list(self.db.as_ref()).await?;

        // Namen in einem Rutsch aufloesen statt pro Bug einzeln
        let namen: HashMap<Uuid, String> = UserRepository::list(self.db.as_ref())
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(bugs
            .into_iter()
            .map(|bug| {
                let reported_by = namen
                    .get(&bug.reporter_id)
                    .cloned()
                    .unwrap_or_else(|| UNBEKANNTER_MELDER.to_string());
                BugMitMelder { bug, reported_by }
            })
            .collect())
    }

    /// Einen einzelnen Bug laden
    pub async fn laden(&self, bug_id: Uuid) -> TrackingResult<BugMitMelder> {
        let bug = BugRepository::get_by_id(self.db.as_ref(), bug_id)
            .await?
            .ok_or_else(|| TrackingError::nicht_gefunden("Bug"))?;
        let reported_by = self.melder_name(bug.reporter_id).await?;
        Ok(BugMitMelder { bug, reported_by })
    }

    async fn melder_name(&self, reporter_id: Uuid) -> TrackingResult<String> {
        Ok(UserRepository::get_by_id(self.db.as_ref(), reporter_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| UNBEKANNTER_MELDER.to_string()))
    }
}
