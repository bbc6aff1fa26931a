//! Seed-Tool: setzt die Datenbank zurueck und befuellt sie mit Demodaten
//!
//! Laeuft gegen dieselbe Konfiguration wie der Server. Alle vorhandenen
//! Daten werden geloescht; danach entstehen ein Admin, zwei Benutzer und
//! drei Bugs samt der zugehoerigen Aktivitaetseintraege.

use std::sync::Arc;

use anyhow::Result;

use bugtracker_auth::AuthService;
use bugtracker_db::{
    models::{BugStatus, BugUpdate, Rolle, Stufe},
    SqliteDb,
};
use bugtracker_server::config::ServerConfig;
use bugtracker_tracking::{BugDienst, NeuerBugEingabe};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_pfad =
        std::env::var("BUGTRACKER_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = ServerConfig::laden(&config_pfad)?;

    let db = Arc::new(SqliteDb::oeffnen(&config.datenbank.als_database_config()).await?);

    // Bestehende Daten komplett entfernen
    sqlx::query("DELETE FROM activities").execute(db.pool()).await?;
    sqlx::query("DELETE FROM bugs").execute(db.pool()).await?;
    sqlx::query("DELETE FROM users").execute(db.pool()).await?;
    tracing::info!("Datenbank geleert");

    let auth = AuthService::neu(Arc::clone(&db));
    let bugs = BugDienst::neu(Arc::clone(&db));

    let admin = auth
        .konto_erstellen("Admin User", "admin@bugtracker.local", "admin123", Rolle::Admin)
        .await?;
    let john = auth
        .konto_erstellen("John Doe", "john@example.com", "john123", Rolle::User)
        .await?;
    let jane = auth
        .konto_erstellen("Jane Smith", "jane@example.com", "jane123", Rolle::User)
        .await?;
    tracing::info!("3 Konten angelegt");

    let absturz = bugs
        .erstellen(
            john.id,
            NeuerBugEingabe {
                title: "App stuerzt beim Export ab".into(),
                description: "Der CSV-Export grosser Berichte beendet die App ohne Meldung."
                    .into(),
                severity: Some(Stufe::Critical),
                priority: Some(Stufe::High),
            },
        )
        .await?;

    let layout = bugs
        .erstellen(
            jane.id,
            NeuerBugEingabe {
                title: "Layout bricht auf schmalen Bildschirmen".into(),
                description: "Die Bug-Liste ueberlappt die Seitenleiste unter 400px Breite."
                    .into(),
                severity: Some(Stufe::Medium),
                priority: Some(Stufe::Medium),
            },
        )
        .await?;

    bugs.erstellen(
        john.id,
        NeuerBugEingabe {
            title: "Tippfehler auf der Anmeldeseite".into(),
            description: "\"Pasword\" statt \"Password\" im Eingabefeld.".into(),
            severity: Some(Stufe::Low),
            priority: Some(Stufe::Low),
        },
    )
    .await?;

    // Zwei Statuswechsel, damit der Aktivitaetslog etwas zu zeigen hat
    bugs.aktualisieren(
        absturz.bug.id,
        admin.id,
        BugUpdate {
            status: Some(BugStatus::InProgress),
            ..Default::default()
        },
    )
    .await?;

    bugs.aktualisieren(
        layout.bug.id,
        jane.id,
        BugUpdate {
            status: Some(BugStatus::Resolved),
            ..Default::default()
        },
    )
    .await?;

    tracing::info!("3 Bugs mit 5 Aktivitaetseintraegen angelegt");
    tracing::info!("Zugangsdaten: admin@bugtracker.local / admin123 (Admin)");
    tracing::info!("Zugangsdaten: john@example.com / john123");
    tracing::info!("Zugangsdaten: jane@example.com / jane123");

    db.schliessen().await;
    Ok(())
}
