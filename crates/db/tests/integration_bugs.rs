//! Integration-Tests fuer BugRepository (In-Memory SQLite)

use bugtracker_db::{
    models::{BugStatus, BugUpdate, NeuerBug, Stufe},
    BugRepository, SqliteDb,
};
use uuid::Uuid;

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn neuer_bug<'a>(title: &'a str, reporter_id: Uuid) -> NeuerBug<'a> {
    NeuerBug {
        title,
        description: "Beschreibung",
        severity: Stufe::Medium,
        priority: Stufe::Medium,
        reporter_id,
    }
}

#[tokio::test]
async fn bug_erstellen_startet_mit_status_open() {
    let db = db().await;
    let reporter = Uuid::new_v4();

    let bug = BugRepository::create(&db, neuer_bug("Login kaputt", reporter))
        .await
        .expect("Bug erstellen fehlgeschlagen");

    assert_eq!(bug.status, BugStatus::Open);
    assert_eq!(bug.reporter_id, reporter);
    assert_eq!(bug.created_at, bug.updated_at);

    let geladen = BugRepository::get_by_id(&db, bug.id)
        .await
        .unwrap()
        .expect("Bug sollte gefunden werden");
    assert_eq!(geladen.title, "Login kaputt");
}

#[tokio::test]
async fn bug_partiell_aktualisieren() {
    let db = db().await;
    let bug = BugRepository::create(&db, neuer_bug("Tippfehler", Uuid::new_v4()))
        .await
        .unwrap();

    let aktualisiert = BugRepository::update(
        &db,
        bug.id,
        BugUpdate {
            status: Some(BugStatus::Resolved),
            severity: Some(Stufe::Low),
            ..Default::default()
        },
    )
    .await
    .expect("Update fehlgeschlagen");

    // Nicht gesetzte Felder bleiben unveraendert
    assert_eq!(aktualisiert.title, "Tippfehler");
    assert_eq!(aktualisiert.description, "Beschreibung");
    assert_eq!(aktualisiert.status, BugStatus::Resolved);
    assert_eq!(aktualisiert.severity, Stufe::Low);
    assert!(aktualisiert.updated_at >= bug.updated_at);
}

#[tokio::test]
async fn unbekannter_bug_gibt_nicht_gefunden() {
    let db = db().await;

    let ergebnis = BugRepository::update(
        &db,
        Uuid::new_v4(),
        BugUpdate {
            status: Some(BugStatus::Closed),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(
        ergebnis,
        Err(bugtracker_db::DbError::NichtGefunden(_))
    ));

    assert!(!BugRepository::delete(&db, Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn liste_neueste_zuerst() {
    let db = db().await;
    let reporter = Uuid::new_v4();

    let erster = BugRepository::create(&db, neuer_bug("Erster", reporter))
        .await
        .unwrap();
    // RFC3339-Zeitstempel haben Nanosekunden-Aufloesung, aber die Reihenfolge
    // innerhalb derselben Nanosekunde ist nicht definiert; kurze Pause
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let zweiter = BugRepository::create(&db, neuer_bug("Zweiter", reporter))
        .await
        .unwrap();

    let liste = BugRepository::list(&db).await.unwrap();
    assert_eq!(liste.len(), 2);
    assert_eq!(liste[0].id, zweiter.id);
    assert_eq!(liste[1].id, erster.id);
}

#[tokio::test]
async fn bugs_zaehlen() {
    let db = db().await;
    let reporter = Uuid::new_v4();

    let b1 = BugRepository::create(
        &db,
        NeuerBug {
            severity: Stufe::Critical,
            ..neuer_bug("Kritisch", reporter)
        },
    )
    .await
    .unwrap();
    BugRepository::create(&db, neuer_bug("Normal", reporter))
        .await
        .unwrap();

    BugRepository::update(
        &db,
        b1.id,
        BugUpdate {
            status: Some(BugStatus::Resolved),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(BugRepository::count(&db).await.unwrap(), 2);
    assert_eq!(
        BugRepository::count_by_status(&db, BugStatus::Resolved)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        BugRepository::count_by_status(&db, BugStatus::Open)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        BugRepository::count_by_severity(&db, Stufe::Critical)
            .await
            .unwrap(),
        1
    );

    let heute = chrono::Utc::now() - chrono::Duration::hours(1);
    assert_eq!(
        BugRepository::count_resolved_since(&db, heute).await.unwrap(),
        1
    );
    let zukunft = chrono::Utc::now() + chrono::Duration::hours(1);
    assert_eq!(
        BugRepository::count_resolved_since(&db, zukunft)
            .await
            .unwrap(),
        0
    );
}
