//! Integration-Tests fuer Bug-Dienst, Aktivitaetslog und Statistik
//! (In-Memory SQLite)

use std::sync::Arc;

use bugtracker_db::{
    models::{
        AktivitaetsTyp, BugStatus, BugUpdate, NeuerBenutzer, PraesenzStatus, Rolle, Stufe,
    },
    ActivityRepository, SqliteDb, UserRepository,
};
use bugtracker_tracking::{
    AktivitaetsLog, BugDienst, NeuerBugEingabe, StatistikDienst, TrackingError,
};
use uuid::Uuid;

async fn db() -> Arc<SqliteDb> {
    Arc::new(
        SqliteDb::in_memory()
            .await
            .expect("In-Memory DB konnte nicht erstellt werden"),
    )
}

async fn benutzer_anlegen(db: &SqliteDb, name: &str, email: &str) -> Uuid {
    UserRepository::create(
        db,
        NeuerBenutzer {
            name,
            email,
            password_hash: "hash",
            rolle: Rolle::User,
            status: PraesenzStatus::Offline,
        },
    )
    .await
    .expect("Benutzer anlegen fehlgeschlagen")
    .id
}

fn eingabe(title: &str) -> NeuerBugEingabe {
    NeuerBugEingabe {
        title: title.into(),
        description: "Beschreibung".into(),
        severity: None,
        priority: None,
    }
}

#[tokio::test]
async fn bug_erstellen_loggt_genau_einen_eintrag() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;

    let bug = dienst.erstellen(ann, eingabe("T")).await.expect("Erstellen fehlgeschlagen");

    assert_eq!(bug.bug.status, BugStatus::Open);
    assert_eq!(bug.bug.severity, Stufe::Medium);
    assert_eq!(bug.reported_by, "Ann");

    let eintraege = ActivityRepository::list_recent(db.as_ref(), 10).await.unwrap();
    assert_eq!(eintraege.len(), 1);
    assert_eq!(eintraege[0].typ, AktivitaetsTyp::BugCreated);
    assert_eq!(eintraege[0].bug_id, Some(bug.bug.id));
    assert_eq!(eintraege[0].message, "reported issue \"T\"");
}

#[tokio::test]
async fn bug_ohne_titel_oder_beschreibung_wird_abgelehnt() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;

    let ohne_titel = dienst
        .erstellen(
            ann,
            NeuerBugEingabe {
                title: "  ".into(),
                description: "D".into(),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(ohne_titel, Err(TrackingError::Validierung(_))));

    let ohne_beschreibung = dienst
        .erstellen(
            ann,
            NeuerBugEingabe {
                title: "T".into(),
                description: String::new(),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(ohne_beschreibung, Err(TrackingError::Validierung(_))));
}

#[tokio::test]
async fn statuswechsel_erzeugt_genau_einen_eintrag_mit_metadata() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    let bug = dienst.erstellen(ann, eingabe("T")).await.unwrap();

    let aktualisiert = dienst
        .aktualisieren(
            bug.bug.id,
            ann,
            BugUpdate {
                status: Some(BugStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .expect("Update fehlgeschlagen");
    assert_eq!(aktualisiert.bug.status, BugStatus::InProgress);

    let eintraege = ActivityRepository::list_recent(db.as_ref(), 10).await.unwrap();
    // bug_created + genau ein status_changed
    assert_eq!(eintraege.len(), 2);
    let wechsel = &eintraege[0];
    assert_eq!(wechsel.typ, AktivitaetsTyp::StatusChanged);
    let metadata = wechsel.metadata.as_ref().expect("Metadata fehlt");
    assert_eq!(metadata["oldStatus"], "open");
    assert_eq!(metadata["newStatus"], "in-progress");
}

#[tokio::test]
async fn unveraenderter_status_erzeugt_keinen_eintrag() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    let bug = dienst.erstellen(ann, eingabe("T")).await.unwrap();

    dienst
        .aktualisieren(
            bug.bug.id,
            ann,
            BugUpdate {
                status: Some(BugStatus::Open),
                title: Some("Neuer Titel".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let eintraege = ActivityRepository::list_recent(db.as_ref(), 10).await.unwrap();
    assert_eq!(eintraege.len(), 1, "nur der bug_created-Eintrag erwartet");
}

#[tokio::test]
async fn partielles_update_laesst_andere_felder_stehen() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    let bug = dienst.erstellen(ann, eingabe("T")).await.unwrap();

    let aktualisiert = dienst
        .aktualisieren(
            bug.bug.id,
            ann,
            BugUpdate {
                priority: Some(Stufe::High),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(aktualisiert.bug.title, "T");
    assert_eq!(aktualisiert.bug.description, "Beschreibung");
    assert_eq!(aktualisiert.bug.priority, Stufe::High);
    assert_eq!(aktualisiert.bug.severity, Stufe::Medium);
}

#[tokio::test]
async fn unbekannter_bug_gibt_nicht_gefunden() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;

    let update = dienst
        .aktualisieren(Uuid::new_v4(), ann, BugUpdate::default())
        .await;
    assert!(matches!(update, Err(TrackingError::NichtGefunden(_))));

    let loeschen = dienst.loeschen(Uuid::new_v4()).await;
    assert!(matches!(loeschen, Err(TrackingError::NichtGefunden(_))));
}

#[tokio::test]
async fn loeschen_erzeugt_keinen_eintrag() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    let bug = dienst.erstellen(ann, eingabe("T")).await.unwrap();

    dienst.loeschen(bug.bug.id).await.expect("Loeschen fehlgeschlagen");

    let eintraege = ActivityRepository::list_recent(db.as_ref(), 10).await.unwrap();
    assert_eq!(eintraege.len(), 1, "Loeschen darf keinen Eintrag anhaengen");
}

#[tokio::test]
async fn geloeschter_melder_wird_als_unknown_aufgeloest() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    let bug = dienst.erstellen(ann, eingabe("T")).await.unwrap();

    UserRepository::delete(db.as_ref(), ann).await.unwrap();

    let geladen = dienst.laden(bug.bug.id).await.unwrap();
    assert_eq!(geladen.reported_by, "Unknown");

    let liste = dienst.liste().await.unwrap();
    assert_eq!(liste[0].reported_by, "Unknown");
}

#[tokio::test]
async fn aktivitaetslog_loest_referenzen_auf() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let log = AktivitaetsLog::neu(Arc::clone(&db));
    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    let bug = dienst.erstellen(ann, eingabe("T")).await.unwrap();

    dienst
        .aktualisieren(
            bug.bug.id,
            ann,
            BugUpdate {
                status: Some(BugStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let letzte = log.letzte(5).await.unwrap();
    assert_eq!(letzte.len(), 2);

    let wechsel = &letzte[0];
    assert_eq!(wechsel.typ, AktivitaetsTyp::StatusChanged);
    assert_eq!(wechsel.user.as_ref().unwrap().name, "Ann");
    assert_eq!(wechsel.bug.as_ref().unwrap().title, "T");

    // Geloeschter Benutzer laesst den Lesevorgang nicht fehlschlagen
    UserRepository::delete(db.as_ref(), ann).await.unwrap();
    let letzte = log.letzte(5).await.unwrap();
    assert!(letzte[0].user.is_none());
}

#[tokio::test]
async fn statistik_zaehlt_korrekt() {
    let db = db().await;
    let dienst = BugDienst::neu(Arc::clone(&db));
    let statistik = StatistikDienst::neu(Arc::clone(&db));

    let ann = benutzer_anlegen(&db, "Ann", "ann@x.com").await;
    UserRepository::create(
        db.as_ref(),
        NeuerBenutzer {
            name: "Admin",
            email: "admin@x.com",
            password_hash: "hash",
            rolle: Rolle::Admin,
            status: PraesenzStatus::Online,
        },
    )
    .await
    .unwrap();

    let b1 = dienst
        .erstellen(
            ann,
            NeuerBugEingabe {
                severity: Some(Stufe::Critical),
                ..eingabe("Kritisch")
            },
        )
        .await
        .unwrap();
    dienst.erstellen(ann, eingabe("Normal")).await.unwrap();

    dienst
        .aktualisieren(
            b1.bug.id,
            ann,
            BugUpdate {
                status: Some(BugStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let werte = statistik.erheben().await.unwrap();
    assert_eq!(werte.total_bugs, 2);
    assert_eq!(werte.open_bugs, 1);
    assert_eq!(werte.resolved_bugs, 1);
    assert_eq!(werte.critical_bugs, 1);
    assert_eq!(werte.medium_bugs, 1);
    assert_eq!(werte.resolved_today, 1);
    assert_eq!(werte.total_users, 2);
    assert_eq!(werte.admin_users, 1);
}
