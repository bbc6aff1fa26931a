//! End-to-End-Test der HTTP-Schicht gegen eine In-Memory-Datenbank
//!
//! Faehrt den kompletten Ablauf durch: Konto anlegen, anmelden, Bug
//! erstellen, Status wechseln, Admin-Sichten pruefen und die Grenzen
//! der Zugriffskontrolle abklopfen.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bugtracker_auth::{AuthService, TokenDienst};
use bugtracker_db::{models::Rolle, SqliteDb};
use bugtracker_api::{router, ApiState};

async fn test_app() -> (Router, ApiState) {
    let db = Arc::new(SqliteDb::in_memory().await.expect("In-Memory-Datenbank"));
    let token = Arc::new(TokenDienst::neu("test-geheimnis-nur-fuer-tests"));
    let state = ApiState::neu(db, token);
    (router(state.clone()), state)
}

/// Legt direkt ueber den Dienst einen Admin an und gibt dessen Token zurueck
async fn admin_anlegen(state: &ApiState) -> (String, uuid::Uuid) {
    let auth = AuthService::neu(Arc::clone(&state.db));
    let admin = auth
        .konto_erstellen("Root Admin", "admin@example.com", "admin123", Rolle::Admin)
        .await
        .expect("Admin anlegen");
    let token = state.token.ausstellen(&admin).expect("Admin-Token");
    (token, admin.id)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request_mit_token(method: Method, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn antwort_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("JSON-Antwort")
}

#[tokio::test]
async fn kompletter_ablauf_von_signup_bis_admin() {
    let (app, state) = test_app().await;

    // Signup: 201, Antwort enthaelt Token aber nie das Passwort
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/signup",
            json!({ "name": "Ann", "email": "ann@example.com", "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = antwort_json(response).await;
    assert_eq!(body["user"]["name"], "Ann");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["token"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    // Falsches Passwort: 401 mit generischer Meldung
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/signin",
            json!({ "email": "ann@example.com", "password": "falsch1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Korrektes Passwort: 200 mit Token, Status geht auf online
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/signin",
            json!({ "email": "ann@example.com", "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = antwort_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["status"], "Online");

    // Bug anlegen: 201, Status open, Melder ist Ann
    let response = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::POST,
            "/api/bugs",
            &token,
            json!({ "title": "Login schlaegt fehl", "description": "Nach Passwortwechsel kein Login mehr moeglich", "severity": "high" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = antwort_json(response).await;
    assert_eq!(body["bug"]["status"], "open");
    assert_eq!(body["bug"]["reportedBy"], "Ann");
    let bug_id = body["bug"]["id"].as_str().unwrap().to_string();

    // Statuswechsel auf resolved
    let response = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::PUT,
            &format!("/api/bugs/{bug_id}"),
            &token,
            json!({ "status": "resolved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = antwort_json(response).await;
    assert_eq!(body["bug"]["status"], "resolved");

    // Admin sieht den Statuswechsel im Aktivitaetslog
    let (admin_token, admin_id) = admin_anlegen(&state).await;
    let response = app
        .clone()
        .oneshot(get_request("/api/admin/activities?limit=5", &admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = antwort_json(response).await;
    let activities = body["activities"].as_array().unwrap();
    assert!(activities
        .iter()
        .any(|a| a["type"] == "status_changed"
            && a["metadata"]["newStatus"] == "resolved"));

    // Normaler Benutzer auf Admin-Route: 403
    let response = app
        .clone()
        .oneshot(get_request("/api/admin/stats", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Ohne Token: 401
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/bugs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Admin kann das eigene Konto nicht loeschen: 400
    let response = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::DELETE,
            &format!("/api/admin/users/{admin_id}"),
            &admin_token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn doppelte_email_liefert_409() {
    let (app, _state) = test_app().await;

    let signup = |email: &str| {
        json_request(
            Method::POST,
            "/api/auth/signup",
            json!({ "name": "Bob", "email": email, "password": "secret1" }),
        )
    };

    let response = app.clone().oneshot(signup("bob@example.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(signup("bob@example.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn validierungsfehler_liefern_400() {
    let (app, _state) = test_app().await;

    // Passwort zu kurz
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/signup",
            json!({ "name": "Eve", "email": "eve@example.com", "password": "123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // E-Mail-Format ungueltig
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/signup",
            json!({ "name": "Eve", "email": "keine-mail", "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Fehlende Felder beim Signin
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/auth/signin", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unbekannter_bug_liefert_404() {
    let (app, state) = test_app().await;
    let (admin_token, _) = admin_anlegen(&state).await;

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/bugs/{}", uuid::Uuid::new_v4()),
            &admin_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_ist_offen() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = antwort_json(response).await;
    assert_eq!(body["status"], "ok");
}
