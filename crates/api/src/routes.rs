//! Routen-Komposition
//!
//! Drei Gruppen: offen (health, signup, signin), geschuetzt (Token noetig)
//! und Admin (Token + Admin-Rolle). Die Layer-Reihenfolge ist wichtig:
//! `route_layer` laeuft von aussen nach innen, `authentifizieren` muss also
//! als letztes angehaengt werden, damit es zuerst laeuft.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::middleware::{admin_erforderlich, authentifizieren};
use crate::state::ApiState;

/// Baut den kompletten Router unter /api auf
pub fn router(state: ApiState) -> Router {
    let offen = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/signin", post(handlers::auth::signin));

    let geschuetzt = Router::new()
        .route("/api/auth/signout", post(handlers::auth::signout))
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/bugs",
            get(handlers::bugs::list_bugs).post(handlers::bugs::create_bug),
        )
        .route(
            "/api/bugs/:id",
            get(handlers::bugs::get_bug)
                .put(handlers::bugs::update_bug)
                .delete(handlers::bugs::delete_bug),
        )
        .route("/api/users", get(handlers::users::list_users))
        // Statische Route vor der :id-Route, axum matcht sie bevorzugt
        .route("/api/users/profile", put(handlers::users::update_profile))
        .route("/api/users/:id", get(handlers::users::get_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentifizieren,
        ));

    let admin = Router::new()
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route("/api/admin/activities", get(handlers::admin::get_activities))
        .route(
            "/api/admin/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route(
            "/api/admin/users/:id",
            put(handlers::admin::update_user).delete(handlers::admin::delete_user),
        )
        .route("/api/admin/bugs", get(handlers::admin::list_bugs))
        .route("/api/admin/bugs/:id", delete(handlers::admin::delete_bug))
        .route_layer(middleware::from_fn(admin_erforderlich))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentifizieren,
        ));

    Router::new()
        .merge(offen)
        .merge(geschuetzt)
        .merge(admin)
        .with_state(state)
}
