//! bugtracker-api – HTTP-Schicht (axum)
//!
//! Uebersetzt die Dienste aus `bugtracker-auth` und `bugtracker-tracking`
//! in eine REST-Oberflaeche unter /api. Fehler werden in `error` auf
//! Statuscodes abgebildet, Authentifizierung laeuft als Middleware.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use middleware::AuthIdentitaet;
pub use routes::router;
pub use state::ApiState;
