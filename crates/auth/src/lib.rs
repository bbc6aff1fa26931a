//! bugtracker-auth – Konto- und Token-Service
//!
//! Drei Bausteine:
//! - `password`: Argon2id-Hashing (Hash nur beim Schreiben, Vergleich beim Lesen)
//! - `token`: signierte Session-Tokens (HS256) mit prozessweitem Schluessel
//! - `service`: Kontoerstellung und Anmeldedaten-Pruefung ueber das UserRepository

pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use service::{AuthService, PASSWORT_MIN_LAENGE};
pub use token::{TokenClaims, TokenDienst};
