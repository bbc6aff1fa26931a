//! Signierte Session-Tokens (JWT, HS256)
//!
//! `ausstellen` und `pruefen` sind fuer die Claims {userId, role} zueinander
//! invers. Es gibt keine Widerrufsliste: ein Token bleibt bis zu seinem
//! Ablauf gueltig, auch nach einem Signout.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bugtracker_db::models::{BenutzerRecord, Rolle};

use crate::error::{AuthError, AuthResult};

/// Standard-Lebensdauer eines Tokens: 24 Stunden
pub const TOKEN_TTL_SEKUNDEN: i64 = 24 * 60 * 60;

/// Claims eines ausgestellten Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Benutzer-ID
    pub sub: Uuid,
    /// Rolle zum Zeitpunkt der Ausstellung
    pub role: Rolle,
    /// Ausstellungszeitpunkt (Unix-Sekunden)
    pub iat: i64,
    /// Ablaufzeitpunkt (Unix-Sekunden)
    pub exp: i64,
}

/// Token-Dienst mit prozessweitem Signierschluessel
///
/// Der Schluessel wird genau einmal beim Start geladen; fehlt er in der
/// Konfiguration, verweigert der Prozess den Start (siehe server/config.rs).
pub struct TokenDienst {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_sekunden: i64,
}

impl TokenDienst {
    /// Erstellt den Dienst mit dem gegebenen Geheimnis und der Standard-TTL
    pub fn neu(geheimnis: &str) -> Self {
        Self::mit_ttl(geheimnis, TOKEN_TTL_SEKUNDEN)
    }

    /// Erstellt den Dienst mit expliziter TTL (fuer Tests)
    pub fn mit_ttl(geheimnis: &str, ttl_sekunden: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // 60 Sekunden Toleranz fuer Uhrendrift
        validation.leeway = 60;

        Self {
            encoding_key: EncodingKey::from_secret(geheimnis.as_bytes()),
            decoding_key: DecodingKey::from_secret(geheimnis.as_bytes()),
            validation,
            ttl_sekunden,
        }
    }

    /// Stellt ein signiertes Token fuer den Benutzer aus
    pub fn ausstellen(&self, benutzer: &BenutzerRecord) -> AuthResult<String> {
        let jetzt = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: benutzer.id,
            role: benutzer.rolle,
            iat: jetzt,
            exp: jetzt + self.ttl_sekunden,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Intern(format!("Token-Signierung fehlgeschlagen: {e}")))
    }

    /// Prueft Signatur und Ablauf und gibt die dekodierten Claims zurueck
    pub fn pruefen(&self, token: &str) -> AuthResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|daten| daten.claims)
            .map_err(|_| AuthError::TokenUngueltig)
    }
}
