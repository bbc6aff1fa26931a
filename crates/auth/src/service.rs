//! Konto-Service fuer den Bugtracker
//!
//! Zentraler Service fuer Kontoerstellung und Anmeldedaten-Pruefung.
//! Nutzt das UserRepository und das Passwort-Modul; die Token-Ausstellung
//! liegt im TokenDienst.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use bugtracker_db::{
    models::{BenutzerRecord, NeuerBenutzer, PraesenzStatus, Rolle},
    repository::UserRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
};

/// Mindestlaenge eines Passworts
pub const PASSWORT_MIN_LAENGE: usize = 6;

/// E-Mail-Muster: local@domain.tld, keine Leerzeichen, kein zweites '@'
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("E-Mail-Regex ungueltig"))
}

/// Auth-Service – Kontoerstellung und Anmeldedaten-Pruefung
pub struct AuthService<U: UserRepository> {
    user_repo: Arc<U>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn neu(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Legt ein neues Konto an
    ///
    /// Das Passwort wird genau einmal gehasht (Argon2id, salted) und nur als
    /// Hash persistiert. Der zurueckgegebene Record traegt den Hash intern,
    /// nach aussen geht ausschliesslich `BenutzerRecord::oeffentlich()`.
    pub async fn konto_erstellen(
        &self,
        name: &str,
        email: &str,
        passwort: &str,
        rolle: Rolle,
    ) -> AuthResult<BenutzerRecord> {
        if name.trim().is_empty() || email.trim().is_empty() || passwort.is_empty() {
            return Err(AuthError::validierung(
                "Name, E-Mail und Passwort sind erforderlich",
            ));
        }
        if !email_regex().is_match(email) {
            return Err(AuthError::EmailFormat(email.to_string()));
        }
        if passwort.len() < PASSWORT_MIN_LAENGE {
            return Err(AuthError::PasswortRichtlinie(PASSWORT_MIN_LAENGE));
        }

        // Vorab-Pruefung; das UNIQUE-Constraint der DB faengt den Wettlauf
        if self.user_repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben);
        }

        let passwort_hash = passwort_hashen(passwort)?;

        let benutzer = self
            .user_repo
            .create(NeuerBenutzer {
                name,
                email,
                password_hash: &passwort_hash,
                rolle,
                status: PraesenzStatus::Offline,
            })
            .await
            .map_err(|e| {
                if e.ist_eindeutigkeit() {
                    AuthError::EmailVergeben
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        tracing::info!(
            user_id = %benutzer.id,
            rolle = benutzer.rolle.als_str(),
            "Neues Konto angelegt"
        );

        Ok(benutzer)
    }

    /// Prueft E-Mail und Passwort und gibt den passenden Benutzer zurueck
    ///
    /// Unbekannte E-Mail und falsches Passwort liefern denselben Fehler.
    /// Die Verifikation vergleicht nur; es wird nie ein Hash zurueckgeschrieben.
    pub async fn anmeldedaten_pruefen(
        &self,
        email: &str,
        passwort: &str,
    ) -> AuthResult<BenutzerRecord> {
        let benutzer = self
            .user_repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        let korrekt = passwort_verifizieren(passwort, &benutzer.password_hash)?;
        if !korrekt {
            tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        Ok(benutzer)
    }
}
