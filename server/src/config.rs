//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Bis auf das Token-Geheimnis
//! haben alle Felder sinnvolle Standardwerte, sodass der Server ohne
//! Konfigurationsdatei lauffaehig ist. Das Geheimnis MUSS gesetzt sein
//! (Datei oder Umgebungsvariable), sonst verweigert der Prozess den Start.

use serde::{Deserialize, Serialize};

use bugtracker_db::DatabaseConfig;

/// Umgebungsvariable, die das Token-Geheimnis aus der Datei ueberschreibt
pub const TOKEN_SECRET_ENV: &str = "BUGTRACKER_TOKEN_SECRET";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Auth-Einstellungen
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub api_port: u16,
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            api_port: 5000,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Journal-Modus
    pub sqlite_wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://bugtracker.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

impl DatenbankEinstellungen {
    /// Uebersetzt in die Konfiguration der Datenbank-Schicht
    pub fn als_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_verbindungen: self.max_verbindungen,
            sqlite_wal: self.sqlite_wal,
        }
    }
}

/// Auth-Einstellungen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Signier-Geheimnis fuer Session-Tokens; Pflichtfeld ohne Standardwert.
    /// Die Umgebungsvariable BUGTRACKER_TOKEN_SECRET hat Vorrang.
    pub token_secret: Option<String>,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Liefert das Token-Geheimnis; Umgebungsvariable schlaegt Datei.
    /// Fehlt beides, startet der Server nicht.
    pub fn token_geheimnis(&self) -> anyhow::Result<String> {
        if let Ok(geheimnis) = std::env::var(TOKEN_SECRET_ENV) {
            if !geheimnis.is_empty() {
                return Ok(geheimnis);
            }
        }
        self.auth
            .token_secret
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Kein Token-Geheimnis konfiguriert: [auth].token_secret setzen \
                     oder {TOKEN_SECRET_ENV} exportieren"
                )
            })
    }

    /// Gibt die vollstaendige Bind-Adresse fuer die REST-API zurueck
    pub fn api_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.api_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.netzwerk.api_port, 5000);
        assert_eq!(cfg.datenbank.max_verbindungen, 5);
        assert!(cfg.datenbank.sqlite_wal);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.api_bind_adresse(), "0.0.0.0:5000");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [netzwerk]
            api_port = 8080

            [auth]
            token_secret = "geheim"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.netzwerk.api_port, 8080);
        assert_eq!(cfg.auth.token_secret.as_deref(), Some("geheim"));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.datenbank.url, "sqlite://bugtracker.db");
    }

    #[test]
    fn fehlendes_geheimnis_ist_fehler() {
        let cfg = ServerConfig::default();
        // Nur aussagekraeftig wenn die Variable in der Testumgebung fehlt
        if std::env::var(TOKEN_SECRET_ENV).is_err() {
            assert!(cfg.token_geheimnis().is_err());
        }
    }

    #[test]
    fn geheimnis_aus_der_datei() {
        let cfg: ServerConfig = toml::from_str(
            r#"
            [auth]
            token_secret = "aus-der-datei"
        "#,
        )
        .unwrap();
        if std::env::var(TOKEN_SECRET_ENV).is_err() {
            assert_eq!(cfg.token_geheimnis().unwrap(), "aus-der-datei");
        }
    }
}
