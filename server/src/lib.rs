//! bugtracker-server – Bibliotheks-Root
//!
//! Verdrahtet Datenbank, Dienste und HTTP-Schicht und stellt den
//! Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::sync::Arc;

use anyhow::Result;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use bugtracker_api::{router, ApiState};
use bugtracker_auth::TokenDienst;
use bugtracker_db::SqliteDb;

use config::ServerConfig;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet den Server und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Token-Geheimnis pruefen (Start verweigern wenn es fehlt)
    /// 2. Datenbank oeffnen und Migrationen ausfuehren
    /// 3. Router mit CORS- und Trace-Layern aufbauen
    /// 4. HTTP-Listener binden und bis Ctrl-C bedienen
    pub async fn starten(self) -> Result<()> {
        let geheimnis = self.config.token_geheimnis()?;

        let db = Arc::new(
            SqliteDb::oeffnen(&self.config.datenbank.als_database_config()).await?,
        );

        let state = ApiState::neu(db, Arc::new(TokenDienst::neu(&geheimnis)));

        let cors = cors_layer(&self.config.netzwerk.cors_origins)?;
        let app = router(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        let adresse = self.config.api_bind_adresse();
        let listener = tokio::net::TcpListener::bind(&adresse).await?;
        tracing::info!(adresse = %adresse, "REST-API bereit");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server beendet");
        Ok(())
    }
}

/// Baut den CORS-Layer aus der Origin-Liste; leere Liste erlaubt alle
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let mut werte = Vec::with_capacity(origins.len());
    for origin in origins {
        werte.push(
            origin
                .parse()
                .map_err(|e| anyhow::anyhow!("Ungueltige CORS-Origin '{origin}': {e}"))?,
        );
    }
    Ok(layer.allow_origin(AllowOrigin::list(werte)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(fehler = %e, "Shutdown-Signal nicht verfuegbar");
        return;
    }
    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}
