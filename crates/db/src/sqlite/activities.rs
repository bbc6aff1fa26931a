//! SQLite-Implementierung des ActivityRepository
//!
//! Der Aktivitaetslog ist append-only: es gibt nur INSERT und SELECT,
//! keine UPDATE- oder DELETE-Pfade.

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{AktivitaetRecord, AktivitaetsTyp, NeueAktivitaet};
use crate::repository::{ActivityRepository, DbResult};
use crate::sqlite::bugs::parse_zeitstempel;
use crate::sqlite::pool::SqliteDb;

impl ActivityRepository for SqliteDb {
    async fn append(&self, data: NeueAktivitaet<'_>) -> DbResult<AktivitaetRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let metadata_str = data
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            "INSERT INTO activities (id, type, user_id, bug_id, message, metadata_json, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.typ.als_str())
        .bind(data.user_id.to_string())
        .bind(data.bug_id.map(|b| b.to_string()))
        .bind(data.message)
        .bind(&metadata_str)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(AktivitaetRecord {
            id,
            typ: data.typ,
            user_id: data.user_id,
            bug_id: data.bug_id,
            message: data.message.to_string(),
            metadata: data.metadata,
            created_at: now,
        })
    }

    async fn list_recent(&self, limit: i64) -> DbResult<Vec<AktivitaetRecord>> {
        let rows = sqlx::query(
            "SELECT id, type, user_id, bug_id, message, metadata_json, created_at
             FROM activities ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_aktivitaet).collect()
    }
}

fn row_to_aktivitaet(row: &sqlx::sqlite::SqliteRow) -> DbResult<AktivitaetRecord> {
    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let typ_str: String = row.try_get("type")?;
    let typ: AktivitaetsTyp = typ_str.parse().map_err(|e: String| DbError::intern(e))?;

    let user_str: String = row.try_get("user_id")?;
    let user_id = Uuid::parse_str(&user_str)
        .map_err(|e| DbError::intern(format!("Ungueltige user_id '{user_str}': {e}")))?;

    let bug_str: Option<String> = row.try_get("bug_id")?;
    let bug_id = bug_str
        .as_deref()
        .map(|s| {
            Uuid::parse_str(s)
                .map_err(|e| DbError::intern(format!("Ungueltige bug_id '{s}': {e}")))
        })
        .transpose()?;

    let metadata_str: Option<String> = row.try_get("metadata_json")?;
    let metadata = metadata_str
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(AktivitaetRecord {
        id,
        typ,
        user_id,
        bug_id,
        message: row.try_get("message")?,
        metadata,
        created_at: parse_zeitstempel(row, "created_at")?,
    })
}
