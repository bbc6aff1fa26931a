//! SQLite-Implementierung des BugRepository

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BugRecord, BugStatus, BugUpdate, NeuerBug, Stufe};
use crate::repository::{BugRepository, DbResult};
use crate::sqlite::pool::SqliteDb;

impl BugRepository for SqliteDb {
    async fn create(&self, data: NeuerBug<'_>) -> DbResult<BugRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        sqlx::query(
            "INSERT INTO bugs (id, title, description, severity, priority, status, reporter_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 'open', ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.title)
        .bind(data.description)
        .bind(data.severity.als_str())
        .bind(data.priority.als_str())
        .bind(data.reporter_id.to_string())
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await?;

        Ok(BugRecord {
            id,
            title: data.title.to_string(),
            description: data.description.to_string(),
            severity: data.severity,
            priority: data.priority,
            status: BugStatus::Open,
            reporter_id: data.reporter_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BugRecord>> {
        let row = sqlx::query(
            "SELECT id, title, description, severity, priority, status, reporter_id, created_at, updated_at
             FROM bugs WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_bug(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: BugUpdate) -> DbResult<BugRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.title.is_some() {
            sets.push("title = ?");
        }
        if data.description.is_some() {
            sets.push("description = ?");
        }
        if data.severity.is_some() {
            sets.push("severity = ?");
        }
        if data.priority.is_some() {
            sets.push("priority = ?");
        }
        if data.status.is_some() {
            sets.push("status = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Bug {id}")));
        }

        sets.push("updated_at = ?");
        let sql = format!("UPDATE bugs SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.title {
            q = q.bind(v);
        }
        if let Some(ref v) = data.description {
            q = q.bind(v);
        }
        if let Some(v) = data.severity {
            q = q.bind(v.als_str());
        }
        if let Some(v) = data.priority {
            q = q.bind(v.als_str());
        }
        if let Some(v) = data.status {
            q = q.bind(v.als_str());
        }
        q = q.bind(Utc::now().to_rfc3339());
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Bug {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Bug nach Update nicht gefunden"))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM bugs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn list(&self) -> DbResult<Vec<BugRecord>> {
        let rows = sqlx::query(
            "SELECT id, title, description, severity, priority, status, reporter_id, created_at, updated_at
             FROM bugs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_bug).collect()
    }

    async fn count(&self) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM bugs")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("cnt")?)
    }

    async fn count_by_status(&self, status: BugStatus) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM bugs WHERE status = ?")
            .bind(status.als_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("cnt")?)
    }

    async fn count_by_severity(&self, severity: Stufe) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM bugs WHERE severity = ?")
            .bind(severity.als_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("cnt")?)
    }

    async fn count_resolved_since(&self, seit: DateTime<Utc>) -> DbResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as cnt FROM bugs WHERE status = 'resolved' AND updated_at >= ?",
        )
        .bind(seit.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("cnt")?)
    }
}

fn row_to_bug(row: &sqlx::sqlite::SqliteRow) -> DbResult<BugRecord> {
    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let reporter_str: String = row.try_get("reporter_id")?;
    let reporter_id = Uuid::parse_str(&reporter_str)
        .map_err(|e| DbError::intern(format!("Ungueltige reporter_id '{reporter_str}': {e}")))?;

    let created_at = parse_zeitstempel(row, "created_at")?;
    let updated_at = parse_zeitstempel(row, "updated_at")?;

    let severity_str: String = row.try_get("severity")?;
    let severity: Stufe = severity_str.parse().map_err(|e: String| DbError::intern(e))?;

    let priority_str: String = row.try_get("priority")?;
    let priority: Stufe = priority_str.parse().map_err(|e: String| DbError::intern(e))?;

    let status_str: String = row.try_get("status")?;
    let status: BugStatus = status_str.parse().map_err(|e: String| DbError::intern(e))?;

    Ok(BugRecord {
        id,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        severity,
        priority,
        status,
        reporter_id,
        created_at,
        updated_at,
    })
}

pub(crate) fn parse_zeitstempel(
    row: &sqlx::sqlite::SqliteRow,
    spalte: &str,
) -> DbResult<DateTime<Utc>> {
    let s: String = row.try_get(spalte)?;
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltige {spalte} '{s}': {e}")))
}
