//! SQLite-Implementierung des UserRepository

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BenutzerRecord, BenutzerUpdate, NeuerBenutzer, Rolle};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;

impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id_str)
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.rolle.als_str())
        .bind(data.status.als_str())
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits registriert", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(BenutzerRecord {
            id,
            name: data.name.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            rolle: data.rolle,
            status: data.status,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role, status, created_at
             FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role, status, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: BenutzerUpdate) -> DbResult<BenutzerRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.name.is_some() {
            sets.push("name = ?");
        }
        if data.email.is_some() {
            sets.push("email = ?");
        }
        if data.rolle.is_some() {
            sets.push("role = ?");
        }
        if data.status.is_some() {
            sets.push("status = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("User {id}")));
        }

        let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.name {
            q = q.bind(v);
        }
        if let Some(ref v) = data.email {
            q = q.bind(v);
        }
        if let Some(v) = data.rolle {
            q = q.bind(v.als_str());
        }
        if let Some(v) = data.status {
            q = q.bind(v.als_str());
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("User {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("User nach Update nicht gefunden"))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn list(&self) -> DbResult<Vec<BenutzerRecord>> {
        let rows = sqlx::query(
            "SELECT id, name, email, password_hash, role, status, created_at
             FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_benutzer).collect()
    }

    async fn count(&self) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("cnt")?)
    }

    async fn count_by_role(&self, rolle: Rolle) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM users WHERE role = ?")
            .bind(rolle.als_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("cnt")?)
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let rolle_str: String = row.try_get("role")?;
    let rolle = rolle_str
        .parse()
        .map_err(|e: String| DbError::intern(e))?;

    let status_str: String = row.try_get("status")?;
    let status = status_str
        .parse()
        .map_err(|e: String| DbError::intern(e))?;

    Ok(BenutzerRecord {
        id,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        rolle,
        status,
        created_at,
    })
}
