//! # Settings Repository
//!
//! An open-ended `key -> JSON value` store.
//!
//! Values are written as encoded JSON text and decoded on read, so any JSON
//! value (object, array, number, string, boolean, null) round-trips.
//!
//! ## Upsert
//! Each key is written with a single statement:
//! ```sql
//! INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
//! ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
//! ```
//! There is no read-then-write, so concurrent writers cannot lose updates.

use serde_json::{Map, Value};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{timestamp, Setting};

/// Repository for settings.
#[derive(Debug, Clone)]
pub struct SettingRepository {
    pool: SqlitePool,
}

impl SettingRepository {
    /// Creates a new SettingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingRepository { pool }
    }

    /// Returns the raw rows, ordered by key.
    pub async fn rows(&self) -> DbResult<Vec<Setting>> {
        let rows = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns every setting with its value decoded.
    pub async fn all(&self) -> DbResult<Map<String, Value>> {
        self.rows()
            .await?
            .into_iter()
            .map(|row| {
                let value = decode(&row)?;
                Ok((row.key, value))
            })
            .collect()
    }

    /// Returns one decoded setting.
    pub async fn get(&self, key: &str) -> DbResult<Option<Value>> {
        let row = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(decode).transpose()
    }

    /// Upserts every pair of `values`, all in one transaction.
    pub async fn save(&self, values: &Map<String, Value>) -> DbResult<()> {
        debug!(count = values.len(), "Saving settings");

        let now = timestamp();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (key, value) in values {
            upsert(&mut *tx, key, &value.to_string(), &now).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Deletes one setting.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No setting with that key
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        debug!(key, "Deleting setting");

        let result = sqlx::query("DELETE FROM settings WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Setting", key));
        }

        Ok(())
    }
}

/// Inserts or overwrites one encoded value.
async fn upsert<'e, E>(executor: E, key: &str, encoded: &str, now: &str) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(encoded)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

fn decode(row: &Setting) -> DbResult<Value> {
    row.decode().map_err(|e| DbError::Corrupt {
        entity: format!("setting '{}'", row.key),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
