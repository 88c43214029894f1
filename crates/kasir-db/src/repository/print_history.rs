//! # Print History Repository
//!
//! Append-only log of labels printed by the scale/printer tooling.
//! Entries are never updated or deleted through this repository.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasir_core::{timestamp, NewPrintJob, PrintHistoryEntry};

/// Repository for the print history log.
#[derive(Debug, Clone)]
pub struct PrintHistoryRepository {
    pool: SqlitePool,
}

impl PrintHistoryRepository {
    /// Creates a new PrintHistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PrintHistoryRepository { pool }
    }

    /// Appends one entry, stamped with the current time.
    pub async fn append(&self, job: &NewPrintJob) -> DbResult<PrintHistoryEntry> {
        debug!(barcode = %job.barcode, "Recording print job");

        let entry = sqlx::query_as::<_, PrintHistoryEntry>(
            r#"
            INSERT INTO print_history (barcode, product_name, weight, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, barcode, product_name, weight, timestamp
            "#,
        )
        .bind(&job.barcode)
        .bind(&job.product_name)
        .bind(&job.weight)
        .bind(timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Returns the newest `limit` entries, newest first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<PrintHistoryEntry>> {
        let entries = sqlx::query_as::<_, PrintHistoryEntry>(
            r#"
            SELECT id, barcode, product_name, weight, timestamp
            FROM print_history
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn job(barcode: &str) -> NewPrintJob {
        NewPrintJob {
            barcode: barcode.to_string(),
            product_name: "Beras".to_string(),
            weight: "1.250".to_string(),
        }
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().print_history();

        for barcode in ["2000001", "2000002", "2000003"] {
            repo.append(&job(barcode)).await.unwrap();
        }

        let entries = repo.recent(2).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].barcode.as_deref(), Some("2000003"));
        assert_eq!(entries[1].barcode.as_deref(), Some("2000002"));
        assert!(entries[0].timestamp.is_some());
    }
}
