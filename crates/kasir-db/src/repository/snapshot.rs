//! # Snapshot Repository
//!
//! Full-catalog export and full-replace import.
//!
//! ## Import
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   POST /api/import                                      │
//! │                                                                         │
//! │  ImportPlan (already validated by kasir-core)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │                                                                 │   │
//! │  │  DELETE FROM products / categories / settings                  │   │
//! │  │  INSERT every product   (supplied id kept, else assigned)      │   │
//! │  │  INSERT every category  (supplied id kept, else assigned)      │   │
//! │  │  INSERT every setting                                          │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ├── any statement fails ──► ROLLBACK: pre-import state intact    │
//! │       ▼                                                                 │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Print history is not part of a snapshot and survives an import.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kasir_core::snapshot::{ImportedCategory, ImportedProduct};
use kasir_core::{timestamp, Category, ImportPlan, Product, Setting, Snapshot};

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub products: usize,
    pub categories: usize,
    pub settings: usize,
}

/// Repository for export/import.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Reads the whole catalog inside one read transaction.
    pub async fn export(&self) -> DbResult<Snapshot> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, code, category, flex, catcode, image, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, image, created_at, updated_at FROM categories ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let settings = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings ORDER BY key",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            products = products.len(),
            categories = categories.len(),
            settings = settings.len(),
            "Catalog exported"
        );

        Ok(Snapshot {
            products,
            categories,
            settings,
            export_date: timestamp(),
        })
    }

    /// Replaces the whole catalog with `plan`, atomically.
    ///
    /// ## Returns
    /// * `Ok(ImportSummary)` - Rows written
    /// * `Err(DbError::UniqueViolation)` - The plan repeats a code, name, id
    ///   or key; nothing was changed
    pub async fn import(&self, plan: &ImportPlan) -> DbResult<ImportSummary> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM categories").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM settings").execute(&mut *tx).await?;

        for product in &plan.products {
            insert_product(&mut *tx, product).await?;
        }

        for category in &plan.categories {
            insert_category(&mut *tx, category).await?;
        }

        for setting in &plan.settings {
            sqlx::query("INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)")
                .bind(&setting.key)
                .bind(&setting.value)
                .bind(&setting.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::from(e).with_value(&setting.key))?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let summary = ImportSummary {
            products: plan.products.len(),
            categories: plan.categories.len(),
            settings: plan.settings.len(),
        };

        info!(
            products = summary.products,
            categories = summary.categories,
            settings = summary.settings,
            "Catalog imported"
        );

        Ok(summary)
    }
}

async fn insert_product(conn: &mut SqliteConnection, record: &ImportedProduct) -> DbResult<()> {
    let product = &record.product;

    sqlx::query(
        r#"
        INSERT INTO products (
            id, name, code, category, flex, catcode, image, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(record.id)
    .bind(&product.name)
    .bind(&product.code)
    .bind(&product.category)
    .bind(&product.flex)
    .bind(&product.catcode)
    .bind(&product.image)
    .bind(&record.created_at)
    .bind(&record.updated_at)
    .execute(conn)
    .await
    .map_err(|e| DbError::from(e).with_value(&product.code))?;

    Ok(())
}

async fn insert_category(conn: &mut SqliteConnection, record: &ImportedCategory) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO categories (id, name, image, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(record.id)
    .bind(&record.category.name)
    .bind(&record.category.image)
    .bind(&record.created_at)
    .bind(&record.updated_at)
    .execute(conn)
    .await
    .map_err(|e| DbError::from(e).with_value(&record.category.name))?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
