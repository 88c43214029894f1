//! # Category Repository
//!
//! Database operations for categories, including the delete cascade.
//!
//! ## Delete Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   DELETE /api/categories/{id}                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │                                                                 │   │
//! │  │  1. DELETE FROM categories WHERE id = ? RETURNING name         │   │
//! │  │     └── no row? ──► ROLLBACK, NotFound (products untouched)    │   │
//! │  │                                                                 │   │
//! │  │  2. UPDATE products SET category = 'Lainnya'                   │   │
//! │  │     WHERE category = <name>                                    │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← no reader ever sees a product naming a deleted category       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Renaming a category does not touch products: they keep the old name.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kasir_core::{timestamp, Category, NewCategory, UNCATEGORIZED};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The stored row
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, category: &NewCategory) -> DbResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let now = timestamp();

        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, image, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, name, image, created_at, updated_at
            "#,
        )
        .bind(&category.name)
        .bind(&category.image)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&category.name))?;

        Ok(created)
    }

    /// Renames a category and replaces its image.
    ///
    /// Products referencing the old name are left as they are.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Name belongs to another category
    pub async fn update(&self, id: i64, category: &NewCategory) -> DbResult<Category> {
        debug!(id = id, name = %category.name, "Updating category");

        let now = timestamp();

        let updated = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = ?2, image = ?3, updated_at = ?4
            WHERE id = ?1
            RETURNING id, name, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.image)
        .bind(&now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&category.name))?;

        updated.ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category and moves its products to [`UNCATEGORIZED`] in the
    /// same transaction.
    ///
    /// ## Returns
    /// * `Ok(n)` - Deleted; `n` products were reassigned
    /// * `Err(DbError::NotFound)` - Category doesn't exist; nothing changed
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        debug!(id = id, "Deleting category");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Write first: a deferred transaction that reads before writing
        // cannot wait on the lock held by another writer
        let name: Option<String> =
            sqlx::query_scalar("DELETE FROM categories WHERE id = ?1 RETURNING name")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        // Dropping `tx` without commit rolls it back
        let Some(name) = name else {
            return Err(DbError::not_found("Category", id));
        };

        let reassigned = sqlx::query("UPDATE products SET category = ?1 WHERE category = ?2")
            .bind(UNCATEGORIZED)
            .bind(&name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = id, name = %name, reassigned = reassigned, "Category deleted");
        Ok(reassigned)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use kasir_core::NewProduct;

    fn category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            image: String::new(),
        }
    }

    fn product(code: &str, category: &str) -> NewProduct {
        NewProduct {
            name: format!("Product {code}"),
            code: code.to_string(),
            category: category.to_string(),
            flex: "std".to_string(),
            catcode: "CC1".to_string(),
            image: String::new(),
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let db = db().await;
        db.categories().insert(&category("Drinks")).await.unwrap();

        let err = db.categories().insert(&category("Drinks")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "categories.name");
                assert_eq!(value, "Drinks");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let db = db().await;
        for name in ["Snacks", "Dairy", "Drinks"] {
            db.categories().insert(&category(name)).await.unwrap();
        }

        let names: Vec<String> = db
            .categories()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Dairy", "Drinks", "Snacks"]);
    }

    #[tokio::test]
    async fn test_delete_reassigns_exactly_the_referencing_products() {
        let db = db().await;
        let drinks = db.categories().insert(&category("Drinks")).await.unwrap();
        db.categories().insert(&category("Snacks")).await.unwrap();

        for code in ["D1", "D2", "D3"] {
            db.products().insert(&product(code, "Drinks")).await.unwrap();
        }
        db.products().insert(&product("S1", "Snacks")).await.unwrap();

        let reassigned = db.categories().delete(drinks.id).await.unwrap();
        assert_eq!(reassigned, 3);

        assert!(db.products().list_by_category("Drinks").await.unwrap().is_empty());
        let moved = db.products().list_by_category(UNCATEGORIZED).await.unwrap();
        let codes: Vec<&str> = moved.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes.len(), 3);
        assert!(codes.contains(&"D1") && codes.contains(&"D2") && codes.contains(&"D3"));

        assert_eq!(db.products().list_by_category("Snacks").await.unwrap().len(), 1);
        assert!(db.categories().get_by_id(drinks.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_category_touches_nothing() {
        let db = db().await;
        db.products().insert(&product("D1", "Drinks")).await.unwrap();

        let err = db.categories().delete(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let products = db.products().list().await.unwrap();
        assert_eq!(products[0].category, "Drinks");
    }

    #[tokio::test]
    async fn test_rename_does_not_propagate_to_products() {
        let db = db().await;
        let drinks = db.categories().insert(&category("Drinks")).await.unwrap();
        db.products().insert(&product("D1", "Drinks")).await.unwrap();

        let renamed = db
            .categories()
            .update(drinks.id, &category("Beverages"))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Beverages");

        let products = db.products().list().await.unwrap();
        assert_eq!(products[0].category, "Drinks");
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let db = db().await;
        let err = db.categories().update(7, &category("Ghost")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_wait_for_the_write_lock() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("pos.db")))
            .await
            .unwrap();

        let mut tasks = Vec::new();
        for task in 0..8 {
            let db = db.clone();
            tasks.push(tokio::spawn(async move {
                let mut failures = Vec::new();
                for round in 0..40 {
                    let name = format!("cat-{task}-{round}");
                    let created = db.categories().insert(&category(&name)).await.unwrap();
                    db.products()
                        .insert(&product(&format!("P-{task}-{round}"), &name))
                        .await
                        .unwrap();

                    match db.categories().delete(created.id).await {
                        Ok(reassigned) => assert_eq!(reassigned, 1),
                        Err(e) => failures.push(e.to_string()),
                    }
                }
                failures
            }));
        }

        let mut failures = Vec::new();
        for task in tasks {
            failures.extend(task.await.unwrap());
        }
        assert!(failures.is_empty(), "deletes failed: {failures:?}");

        assert_eq!(db.categories().list().await.unwrap().len(), 0);
        let moved = db.products().list_by_category(UNCATEGORIZED).await.unwrap();
        assert_eq!(moved.len(), 8 * 40);

        db.close().await;
    }
}
