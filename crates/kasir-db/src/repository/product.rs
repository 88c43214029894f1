//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - List ordered by name
//! - Create / full-replace update / delete by id
//!
//! ## Code Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  INSERT code = 'C001'                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products.code UNIQUE ──── exists? ──► UniqueViolation (409)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  row stored, RETURNING gives the stored product                        │
//! │                                                                         │
//! │  The constraint is enforced by SQLite itself, so no sequence of        │
//! │  creates/updates can produce two rows with one code.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{timestamp, NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let created = repo.insert(&new_product).await?;
/// let all = repo.list().await?;
/// repo.delete(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, code, category, flex, catcode, image, created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, code, category, flex, catcode, image, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product, stamping `created_at` and `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored row, with its assigned id
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(code = %product.code, "Inserting product");

        let now = timestamp();

        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                name, code, category, flex, catcode, image, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING id, name, code, category, flex, catcode, image, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.code)
        .bind(&product.category)
        .bind(&product.flex)
        .bind(&product.catcode)
        .bind(&product.image)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&product.code))?;

        debug!(id = created.id, "Product inserted");
        Ok(created)
    }

    /// Replaces every editable field of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated row
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Code belongs to another product
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(id = id, code = %product.code, "Updating product");

        let now = timestamp();

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                code = ?3,
                category = ?4,
                flex = ?5,
                catcode = ?6,
                image = ?7,
                updated_at = ?8
            WHERE id = ?1
            RETURNING id, name, code, category, flex, catcode, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.code)
        .bind(&product.category)
        .bind(&product.flex)
        .bind(&product.catcode)
        .bind(&product.image)
        .bind(&now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_value(&product.code))?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists products referencing a category name.
    pub async fn list_by_category(&self, category: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, code, category, flex, catcode, image, created_at, updated_at
            FROM products
            WHERE category = ?1
            ORDER BY name
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_product(name: &str, code: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            code: code.to_string(),
            category: category.to_string(),
            flex: "std".to_string(),
            catcode: "CC1".to_string(),
            image: String::new(),
        }
    }

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_stamps_timestamps() {
        let repo = repo().await;

        let created = repo.insert(&new_product("Cola", "C001", "Drinks")).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.code, "C001");
        assert_eq!(created.image.as_deref(), Some(""));
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let repo = repo().await;
        repo.insert(&new_product("Tea", "T001", "Drinks")).await.unwrap();
        repo.insert(&new_product("Apple", "A001", "Fruit")).await.unwrap();
        repo.insert(&new_product("Milk", "M001", "Dairy")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Apple", "Milk", "Tea"]);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_conflict() {
        let repo = repo().await;
        repo.insert(&new_product("Cola", "C001", "Drinks")).await.unwrap();

        let err = repo
            .insert(&new_product("Cola Zero", "C001", "Drinks"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "products.code");
                assert_eq!(value, "C001");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_code_is_conflict() {
        let repo = repo().await;
        repo.insert(&new_product("Cola", "C001", "Drinks")).await.unwrap();
        let tea = repo.insert(&new_product("Tea", "T001", "Drinks")).await.unwrap();

        let err = repo
            .update(tea.id, &new_product("Tea", "C001", "Drinks"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let tea = repo.get_by_id(tea.id).await.unwrap().unwrap();
        assert_eq!(tea.code, "T001");
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = repo().await;
        let cola = repo.insert(&new_product("Cola", "C001", "Drinks")).await.unwrap();

        // Millisecond timestamps need a gap to differ
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut changes = new_product("Cola 1L", "C001-1L", "Soda");
        changes.image = "cola.png".to_string();
        let updated = repo.update(cola.id, &changes).await.unwrap();

        assert_eq!(updated.id, cola.id);
        assert_eq!(updated.name, "Cola 1L");
        assert_eq!(updated.code, "C001-1L");
        assert_eq!(updated.category, "Soda");
        assert_eq!(updated.image.as_deref(), Some("cola.png"));
        assert_eq!(updated.created_at, cola.created_at);
        assert!(updated.updated_at.is_some());
        assert!(updated.updated_at > cola.updated_at);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let repo = repo().await;

        let err = repo
            .update(99, &new_product("Ghost", "G001", "None"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete(99).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = repo().await;
        let cola = repo.insert(&new_product("Cola", "C001", "Drinks")).await.unwrap();

        repo.delete(cola.id).await.unwrap();

        assert!(repo.get_by_id(cola.id).await.unwrap().is_none());
        // the code is free again
        repo.insert(&new_product("Cola", "C001", "Drinks")).await.unwrap();
    }
}
