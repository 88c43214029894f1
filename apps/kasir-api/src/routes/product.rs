//! # Product Routes
//!
//! CRUD over the product registry.
//!
//! ## Create Flow
//! ```text
//! POST /api/products { name, code, category, flex, catcode, image? }
//!      │
//!      ▼
//! ProductFields::validate() ── missing field ──► 400
//!      │
//!      ▼
//! ProductRepository::insert() ── code taken ──► 409 (no row written)
//!      │
//!      ▼
//! 201 + stored product (id, created_at, updated_at)
//! ```
//!
//! `category` is stored as given; it is not checked against the category
//! table.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::Success;
use crate::error::{ApiResult, AppJson, AppPath};
use crate::state::SharedState;
use kasir_core::{Product, ProductFields};
use kasir_db::DbError;

/// `GET /api/products`, ordered by name.
pub async fn list_products(State(state): State<SharedState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Product>> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))?;

    Ok(Json(product))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<SharedState>,
    AppJson(fields): AppJson<ProductFields>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let new = fields.validate()?;
    let product = state.db.products().insert(&new).await?;

    info!(id = product.id, code = %product.code, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}`: full replace of the editable fields.
pub async fn update_product(
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
    AppJson(fields): AppJson<ProductFields>,
) -> ApiResult<Json<Product>> {
    let new = fields.validate()?;
    let product = state.db.products().update(id, &new).await?;

    info!(id, code = %product.code, "Product updated");
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Success>> {
    state.db.products().delete(id).await?;

    info!(id, "Product deleted");
    Ok(Json(Success::OK))
}
