//! # Category Routes
//!
//! Products reference categories by name. Deleting a category moves its
//! products to [`UNCATEGORIZED`](kasir_core::UNCATEGORIZED) in the same
//! transaction; renaming one does not touch products.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::Success;
use crate::error::{ApiResult, AppJson, AppPath};
use crate::state::SharedState;
use kasir_core::{Category, CategoryFields};
use kasir_db::DbError;

/// `GET /api/categories`, ordered by name.
pub async fn list_categories(
    State(state): State<SharedState>,
) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

/// `GET /api/categories/{id}`
pub async fn get_category(
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Category>> {
    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| DbError::not_found("Category", id))?;

    Ok(Json(category))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<SharedState>,
    AppJson(fields): AppJson<CategoryFields>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let new = fields.validate()?;
    let category = state.db.categories().insert(&new).await?;

    info!(id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/categories/{id}`
pub async fn update_category(
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
    AppJson(fields): AppJson<CategoryFields>,
) -> ApiResult<Json<Category>> {
    let new = fields.validate()?;
    let category = state.db.categories().update(id, &new).await?;

    info!(id, name = %category.name, "Category updated");
    Ok(Json(category))
}

/// `DELETE /api/categories/{id}`
pub async fn delete_category(
    State(state): State<SharedState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Success>> {
    let reassigned = state.db.categories().delete(id).await?;

    info!(id, reassigned, "Category deleted");
    Ok(Json(Success::OK))
}
