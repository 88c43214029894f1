//! # Export / Import Routes
//!
//! `POST /api/export` returns the whole catalog; `POST /api/import` replaces
//! it. An import document must carry `products` (it may be empty).
//! Everything else is optional and an absent section empties its table.

use axum::extract::State;
use axum::Json;

use super::Success;
use crate::error::{ApiResult, AppJson};
use crate::state::SharedState;
use kasir_core::{ImportDocument, Snapshot};

/// `POST /api/export`
pub async fn export_data(State(state): State<SharedState>) -> ApiResult<Json<Snapshot>> {
    Ok(Json(state.db.snapshots().export().await?))
}

/// `POST /api/import`
pub async fn import_data(
    State(state): State<SharedState>,
    AppJson(document): AppJson<ImportDocument>,
) -> ApiResult<Json<Success>> {
    let plan = document.validate()?;
    state.db.snapshots().import(&plan).await?;

    Ok(Json(Success::OK))
}
