//! # Print History Routes

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiResult, AppJson, AppQuery};
use crate::state::SharedState;
use kasir_core::validation::clamp_history_limit;
use kasir_core::{PrintHistoryEntry, PrintJobFields};

/// Query string of `GET /api/print-history`.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// `GET /api/print-history?limit=N`, newest first.
pub async fn list_history(
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> ApiResult<Json<Vec<PrintHistoryEntry>>> {
    let limit = clamp_history_limit(query.limit);
    Ok(Json(state.db.print_history().recent(limit).await?))
}

/// `POST /api/print-history`
pub async fn record_print(
    State(state): State<SharedState>,
    AppJson(fields): AppJson<PrintJobFields>,
) -> ApiResult<(StatusCode, Json<PrintHistoryEntry>)> {
    let job = fields.validate()?;
    let entry = state.db.print_history().append(&job).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}
