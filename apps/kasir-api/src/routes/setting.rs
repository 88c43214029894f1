//! # Settings Routes
//!
//! Settings are a flat JSON object. `POST` merges the posted keys into the
//! store; keys not present in the body are left alone.

use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};

use super::Success;
use crate::error::{ApiError, ApiResult, AppJson};
use crate::state::SharedState;

/// `GET /api/settings`
pub async fn get_settings(State(state): State<SharedState>) -> ApiResult<Json<Map<String, Value>>> {
    Ok(Json(state.db.settings().all().await?))
}

/// `POST /api/settings`
pub async fn save_settings(
    State(state): State<SharedState>,
    AppJson(body): AppJson<Value>,
) -> ApiResult<Json<Success>> {
    let Value::Object(values) = body else {
        return Err(ApiError::validation("settings must be a JSON object"));
    };

    state.db.settings().save(&values).await?;
    Ok(Json(Success::OK))
}
