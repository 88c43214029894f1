//! # Health Check

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

/// Health response body.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// `GET /` and `GET /health`
///
/// Always 200 so a load balancer can tell the process is up; `database`
/// reports whether a query round-trip succeeded.
pub async fn health(State(state): State<SharedState>) -> Json<Health> {
    let db_ok = state.db.health_check().await;

    Json(Health {
        status: if db_ok { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        database: if db_ok { "connected" } else { "unavailable" },
    })
}
