//! # Application State
//!
//! Shared by every handler through axum's `State` extractor.
//!
//! ## Thread Safety
//! `Database` wraps a `SqlitePool`, which is cheap to clone and safe to
//! share. Handlers acquire a connection only for the duration of one
//! repository call, so no locking is needed here.

use kasir_db::Database;
use std::sync::Arc;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Wraps the database for use as router state.
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(AppState { db })
    }
}

/// Router state handle.
pub type SharedState = Arc<AppState>;
