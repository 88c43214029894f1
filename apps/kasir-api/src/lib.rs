//! # kasir-api: HTTP JSON API for the Kasir Catalog
//!
//! Serves products, categories, settings, export/import and the print log
//! to the POS frontend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Browser ──► CorsLayer ──► TraceLayer ──► Router ──► handler            │
//! │                                                        │                │
//! │                                   AppJson<T> body ◄────┤                │
//! │                                   kasir-core validate ◄┤                │
//! │                                   kasir-db repository ◄┘                │
//! │                                                                         │
//! │  handler returns Result<_, ApiError> ──► JSON body + status            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Environment configuration
//! - [`error`] - `ApiError` and the JSON body extractor
//! - [`state`] - Shared router state
//! - [`routes`] - Route table and handlers

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::{AppState, SharedState};

/// Builds the full application router.
pub fn app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
