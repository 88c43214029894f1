//! # Routes
//!
//! | Method | Path                    | Handler                          |
//! |--------|-------------------------|----------------------------------|
//! | GET    | `/api/products`         | [`product::list_products`]       |
//! | POST   | `/api/products`         | [`product::create_product`]      |
//! | GET    | `/api/products/{id}`    | [`product::get_product`]         |
//! | PUT    | `/api/products/{id}`    | [`product::update_product`]      |
//! | DELETE | `/api/products/{id}`    | [`product::delete_product`]      |
//! | GET    | `/api/categories`       | [`category::list_categories`]    |
//! | POST   | `/api/categories`       | [`category::create_category`]    |
//! | GET    | `/api/categories/{id}`  | [`category::get_category`]       |
//! | PUT    | `/api/categories/{id}`  | [`category::update_category`]    |
//! | DELETE | `/api/categories/{id}`  | [`category::delete_category`]    |
//! | GET    | `/api/settings`         | [`setting::get_settings`]        |
//! | POST   | `/api/settings`         | [`setting::save_settings`]       |
//! | POST   | `/api/export`           | [`snapshot::export_data`]        |
//! | POST   | `/api/import`           | [`snapshot::import_data`]        |
//! | GET    | `/api/print-history`    | [`print_history::list_history`]  |
//! | POST   | `/api/print-history`    | [`print_history::record_print`]  |
//! | GET    | `/`, `/health`          | [`health::health`]               |

pub mod category;
pub mod health;
pub mod print_history;
pub mod product;
pub mod setting;
pub mod snapshot;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::state::SharedState;

/// Body returned by mutations that have nothing else to report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub const OK: Success = Success { success: true };
}

/// Builds the route table (state is attached by the caller).
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(health::health))
        .route("/health", get(health::health))
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/products/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/api/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route(
            "/api/settings",
            get(setting::get_settings).post(setting::save_settings),
        )
        .route("/api/export", post(snapshot::export_data))
        .route("/api/import", post(snapshot::import_data))
        .route(
            "/api/print-history",
            get(print_history::list_history).post(print_history::record_print),
        )
}
