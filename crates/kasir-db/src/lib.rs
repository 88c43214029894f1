//! # kasir-db: Database Layer for the Kasir Catalog
//!
//! SQLite storage for products, categories, settings and the print log,
//! accessed asynchronously through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  kasir-api handler (e.g. DELETE /api/categories/3)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasir-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │ product.rs     │   │  (embedded)  │   │   │
//! │  │   │               │◄───│ category.rs    │   │              │   │   │
//! │  │   │ SqlitePool    │    │ setting.rs     │   │ 0001_initial │   │   │
//! │  │   │               │    │ snapshot.rs    │   │   _schema    │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pos.db (single SQLite file, WAL)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool and `Database` handle
//! - [`migrations`] - Embedded schema
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pos.db")).await?;
//! let products = db.products().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{
    CategoryRepository, ImportSummary, PrintHistoryRepository, ProductRepository,
    SettingRepository, SnapshotRepository,
};
