//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.categories().delete(id)                                    │
//! │       ▼                                                                 │
//! │  CategoryRepository                                                    │
//! │  ├── list / get_by_id / insert / update                                │
//! │  └── delete  (transaction: reassign products, then delete)             │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Each repository holds a pool handle; every call acquires a            │
//! │  connection for its own duration only.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Product CRUD
//! - [`CategoryRepository`] - Category CRUD with delete cascade
//! - [`SettingRepository`] - Key/value settings with upsert
//! - [`PrintHistoryRepository`] - Append-only print log
//! - [`SnapshotRepository`] - Export and full-replace import

pub mod category;
pub mod print_history;
pub mod product;
pub mod setting;
pub mod snapshot;

pub use category::CategoryRepository;
pub use print_history::PrintHistoryRepository;
pub use product::ProductRepository;
pub use setting::SettingRepository;
pub use snapshot::{ImportSummary, SnapshotRepository};
