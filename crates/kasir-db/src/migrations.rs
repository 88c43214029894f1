//! # Database Schema
//!
//! Embedded SQL schema for the catalog store.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Startup                                            │
//! │                                                                         │
//! │  Database::new(config)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (create if missing)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  0001_initial_schema.sql  products, categories, settings,              │
//! │                           print_history                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Failure here aborts startup: the server never serves a half-built     │
//! │  store.                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The schema uses `IF NOT EXISTS` so it also applies cleanly to a database
//! file created by an earlier deployment without the `_sqlx_migrations` table.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded schema from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies any pending schema files.
///
/// Idempotent: safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns (embedded_migrations, applied_migrations), for health checks.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
