//! # Database Migrations
//!
//! Embedded SQL migrations for Depot.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup (DEPOT_RUN_MIGRATIONS=true)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  _sqlx_migrations exists? ── no ──► create it                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  001_initial_schema.sql  ✓ applied / ⬜ pending                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending in filename order, record checksum                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create `migrations/sqlite/NNN_description.sql` with the next number
//! 2. **NEVER** modify an applied migration - always add a new one

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Migrations embedded from `migrations/sqlite` at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}
