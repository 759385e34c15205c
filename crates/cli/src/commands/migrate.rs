//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shopping-cli migrate
//! ```
//!
//! Migrations live in `crates/api/migrations/` and are embedded at compile
//! time. The API server never runs them on startup.

use super::{CommandError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
