//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use foldertree_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
///
/// Migrations create the default `folders` table only; additional
/// hierarchy tables are expected to copy its schema.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}
