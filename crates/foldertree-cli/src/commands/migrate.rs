//! Database migration commands.

use clap::{Args, Subcommand};
use tracing::warn;

use crate::output;
use foldertree_core::config::AppConfig;
use foldertree_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database is reachable
    Ping,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;

    match &args.command {
        MigrateCommand::Run => {
            foldertree_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Ping => {
            if !pool.health_check().await? {
                warn!("Health check returned an unexpected value");
                return Err(AppError::database("Database health check failed"));
            }
            output::print_success("Database is reachable.");
        }
    }

    pool.close().await;
    Ok(())
}
