//! CLI command definitions and dispatch.

pub mod folder;
pub mod migrate;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::output::OutputFormat;
use foldertree_core::config::AppConfig;
use foldertree_core::error::AppError;
use foldertree_database::DatabasePool;
use foldertree_service::FolderService;

/// foldertree: manage materialized-path folder hierarchies
#[derive(Debug, Parser)]
#[command(name = "foldertree", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load from `config/<env>.toml`
    #[arg(short, long, env = "FOLDERTREE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Folder management
    Folder(folder::FolderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        debug!(env = %self.env, command = ?self.command, "Dispatching command");
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Folder(args) => folder::execute(args, config, self.format).await,
        }
    }
}

/// Helper: connect to the database
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: build a folder service over the configured table
pub async fn create_folder_service(config: &AppConfig) -> Result<FolderService, AppError> {
    let pool = create_db_pool(config).await?;
    let repo = pool.folder_repository(&config.database)?;
    info!(
        table = %config.database.table,
        max_depth = config.folders.max_depth,
        "Folder service ready"
    );
    Ok(FolderService::new(Arc::new(repo), config.folders.clone()))
}
