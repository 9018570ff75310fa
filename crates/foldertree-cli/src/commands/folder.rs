//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use foldertree_core::config::AppConfig;
use foldertree_core::error::AppError;
use foldertree_entity::folder::{Folder, FolderId};
use foldertree_service::{CreateFolderRequest, MoveFolderRequest};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent_id: Option<FolderId>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: FolderId,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// Move a folder and its subtree under another parent
    Move {
        /// Folder ID
        id: FolderId,
        /// New parent folder ID
        #[arg(short, long, conflicts_with = "root")]
        parent_id: Option<FolderId>,
        /// Make the folder a root
        #[arg(long)]
        root: bool,
    },
    /// Set a folder's position among its siblings
    Reorder {
        /// Folder ID
        id: FolderId,
        /// New sort order
        #[arg(short, long, allow_negative_numbers = true)]
        sort_order: i32,
    },
    /// Delete a folder without child folders
    Delete {
        /// Folder ID
        id: FolderId,
    },
    /// Show one folder
    Show {
        /// Folder ID
        id: FolderId,
    },
    /// List the children of a folder, or the roots
    Children {
        /// Parent folder ID (omit for roots)
        #[arg(short, long)]
        parent_id: Option<FolderId>,
    },
    /// Show the folder tree
    Tree {
        /// Only show the tree below this folder
        #[arg(short, long)]
        root_id: Option<FolderId>,
    },
    /// List a folder and its ancestors, root first
    Ancestors {
        /// Folder ID
        id: FolderId,
    },
    /// List the IDs of a folder and everything below it
    Descendants {
        /// Folder ID
        id: FolderId,
    },
    /// Adjust a folder's item counters
    Count {
        /// Folder ID
        id: FolderId,
        /// Items added (positive) or removed (negative)
        #[arg(short, long, allow_negative_numbers = true)]
        delta: i64,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: FolderId,
    /// Name
    name: String,
    /// Parent
    parent: String,
    /// Sort order
    #[tabled(rename = "order")]
    sort_order: i32,
    /// Depth
    depth: i32,
    /// Path
    path: String,
    /// Items
    items: i64,
    /// Items in subtree
    #[tabled(rename = "total")]
    total_items: i64,
    /// Updated at
    updated_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            parent: f
                .parent_id
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
            sort_order: f.sort_order,
            depth: f.depth,
            path: f.path.clone(),
            items: f.item_count,
            total_items: f.total_item_count,
            updated_at: f.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Descendant ID row
#[derive(Debug, Serialize, Tabled)]
struct IdRow {
    /// Folder ID
    id: FolderId,
}

fn rows(folders: &[Folder]) -> Vec<FolderRow> {
    folders.iter().map(FolderRow::from).collect()
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = super::create_folder_service(config).await?;

    match &args.command {
        FolderCommand::Create { name, parent_id } => {
            let folder = service
                .create_folder(CreateFolderRequest {
                    name: name.clone(),
                    parent_id: *parent_id,
                })
                .await?;
            output::print_success(&format!(
                "Folder '{}' created (id: {}, path: {})",
                folder.name, folder.id, folder.path
            ));
        }
        FolderCommand::Rename { id, name } => {
            let folder = service.update_folder(*id, name).await?;
            output::print_success(&format!("Folder {} renamed to '{}'", folder.id, folder.name));
        }
        FolderCommand::Move {
            id,
            parent_id,
            root,
        } => {
            if parent_id.is_none() && !root {
                return Err(AppError::validation(
                    "Pass --parent-id or --root to choose the destination",
                ));
            }
            let folder = service
                .move_folder(
                    *id,
                    MoveFolderRequest {
                        new_parent_id: *parent_id,
                    },
                )
                .await?;
            output::print_success(&format!("Folder {} moved to {}", folder.id, folder.path));
        }
        FolderCommand::Reorder { id, sort_order } => {
            service.reorder_folder(*id, *sort_order).await?;
            output::print_success(&format!("Folder {id} sort order set to {sort_order}"));
        }
        FolderCommand::Delete { id } => {
            service.delete_folder(*id).await?;
            output::print_success(&format!("Folder {id} deleted"));
        }
        FolderCommand::Show { id } => {
            let folder = service.get_folder(*id).await?;
            output::print_item(&FolderRow::from(&folder), format);
        }
        FolderCommand::Children { parent_id } => {
            let folders = service.get_children(*parent_id).await?;
            output::print_list(&rows(&folders), format);
        }
        FolderCommand::Tree { root_id } => {
            let forest = match root_id {
                Some(id) => service.get_sub_tree(*id).await?,
                None => service.get_tree().await?,
            };
            output::print_tree(&forest, format);
        }
        FolderCommand::Ancestors { id } => {
            let folders = service.get_ancestors(*id).await?;
            output::print_list(&rows(&folders), format);
        }
        FolderCommand::Descendants { id } => {
            let ids: Vec<IdRow> = service
                .get_descendant_ids(*id)
                .await?
                .into_iter()
                .map(|id| IdRow { id })
                .collect();
            output::print_list(&ids, format);
        }
        FolderCommand::Count { id, delta } => {
            service.increment_item_count(*id, *delta).await?;
            let folder = service.get_folder(*id).await?;
            output::print_item(&FolderRow::from(&folder), format);
        }
    }

    Ok(())
}
