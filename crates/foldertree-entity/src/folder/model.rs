//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::tree::FolderNode;

/// Store-assigned folder identifier. Always positive.
pub type FolderId = i64;

/// Maximum folder name length, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 255;

/// A node in a folder hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// Position among siblings.
    pub sort_order: i32,
    /// Depth in the folder tree (0 for root).
    pub depth: i32,
    /// Materialized ancestor chain including this folder (e.g. `/1/3/5/`).
    pub path: String,
    /// Items assigned directly to this folder.
    pub item_count: i64,
    /// Items assigned to this folder or anywhere beneath it.
    pub total_item_count: i64,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion tombstone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the folder has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether `other` lies in this folder's subtree (or is this folder).
    pub fn contains(&self, other: &Folder) -> bool {
        other.path.starts_with(&self.path)
    }

    /// Project into a childless tree node.
    pub fn to_node(&self) -> FolderNode {
        FolderNode {
            id: self.id,
            name: self.name.clone(),
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            depth: self.depth,
            item_count: self.item_count,
            total_item_count: self.total_item_count,
            children: Vec::new(),
        }
    }
}

/// Data required to insert a new folder row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFolder {
    /// Folder name, already trimmed.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// Position among siblings.
    pub sort_order: i32,
    /// Depth in the tree.
    pub depth: i32,
    /// Provisional path; the folder's own segment is appended once the id
    /// is known.
    pub path: String,
}
