//! Folder CRUD, move, and counter operations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use foldertree_core::config::FolderConfig;
use foldertree_core::error::AppError;
use foldertree_database::repository::FolderRepository;
use foldertree_entity::folder::model::MAX_NAME_LEN;
use foldertree_entity::folder::path::{child_path, parse_path, root_path};
use foldertree_entity::folder::{Folder, FolderId, NewFolder};

use super::error::FolderError;

/// Manages a materialized-path folder hierarchy.
///
/// Every operation is a plain sequence of repository calls. Operations
/// that write more than once (create, move) are not atomic here; run each
/// call inside one storage transaction when concurrent writers exist.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    pub(crate) folder_repo: Arc<dyn FolderRepository>,
    /// Hierarchy rules.
    config: FolderConfig,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<FolderId>,
}

impl CreateFolderRequest {
    /// A root-level folder.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: None,
        }
    }

    /// A folder under `parent_id`.
    pub fn child(name: impl Into<String>, parent_id: FolderId) -> Self {
        Self {
            name: name.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// Request to move a folder.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder ID (None to make the folder a root).
    pub new_parent_id: Option<FolderId>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<dyn FolderRepository>, config: FolderConfig) -> Self {
        Self {
            folder_repo,
            config,
        }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, folder_id: FolderId) -> Result<Folder, FolderError> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or(FolderError::NotFound(folder_id))
    }

    /// Lists the direct children of a folder, or the roots when `parent_id`
    /// is `None`.
    pub async fn get_children(
        &self,
        parent_id: Option<FolderId>,
    ) -> Result<Vec<Folder>, FolderError> {
        let children = self.folder_repo.find_by_parent(parent_id).await?;
        debug!(parent_id = ?parent_id, count = children.len(), "Listed children");
        Ok(children)
    }

    /// Creates a new folder at the end of its siblings.
    pub async fn create_folder(&self, req: CreateFolderRequest) -> Result<Folder, FolderError> {
        let name = validate_name(&req.name)?;

        if self
            .folder_repo
            .exists_by_name(name, req.parent_id, None)
            .await?
        {
            return Err(FolderError::DuplicateName);
        }

        // Roots hang off the bare separator; the own segment is added
        // once the store has assigned an id.
        let (base_path, depth) = match req.parent_id {
            Some(parent_id) => {
                let parent = self
                    .folder_repo
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(FolderError::ParentNotFound(parent_id))?;
                (parent.path, parent.depth + 1)
            }
            None => ("/".to_string(), 0),
        };

        self.check_depth(depth)?;

        let sort_order = self.next_sort_order(req.parent_id).await?;

        let mut folder = self
            .folder_repo
            .create(&NewFolder {
                name: name.to_string(),
                parent_id: req.parent_id,
                sort_order,
                depth,
                path: base_path.clone(),
            })
            .await?;

        folder.path = child_path(&base_path, folder.id);
        self.folder_repo
            .set_path_and_depth(folder.id, &folder.path, folder.depth)
            .await?;

        info!(
            folder_id = folder.id,
            parent_id = ?folder.parent_id,
            path = %folder.path,
            depth = folder.depth,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder. Hierarchy fields are untouched.
    pub async fn update_folder(
        &self,
        folder_id: FolderId,
        new_name: &str,
    ) -> Result<Folder, FolderError> {
        let mut folder = self.get_folder(folder_id).await?;
        let name = validate_name(new_name)?;

        if self
            .folder_repo
            .exists_by_name(name, folder.parent_id, Some(folder_id))
            .await?
        {
            return Err(FolderError::DuplicateName);
        }

        folder.name = name.to_string();
        let folder = self.folder_repo.update(&folder).await?;

        info!(folder_id, new_name = %folder.name, "Folder renamed");

        Ok(folder)
    }

    /// Deletes a folder that has no child folders.
    pub async fn delete_folder(&self, folder_id: FolderId) -> Result<(), FolderError> {
        let folder = self.get_folder(folder_id).await?;

        if self.folder_repo.has_children(folder_id).await? {
            return Err(FolderError::HasChildren(folder_id));
        }

        self.folder_repo.delete(folder_id).await?;

        info!(folder_id, path = %folder.path, "Folder deleted");

        Ok(())
    }

    /// Moves a folder, with its whole subtree, under a new parent.
    ///
    /// The folder goes to the end of its new siblings. Descendant paths
    /// are rewritten by replacing the folder's old path prefix.
    pub async fn move_folder(
        &self,
        folder_id: FolderId,
        req: MoveFolderRequest,
    ) -> Result<Folder, FolderError> {
        let mut folder = self.get_folder(folder_id).await?;

        let (new_path, new_depth) = match req.new_parent_id {
            Some(parent_id) if parent_id == folder_id => {
                warn!(folder_id, "Rejected move into itself");
                return Err(FolderError::CircularReference);
            }
            Some(parent_id) => {
                let parent = self
                    .folder_repo
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(FolderError::ParentNotFound(parent_id))?;

                if folder.contains(&parent) {
                    warn!(folder_id, parent_id, "Rejected move into own descendant");
                    return Err(FolderError::CircularReference);
                }
                (child_path(&parent.path, folder_id), parent.depth + 1)
            }
            None => (root_path(folder_id), 0),
        };

        if let Some(limit) = self.config.depth_limit() {
            let subtree = self.folder_repo.find_by_path_prefix(&folder.path).await?;
            let subtree_height = subtree
                .iter()
                .map(|d| d.depth - folder.depth)
                .max()
                .unwrap_or(0);
            if new_depth + subtree_height >= limit {
                warn!(
                    folder_id,
                    new_depth, subtree_height, limit, "Rejected move past depth limit"
                );
                return Err(FolderError::MaxDepthExceeded { limit });
            }
        }

        if self
            .folder_repo
            .exists_by_name(&folder.name, req.new_parent_id, Some(folder_id))
            .await?
        {
            return Err(FolderError::DuplicateName);
        }

        let old_path = folder.path.clone();
        let depth_delta = new_depth - folder.depth;

        folder.parent_id = req.new_parent_id;
        folder.path = new_path;
        folder.depth = new_depth;
        folder.sort_order = self.next_sort_order(req.new_parent_id).await?;

        let folder = self.folder_repo.update(&folder).await?;

        let rewritten = self
            .folder_repo
            .rewrite_descendant_paths(&old_path, &folder.path, depth_delta)
            .await?;

        info!(
            folder_id,
            new_parent = ?req.new_parent_id,
            old_path = %old_path,
            new_path = %folder.path,
            descendants = rewritten,
            "Folder moved"
        );

        Ok(folder)
    }

    /// Sets a folder's sort order verbatim. Collisions with siblings are
    /// allowed.
    pub async fn reorder_folder(
        &self,
        folder_id: FolderId,
        sort_order: i32,
    ) -> Result<(), FolderError> {
        self.get_folder(folder_id).await?;
        self.folder_repo
            .set_sort_order(folder_id, sort_order)
            .await?;

        info!(folder_id, sort_order, "Folder reordered");

        Ok(())
    }

    /// Adjusts the item counters after items were assigned to (positive
    /// `delta`) or removed from (negative `delta`) a folder.
    ///
    /// The folder's own `item_count` changes, and so does the
    /// `total_item_count` of the folder and every ancestor. Both clamp at
    /// zero.
    pub async fn increment_item_count(
        &self,
        folder_id: FolderId,
        delta: i64,
    ) -> Result<(), FolderError> {
        let folder = self.get_folder(folder_id).await?;
        let chain = parse_path(&folder.path).map_err(AppError::from)?;

        self.folder_repo
            .increment_item_count(folder_id, delta)
            .await?;
        self.folder_repo
            .increment_total_item_count(&chain, delta)
            .await?;

        debug!(folder_id, delta, ancestors = chain.len(), "Item counts adjusted");

        Ok(())
    }

    /// Sort order that places a folder after every sibling under `parent_id`.
    async fn next_sort_order(&self, parent_id: Option<FolderId>) -> Result<i32, FolderError> {
        let max = self.folder_repo.max_sort_order(parent_id).await?;
        max.checked_add(1).ok_or_else(|| {
            warn!(parent_id = ?parent_id, "Sort order exhausted under parent");
            FolderError::Storage(AppError::conflict(
                "No sort order left after the last sibling; reorder the siblings first",
            ))
        })
    }

    fn check_depth(&self, depth: i32) -> Result<(), FolderError> {
        match self.config.depth_limit() {
            Some(limit) if depth >= limit => {
                warn!(depth, limit, "Rejected folder past depth limit");
                Err(FolderError::MaxDepthExceeded { limit })
            }
            _ => Ok(()),
        }
    }
}

/// Trims a folder name and checks its length.
fn validate_name(name: &str) -> Result<&str, FolderError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(FolderError::InvalidName);
    }
    Ok(name)
}
