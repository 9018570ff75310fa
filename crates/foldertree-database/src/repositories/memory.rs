//! In-memory folder repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use foldertree_core::error::AppError;
use foldertree_core::result::AppResult;
use foldertree_entity::folder::path::rebase_path;
use foldertree_entity::folder::{Folder, FolderId, NewFolder};

use crate::repository::FolderRepository;

/// Folder repository backed by an ordered map behind one lock.
///
/// Every method takes the lock exactly once, so each multi-row mutation is
/// observed by concurrent readers either entirely or not at all. Soft
/// deletion keeps the row with a tombstone, mirroring the PostgreSQL
/// adapter, and live sibling names are unique like the partial unique
/// index on the table.
#[derive(Debug, Default)]
pub struct MemoryFolderRepository {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: FolderId,
    rows: BTreeMap<FolderId, Folder>,
}

impl MemoryState {
    fn live(&self) -> impl Iterator<Item = &Folder> {
        self.rows.values().filter(|f| !f.is_deleted())
    }

    fn live_mut(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.rows.get_mut(&id).filter(|f| !f.is_deleted())
    }

    fn name_taken(&self, name: &str, parent_id: Option<FolderId>, exclude: Option<FolderId>) -> bool {
        self.live()
            .any(|f| f.name == name && f.parent_id == parent_id && Some(f.id) != exclude)
    }
}

impl MemoryFolderRepository {
    /// Create an empty repository. The first folder gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live folders.
    pub async fn len(&self) -> usize {
        self.state.read().await.live().count()
    }

    /// Whether the repository holds no live folders.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sorted_by_depth(mut folders: Vec<Folder>) -> Vec<Folder> {
    folders.sort_by_key(|f| (f.depth, f.sort_order, f.id));
    folders
}

fn duplicate(name: &str) -> AppError {
    AppError::conflict(format!("Folder '{name}' already exists under this parent"))
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if state.name_taken(&data.name, data.parent_id, None) {
            return Err(duplicate(&data.name));
        }

        state.last_id += 1;
        let now = Utc::now();
        let folder = Folder {
            id: state.last_id,
            name: data.name.clone(),
            parent_id: data.parent_id,
            sort_order: data.sort_order,
            depth: data.depth,
            path: data.path.clone(),
            item_count: 0,
            total_item_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.rows.insert(folder.id, folder.clone());
        debug!(folder_id = folder.id, "Inserted folder row");
        Ok(folder)
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if state.name_taken(&folder.name, folder.parent_id, Some(folder.id)) {
            return Err(duplicate(&folder.name));
        }

        let row = state
            .live_mut(folder.id)
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;
        row.name = folder.name.clone();
        row.parent_id = folder.parent_id;
        row.sort_order = folder.sort_order;
        row.depth = folder.depth;
        row.path = folder.path.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        Ok(match state.live_mut(id) {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).filter(|f| !f.is_deleted()).cloned())
    }

    async fn find_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let mut children: Vec<Folder> = state
            .live()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by_key(|f| (f.sort_order, f.id));
        Ok(children)
    }

    async fn find_by_path_prefix(&self, prefix: &str) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        Ok(sorted_by_depth(
            state
                .live()
                .filter(|f| f.path.starts_with(prefix))
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        Ok(sorted_by_depth(state.live().cloned().collect()))
    }

    async fn find_by_ids(&self, ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let mut folders: Vec<Folder> = state
            .live()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect();
        folders.sort_by_key(|f| (f.depth, f.id));
        Ok(folders)
    }

    async fn max_sort_order(&self, parent_id: Option<FolderId>) -> AppResult<i32> {
        let state = self.state.read().await;
        Ok(state
            .live()
            .filter(|f| f.parent_id == parent_id)
            .map(|f| f.sort_order)
            .max()
            .unwrap_or(0))
    }

    async fn set_sort_order(&self, id: FolderId, sort_order: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(row) = state.live_mut(id) {
            row.sort_order = sort_order;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_path_and_depth(&self, id: FolderId, path: &str, depth: i32) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(row) = state.live_mut(id) {
            row.path = path.to_string();
            row.depth = depth;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rewrite_descendant_paths(
        &self,
        old_prefix: &str,
        new_prefix: &str,
        depth_delta: i32,
    ) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut rewritten = 0;
        for row in state.rows.values_mut().filter(|f| !f.is_deleted()) {
            if row.path == old_prefix {
                continue;
            }
            if let Some(path) = rebase_path(&row.path, old_prefix, new_prefix) {
                row.path = path;
                row.depth += depth_delta;
                row.updated_at = now;
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }

    async fn exists_by_name(
        &self,
        name: &str,
        parent_id: Option<FolderId>,
        exclude_id: Option<FolderId>,
    ) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.name_taken(name, parent_id, exclude_id))
    }

    async fn has_children(&self, id: FolderId) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.live().any(|f| f.parent_id == Some(id)))
    }

    async fn increment_item_count(&self, id: FolderId, delta: i64) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(row) = state.live_mut(id) {
            row.item_count = row.item_count.saturating_add(delta).max(0);
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn increment_total_item_count(&self, ids: &[FolderId], delta: i64) -> AppResult<()> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        for id in ids {
            if let Some(row) = state.live_mut(*id) {
                row.total_item_count = row.total_item_count.saturating_add(delta).max(0);
                row.updated_at = now;
            }
        }
        Ok(())
    }
}
