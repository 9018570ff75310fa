//! Data-access contract for folder hierarchies.

use std::fmt::Debug;

use async_trait::async_trait;

use foldertree_core::result::AppResult;
use foldertree_entity::folder::{Folder, FolderId, NewFolder};

/// Storage primitives over a flat table of folder rows.
///
/// Soft-deleted rows are invisible to every method. Each method is a
/// single storage operation; multi-row mutations apply their predicate
/// atomically per row. Running a whole service operation in one
/// transaction is the caller's job.
#[async_trait]
pub trait FolderRepository: Debug + Send + Sync + 'static {
    /// Insert a folder and return it with its assigned id.
    async fn create(&self, data: &NewFolder) -> AppResult<Folder>;

    /// Persist `name`, `parent_id`, `sort_order`, `depth`, and `path`.
    async fn update(&self, folder: &Folder) -> AppResult<Folder>;

    /// Soft-delete a folder. Returns `true` if a live row was deleted.
    async fn delete(&self, id: FolderId) -> AppResult<bool>;

    /// Find a folder by id.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of `parent_id`, or the roots when `None`, ordered by
    /// sort order then id.
    async fn find_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// Every folder whose path starts with `prefix`, ordered by depth,
    /// sort order, then id.
    async fn find_by_path_prefix(&self, prefix: &str) -> AppResult<Vec<Folder>>;

    /// Every folder, ordered by depth, sort order, then id.
    async fn find_all(&self) -> AppResult<Vec<Folder>>;

    /// The folders with the given ids, ordered by depth.
    async fn find_by_ids(&self, ids: &[FolderId]) -> AppResult<Vec<Folder>>;

    /// Highest sort order among the children of `parent_id`, 0 if none.
    async fn max_sort_order(&self, parent_id: Option<FolderId>) -> AppResult<i32>;

    /// Overwrite a folder's sort order.
    async fn set_sort_order(&self, id: FolderId, sort_order: i32) -> AppResult<()>;

    /// Overwrite a folder's path and depth.
    async fn set_path_and_depth(&self, id: FolderId, path: &str, depth: i32) -> AppResult<()>;

    /// For every folder whose path starts with `old_prefix` and is not
    /// `old_prefix` itself, replace that leading prefix with `new_prefix`
    /// and add `depth_delta` to its depth. Returns the number of rows
    /// rewritten.
    async fn rewrite_descendant_paths(
        &self,
        old_prefix: &str,
        new_prefix: &str,
        depth_delta: i32,
    ) -> AppResult<u64>;

    /// Whether a folder named `name` exists under `parent_id`, ignoring
    /// `exclude_id`.
    async fn exists_by_name(
        &self,
        name: &str,
        parent_id: Option<FolderId>,
        exclude_id: Option<FolderId>,
    ) -> AppResult<bool>;

    /// Whether any folder has `id` as its parent.
    async fn has_children(&self, id: FolderId) -> AppResult<bool>;

    /// Add `delta` to a folder's item count, clamping at zero.
    async fn increment_item_count(&self, id: FolderId, delta: i64) -> AppResult<()>;

    /// Add `delta` to the total item count of every listed folder,
    /// clamping each at zero.
    async fn increment_total_item_count(&self, ids: &[FolderId], delta: i64) -> AppResult<()>;
}
