//! Shared fixtures for folder service tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use foldertree_core::config::FolderConfig;
use foldertree_core::error::AppError;
use foldertree_core::result::AppResult;
use foldertree_database::{FolderRepository, MemoryFolderRepository};
use foldertree_entity::folder::{Folder, FolderId, NewFolder};
use foldertree_service::{CreateFolderRequest, FolderService};

/// A service over a fresh in-memory repository.
pub fn service(max_depth: u32) -> FolderService {
    service_with_repo(max_depth).0
}

/// A service plus a handle on its repository.
pub fn service_with_repo(max_depth: u32) -> (FolderService, Arc<MemoryFolderRepository>) {
    let repo = Arc::new(MemoryFolderRepository::new());
    let svc = FolderService::new(repo.clone(), FolderConfig::with_max_depth(max_depth));
    (svc, repo)
}

/// Create a folder, panicking on failure.
pub async fn create(svc: &FolderService, name: &str, parent_id: Option<FolderId>) -> Folder {
    svc.create_folder(CreateFolderRequest {
        name: name.to_string(),
        parent_id,
    })
    .await
    .unwrap_or_else(|e| panic!("create {name}: {e}"))
}

/// Re-read a folder.
pub async fn reload(svc: &FolderService, id: FolderId) -> Folder {
    svc.get_folder(id).await.unwrap()
}

/// A repository whose every call fails like a dropped connection.
#[derive(Debug, Default)]
pub struct UnreachableRepository;

fn refused<T>() -> AppResult<T> {
    Err(AppError::database("connection refused"))
}

#[async_trait]
impl FolderRepository for UnreachableRepository {
    async fn create(&self, _: &NewFolder) -> AppResult<Folder> {
        refused()
    }
    async fn update(&self, _: &Folder) -> AppResult<Folder> {
        refused()
    }
    async fn delete(&self, _: FolderId) -> AppResult<bool> {
        refused()
    }
    async fn find_by_id(&self, _: FolderId) -> AppResult<Option<Folder>> {
        refused()
    }
    async fn find_by_parent(&self, _: Option<FolderId>) -> AppResult<Vec<Folder>> {
        refused()
    }
    async fn find_by_path_prefix(&self, _: &str) -> AppResult<Vec<Folder>> {
        refused()
    }
    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        refused()
    }
    async fn find_by_ids(&self, _: &[FolderId]) -> AppResult<Vec<Folder>> {
        refused()
    }
    async fn max_sort_order(&self, _: Option<FolderId>) -> AppResult<i32> {
        refused()
    }
    async fn set_sort_order(&self, _: FolderId, _: i32) -> AppResult<()> {
        refused()
    }
    async fn set_path_and_depth(&self, _: FolderId, _: &str, _: i32) -> AppResult<()> {
        refused()
    }
    async fn rewrite_descendant_paths(&self, _: &str, _: &str, _: i32) -> AppResult<u64> {
        refused()
    }
    async fn exists_by_name(
        &self,
        _: &str,
        _: Option<FolderId>,
        _: Option<FolderId>,
    ) -> AppResult<bool> {
        refused()
    }
    async fn has_children(&self, _: FolderId) -> AppResult<bool> {
        refused()
    }
    async fn increment_item_count(&self, _: FolderId, _: i64) -> AppResult<()> {
        refused()
    }
    async fn increment_total_item_count(&self, _: &[FolderId], _: i64) -> AppResult<()> {
        refused()
    }
}
