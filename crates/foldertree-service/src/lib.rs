//! # foldertree-service
//!
//! Business logic for materialized-path folder hierarchies. The
//! [`FolderService`] validates and applies every hierarchy change through a
//! [`FolderRepository`](foldertree_database::FolderRepository), keeping
//! paths, depths, sibling names, and item counters consistent.
//!
//! The service follows constructor injection: the repository is provided
//! at construction time as an `Arc<dyn FolderRepository>`.

pub mod folder;

pub use folder::{
    CreateFolderRequest, FolderError, FolderService, MoveFolderRequest, build_forest,
};
