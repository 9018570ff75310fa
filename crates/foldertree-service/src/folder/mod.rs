//! Folder management and tree services.

pub mod error;
pub mod service;
pub mod tree;

pub use error::FolderError;
pub use service::{CreateFolderRequest, FolderService, MoveFolderRequest};
pub use tree::build_forest;
