//! Folder domain entities.

pub mod model;
pub mod path;
pub mod tree;

pub use model::{Folder, FolderId, NewFolder};
pub use path::PathError;
pub use tree::FolderNode;
