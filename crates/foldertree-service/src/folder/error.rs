//! Errors surfaced by the folder service.

use thiserror::Error;

use foldertree_core::error::{AppError, ErrorKind};
use foldertree_entity::folder::FolderId;

/// Why a folder operation was rejected.
///
/// Every variant except [`FolderError::Storage`] is raised before the
/// operation writes anything.
#[derive(Debug, Error)]
pub enum FolderError {
    /// The referenced folder does not exist.
    #[error("folder {0} not found")]
    NotFound(FolderId),
    /// The referenced parent folder does not exist.
    #[error("parent folder {0} not found")]
    ParentNotFound(FolderId),
    /// The target parent is the folder itself or one of its descendants.
    #[error("cannot move a folder into itself or one of its descendants")]
    CircularReference,
    /// The name is empty after trimming or too long.
    #[error("folder name must be between 1 and 255 characters")]
    InvalidName,
    /// A sibling already carries this name.
    #[error("a folder with this name already exists under the same parent")]
    DuplicateName,
    /// The resulting depth would reach the configured limit.
    #[error("folder depth limit of {limit} exceeded")]
    MaxDepthExceeded {
        /// The configured limit.
        limit: i32,
    },
    /// The folder still has child folders.
    #[error("folder {0} has child folders and cannot be deleted")]
    HasChildren(FolderId),
    /// A repository failure, passed through unchanged.
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl FolderError {
    /// The workspace-wide category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::ParentNotFound(_) => ErrorKind::NotFound,
            Self::InvalidName => ErrorKind::Validation,
            Self::CircularReference
            | Self::DuplicateName
            | Self::MaxDepthExceeded { .. }
            | Self::HasChildren(_) => ErrorKind::Conflict,
            Self::Storage(err) => err.kind,
        }
    }
}

impl From<FolderError> for AppError {
    fn from(err: FolderError) -> Self {
        match err {
            FolderError::Storage(inner) => inner,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(FolderError::NotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(FolderError::ParentNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(FolderError::InvalidName.kind(), ErrorKind::Validation);
        assert_eq!(FolderError::HasChildren(3).kind(), ErrorKind::Conflict);
        assert_eq!(
            FolderError::Storage(AppError::database("boom")).kind(),
            ErrorKind::Database
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = FolderError::MaxDepthExceeded { limit: 2 }.into();
        assert_eq!(app.kind, ErrorKind::Conflict);
        assert_eq!(app.message, "folder depth limit of 2 exceeded");

        let app: AppError = FolderError::Storage(AppError::database("connection reset")).into();
        assert_eq!(app.kind, ErrorKind::Database);
        assert_eq!(app.message, "connection reset");
    }
}
