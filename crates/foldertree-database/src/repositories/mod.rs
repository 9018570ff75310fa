//! Implementations of [`FolderRepository`](crate::repository::FolderRepository).

pub mod folder;
pub mod memory;

pub use folder::PgFolderRepository;
pub use memory::MemoryFolderRepository;
