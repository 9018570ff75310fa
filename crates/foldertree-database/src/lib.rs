//! # foldertree-database
//!
//! The [`FolderRepository`] contract the folder service depends on, plus
//! two implementations: [`PgFolderRepository`] over a PostgreSQL table and
//! [`MemoryFolderRepository`] over an in-process map.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod repository;

pub use connection::DatabasePool;
pub use repositories::{MemoryFolderRepository, PgFolderRepository};
pub use repository::FolderRepository;
