//! # foldertree-entity
//!
//! Domain entity models for foldertree. [`folder::Folder`] represents one
//! row of a hierarchy table and derives `sqlx::FromRow`;
//! [`folder::FolderNode`] is the in-memory projection used for tree
//! views and is never persisted.

pub mod folder;
