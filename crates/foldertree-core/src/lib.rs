//! # foldertree-core
//!
//! Core crate for foldertree. Contains the configuration schemas and the
//! unified error system shared by the entity, database, service, and CLI
//! crates.
//!
//! This crate has **no** internal dependencies on other foldertree crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
