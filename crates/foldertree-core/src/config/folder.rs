//! Hierarchy rules.

use serde::{Deserialize, Serialize};

/// Rules enforced by the folder service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Maximum hierarchy depth. No folder may reach this depth; `0` means
    /// unlimited.
    #[serde(default)]
    pub max_depth: u32,
}

impl FolderConfig {
    /// Create a configuration with the given depth limit.
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// The configured limit, or `None` when unlimited.
    pub fn depth_limit(&self) -> Option<i32> {
        match self.max_depth {
            0 => None,
            limit => Some(i32::try_from(limit).unwrap_or(i32::MAX)),
        }
    }
}
