//! Materialized path encoding.
//!
//! A path lists every folder from the root down to the folder itself,
//! as base-10 ids between `/` delimiters: the root `7` is `/7/`, its child
//! `9` is `/7/9/`. Paths are compared as prefixes, so the trailing `/`
//! is what keeps `/1/` from matching `/12/`.

use thiserror::Error;

use foldertree_core::error::{AppError, ErrorKind};

use super::model::FolderId;

/// Path delimiter.
pub const SEPARATOR: char = '/';

/// Errors raised when decoding a stored path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path has no segments at all.
    #[error("path is empty")]
    Empty,
    /// The path does not start and end with `/`.
    #[error("path '{0}' must start and end with '/'")]
    Unterminated(String),
    /// A segment is not a canonical unsigned integer.
    #[error("path '{path}' has invalid segment '{segment}'")]
    InvalidSegment {
        /// The offending path.
        path: String,
        /// The offending segment.
        segment: String,
    },
}

impl From<PathError> for AppError {
    fn from(err: PathError) -> Self {
        AppError::with_source(ErrorKind::Internal, format!("Malformed folder path: {err}"), err)
    }
}

/// Path of a root folder.
pub fn root_path(id: FolderId) -> String {
    format!("{SEPARATOR}{id}{SEPARATOR}")
}

/// Path of folder `id` placed under a folder whose path is `parent_path`.
///
/// `parent_path` may be the bare `/` used as the base of root folders.
pub fn child_path(parent_path: &str, id: FolderId) -> String {
    format!("{parent_path}{id}{SEPARATOR}")
}

/// Decode a path into its ids, root first.
pub fn parse_path(path: &str) -> Result<Vec<FolderId>, PathError> {
    if path.len() < 2 {
        return Err(if path.is_empty() || path == "/" {
            PathError::Empty
        } else {
            PathError::Unterminated(path.to_string())
        });
    }
    let inner = path
        .strip_prefix(SEPARATOR)
        .and_then(|p| p.strip_suffix(SEPARATOR))
        .ok_or_else(|| PathError::Unterminated(path.to_string()))?;

    inner
        .split(SEPARATOR)
        .map(|segment| parse_segment(segment).ok_or_else(|| invalid(path, segment)))
        .collect()
}

/// Replace a leading `old_prefix` of `path` with `new_prefix`.
///
/// Returns `None` when `path` does not start with `old_prefix`; occurrences
/// of `old_prefix` anywhere else in `path` are never touched.
pub fn rebase_path(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(old_prefix)?;
    Some(format!("{new_prefix}{rest}"))
}

fn parse_segment(segment: &str) -> Option<FolderId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse::<FolderId>().ok()
}

fn invalid(path: &str, segment: &str) -> PathError {
    PathError::InvalidSegment {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_paths() {
        assert_eq!(root_path(1), "/1/");
        assert_eq!(child_path("/1/", 2), "/1/2/");
        assert_eq!(child_path("/", 5), "/5/");
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path("/1/").unwrap(), vec![1]);
        assert_eq!(parse_path("/1/3/5/").unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_path("/120/7/").unwrap(), vec![120, 7]);
    }

    #[test]
    fn test_parse_path_rejects_malformed() {
        assert_eq!(parse_path(""), Err(PathError::Empty));
        assert_eq!(parse_path("/"), Err(PathError::Empty));
        assert!(matches!(parse_path("1/2/"), Err(PathError::Unterminated(_))));
        assert!(matches!(parse_path("/1/2"), Err(PathError::Unterminated(_))));
        assert!(matches!(parse_path("//"), Err(PathError::InvalidSegment { .. })));
        assert!(matches!(parse_path("/1//2/"), Err(PathError::InvalidSegment { .. })));
        assert!(matches!(parse_path("/+1/"), Err(PathError::InvalidSegment { .. })));
        assert!(matches!(parse_path("/-1/"), Err(PathError::InvalidSegment { .. })));
        assert!(matches!(parse_path("/01/"), Err(PathError::InvalidSegment { .. })));
        assert!(matches!(parse_path("/a/"), Err(PathError::InvalidSegment { .. })));
    }

    #[test]
    fn test_rebase_is_prefix_anchored() {
        assert_eq!(rebase_path("/1/2/3/", "/1/2/", "/9/2/").as_deref(), Some("/9/2/3/"));
        assert_eq!(rebase_path("/4/2/", "/2/", "/8/2/"), None);
        // "/2/" also occurs later in the path; only the leading one moves.
        assert_eq!(
            rebase_path("/2/5/2/", "/2/", "/7/2/").as_deref(),
            Some("/7/2/5/2/")
        );
    }
}
