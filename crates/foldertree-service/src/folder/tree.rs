//! Folder tree building and path resolution.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use foldertree_core::error::AppError;
use foldertree_entity::folder::path::parse_path;
use foldertree_entity::folder::{Folder, FolderId, FolderNode};

use super::error::FolderError;
use super::service::FolderService;

impl FolderService {
    /// Builds the forest of every root folder.
    pub async fn get_tree(&self) -> Result<Vec<FolderNode>, FolderError> {
        let folders = self.folder_repo.find_all().await?;
        debug!(folders = folders.len(), "Building full tree");
        Ok(build_forest(&folders, None))
    }

    /// Builds the forest below a folder: its children become the roots and
    /// the folder itself is left out.
    pub async fn get_sub_tree(&self, root_id: FolderId) -> Result<Vec<FolderNode>, FolderError> {
        let root = self.get_folder(root_id).await?;
        let subtree = self.folder_repo.find_by_path_prefix(&root.path).await?;
        debug!(root_id, folders = subtree.len(), "Building subtree");
        Ok(build_forest(&subtree, Some(root_id)))
    }

    /// Gets the breadcrumb trail from the root down to the folder itself.
    pub async fn get_ancestors(&self, folder_id: FolderId) -> Result<Vec<Folder>, FolderError> {
        let folder = self.get_folder(folder_id).await?;
        let chain = parse_path(&folder.path).map_err(AppError::from)?;
        Ok(self.folder_repo.find_by_ids(&chain).await?)
    }

    /// IDs of a folder and everything beneath it, for scoping content
    /// queries to a subtree.
    pub async fn get_descendant_ids(
        &self,
        folder_id: FolderId,
    ) -> Result<Vec<FolderId>, FolderError> {
        let folder = self.get_folder(folder_id).await?;
        let subtree = self.folder_repo.find_by_path_prefix(&folder.path).await?;
        Ok(subtree.into_iter().map(|f| f.id).collect())
    }
}

/// Builds a forest from a flat list of folders.
///
/// `folders` must already be in sibling order; that order is kept. With no
/// `virtual_root`, folders without a parent become the roots. With one,
/// the children of `virtual_root` become the roots and the virtual root's
/// own record, if present, is dropped. Folders whose parent is not in the
/// list are dropped along with their subtrees. Only the first record of a
/// repeated id is used.
pub fn build_forest(folders: &[Folder], virtual_root: Option<FolderId>) -> Vec<FolderNode> {
    let mut roots = Vec::new();
    let mut children: HashMap<FolderId, Vec<usize>> = HashMap::with_capacity(folders.len());
    let mut seen = HashSet::with_capacity(folders.len());

    for (idx, folder) in folders.iter().enumerate() {
        if Some(folder.id) == virtual_root || !seen.insert(folder.id) {
            continue;
        }
        match (folder.parent_id, virtual_root) {
            (None, None) => roots.push(idx),
            (Some(parent), Some(root)) if parent == root => roots.push(idx),
            (Some(parent), _) => children.entry(parent).or_default().push(idx),
            (None, Some(_)) => {}
        }
    }

    // Post-order walk: a node is finished once all of its children are.
    let mut finished: HashMap<usize, FolderNode> = HashMap::with_capacity(folders.len());
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&idx| (idx, false)).collect();

    while let Some((idx, expanded)) = stack.pop() {
        let kids = children.get(&folders[idx].id);
        if expanded {
            let mut node = folders[idx].to_node();
            if let Some(kids) = kids {
                node.children = kids.iter().filter_map(|k| finished.remove(k)).collect();
            }
            finished.insert(idx, node);
        } else {
            stack.push((idx, true));
            if let Some(kids) = kids {
                stack.extend(kids.iter().map(|&k| (k, false)));
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|idx| finished.remove(&idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn folder(id: FolderId, name: &str, parent_id: Option<FolderId>) -> Folder {
        let now = Utc::now();
        Folder {
            id,
            name: name.to_string(),
            parent_id,
            sort_order: 0,
            depth: 0,
            path: String::new(),
            item_count: 0,
            total_item_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn names(nodes: &[FolderNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(build_forest(&[], None).is_empty());
        assert!(build_forest(&[], Some(1)).is_empty());
    }

    #[test]
    fn test_multi_level() {
        let folders = vec![
            folder(1, "root", None),
            folder(2, "childA", Some(1)),
            folder(3, "childB", Some(1)),
            folder(4, "grandchild", Some(2)),
        ];

        let forest = build_forest(&folders, None);

        assert_eq!(forest.len(), 1);
        assert_eq!(names(&forest[0].children), vec!["childA", "childB"]);
        assert_eq!(names(&forest[0].children[0].children), vec!["grandchild"]);
        assert!(forest[0].children[1].is_leaf());
        assert_eq!(forest[0].size(), 4);
    }

    #[test]
    fn test_sibling_order_follows_input() {
        let folders = vec![
            folder(1, "r1", None),
            folder(5, "r2", None),
            folder(9, "z", Some(1)),
            folder(3, "a", Some(1)),
        ];

        let forest = build_forest(&folders, None);

        assert_eq!(names(&forest), vec!["r1", "r2"]);
        assert_eq!(names(&forest[0].children), vec!["z", "a"]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let folders = vec![folder(4, "grandchild", Some(2)), folder(2, "child", None)];

        let forest = build_forest(&folders, None);

        assert_eq!(names(&forest), vec!["child"]);
        assert_eq!(names(&forest[0].children), vec!["grandchild"]);
    }

    #[test]
    fn test_virtual_root() {
        let folders = vec![
            folder(2, "sub", Some(1)),
            folder(3, "a", Some(2)),
            folder(4, "b", Some(2)),
            folder(5, "a1", Some(3)),
        ];

        let forest = build_forest(&folders, Some(2));

        assert_eq!(names(&forest), vec!["a", "b"]);
        assert_eq!(names(&forest[0].children), vec!["a1"]);
    }

    #[test]
    fn test_virtual_root_skips_real_roots() {
        let folders = vec![folder(1, "root", None), folder(2, "child", Some(1))];

        let forest = build_forest(&folders, Some(1));

        assert_eq!(names(&forest), vec!["child"]);
    }

    #[test]
    fn test_deep_chain() {
        let depth = 50_000;
        let folders: Vec<Folder> = (1..=depth)
            .map(|id| folder(id, "f", (id > 1).then(|| id - 1)))
            .collect();

        let forest = build_forest(&folders, None);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].size(), depth as usize);

        let mut node = &forest[0];
        while let Some(child) = node.children.first() {
            assert_eq!(child.parent_id, Some(node.id));
            node = child;
        }
        assert_eq!(node.id, depth);
    }

    #[test]
    fn test_orphans_dropped() {
        let folders = vec![
            folder(1, "root", None),
            folder(7, "orphan", Some(42)),
            folder(8, "orphan-child", Some(7)),
        ];

        let forest = build_forest(&folders, None);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].size(), 1);
    }
}
