//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use super::model::FolderId;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<FolderId>,
    /// Position among siblings.
    pub sort_order: i32,
    /// Depth level.
    pub depth: i32,
    /// Items assigned directly to this folder.
    pub item_count: i64,
    /// Items assigned to this folder's subtree.
    pub total_item_count: i64,
    /// Child folder nodes, in sibling order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Deep chains would overflow the stack with the recursive default drop.
impl Drop for FolderNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: FolderId) -> FolderNode {
        FolderNode {
            id,
            name: format!("f{id}"),
            parent_id: None,
            sort_order: 0,
            depth: 0,
            item_count: 0,
            total_item_count: 0,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_size_counts_whole_subtree() {
        let mut root = leaf(1);
        let mut child = leaf(2);
        child.children.push(leaf(3));
        root.children.push(child);
        root.children.push(leaf(4));

        assert_eq!(root.size(), 4);
        assert!(!root.is_leaf());
        assert!(root.children[1].is_leaf());
    }

    #[test]
    fn test_deep_chain_size_and_drop() {
        let mut node = leaf(100_000);
        for id in (1..100_000).rev() {
            let mut parent = leaf(id);
            parent.children.push(node);
            node = parent;
        }

        assert_eq!(node.size(), 100_000);
        drop(node);
    }
}
