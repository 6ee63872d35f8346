use generational_arena::{Arena, Index};
use tracing::{debug, instrument, warn};

use crate::domain::{ErrorKind, Name, NameError, NameResult, StringName};
use crate::files::node::{FileState, NodeData, NodeKind, TreeNode};

/// Delimiter of full path names produced by [`FileTree::full_name`].
pub const PATH_DELIMITER: &str = "/";

/// Arena-based file system tree.
///
/// Uses a generational arena for memory-safe node references. The tree always
/// has a root directory, which is created with the tree and cannot be moved.
#[derive(Debug)]
pub struct FileTree {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData::new("", NodeKind::Root),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    fn node(&self, idx: Index) -> NameResult<&TreeNode> {
        self.arena
            .get(idx)
            .ok_or_else(|| NameError::illegal_argument(format!("no such node: {:?}", idx)))
    }

    fn node_mut(&mut self, idx: Index) -> NameResult<&mut TreeNode> {
        self.arena
            .get_mut(idx)
            .ok_or_else(|| NameError::illegal_argument(format!("no such node: {:?}", idx)))
    }

    pub fn add_directory(&mut self, base_name: &str, parent: Index) -> NameResult<Index> {
        self.insert_node(base_name, NodeKind::Directory, parent)
    }

    pub fn add_file(&mut self, base_name: &str, parent: Index) -> NameResult<Index> {
        self.insert_node(base_name, NodeKind::File(FileState::Closed), parent)
    }

    /// Add a file whose base name reads back empty.
    pub fn add_buggy_file(&mut self, base_name: &str, parent: Index) -> NameResult<Index> {
        self.insert_node(base_name, NodeKind::BuggyFile(FileState::Closed), parent)
    }

    #[instrument(level = "trace", skip(self))]
    fn insert_node(&mut self, base_name: &str, kind: NodeKind, parent: Index) -> NameResult<Index> {
        NameError::ensure_argument(
            self.node(parent)?.data.kind.is_directory(),
            "parent node must be a directory",
        )?;
        let idx = self.arena.insert(TreeNode {
            data: NodeData::new(base_name, kind),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.node_mut(parent)?.children.push(idx);
        debug!(base_name, ?kind, "added node");
        Ok(idx)
    }

    pub fn base_name(&self, idx: Index) -> NameResult<&str> {
        Ok(self.node(idx)?.data.base_name())
    }

    pub fn kind(&self, idx: Index) -> NameResult<NodeKind> {
        Ok(self.node(idx)?.data.kind)
    }

    /// Parent of `idx`; the root is its own parent.
    pub fn parent(&self, idx: Index) -> NameResult<Index> {
        Ok(self.node(idx)?.parent.unwrap_or(self.root))
    }

    pub fn children(&self, idx: Index) -> NameResult<&[Index]> {
        Ok(&self.node(idx)?.children)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn rename(&mut self, idx: Index, base_name: &str) -> NameResult<()> {
        NameError::ensure_argument(idx != self.root, "root cannot be renamed")?;
        self.node_mut(idx)?.data.set_base_name(base_name);
        Ok(())
    }

    /// Re-attach `idx` under the directory `to`.
    #[instrument(level = "trace", skip(self))]
    pub fn move_node(&mut self, idx: Index, to: Index) -> NameResult<()> {
        NameError::ensure_argument(idx != self.root, "root cannot be moved")?;
        NameError::ensure_argument(
            self.node(to)?.data.kind.is_directory(),
            "target node must be a directory",
        )?;
        NameError::ensure_argument(
            !self.is_ancestor_or_self(idx, to)?,
            "cannot move a node below itself",
        )?;
        let old_parent = self.parent(idx)?;
        self.node_mut(old_parent)?.children.retain(|&c| c != idx);
        self.node_mut(to)?.children.push(idx);
        self.node_mut(idx)?.parent = Some(to);
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: Index, mut idx: Index) -> NameResult<bool> {
        loop {
            if idx == ancestor {
                return Ok(true);
            }
            match self.node(idx)?.parent {
                Some(parent) => idx = parent,
                None => return Ok(false),
            }
        }
    }

    /// Full path name of `idx`, e.g. `/usr/bin/ls`.
    ///
    /// The root contributes one empty component; every node below it appends
    /// its base name.
    #[instrument(level = "trace", skip(self))]
    pub fn full_name(&self, idx: Index) -> NameResult<Box<dyn Name>> {
        let mut chain = Vec::new();
        let mut current = idx;
        while let Some(parent) = self.node(current)?.parent {
            chain.push(self.base_name(current)?.to_string());
            current = parent;
        }
        let mut name: Box<dyn Name> = Box::new(StringName::new("", Some(PATH_DELIMITER))?);
        for base_name in chain.iter().rev() {
            name = name.append(base_name)?;
        }
        Ok(name)
    }

    /// All nodes below (and including) `from` whose base name is `base_name`.
    ///
    /// # Errors
    /// `ServiceFailure` triggered by the `InvalidState` if any visited node is
    /// inconsistent. Matches found before the failure are discarded.
    #[instrument(level = "debug", skip(self))]
    pub fn find_nodes(&self, from: Index, base_name: &str) -> NameResult<Vec<Index>> {
        self.node(from)?;
        let mut result = Vec::new();
        match self.find_nodes_recursive(from, base_name, &mut result) {
            Ok(()) => Ok(result),
            Err(e) if e.kind() == ErrorKind::InvalidState => {
                warn!(error = %e, partial = result.len(), "search aborted");
                Err(NameError::service_failure("service failed", e))
            }
            Err(e) => Err(e),
        }
    }

    fn find_nodes_recursive(
        &self,
        idx: Index,
        base_name: &str,
        result: &mut Vec<Index>,
    ) -> NameResult<()> {
        let node = self.node(idx)?;
        let own = node.data.base_name();
        NameError::ensure_state(
            !own.is_empty() || idx == self.root,
            "base name must not be empty",
        )?;
        if own == base_name {
            result.push(idx);
        }
        for &child in &node.children {
            self.find_nodes_recursive(child, base_name, result)?;
        }
        Ok(())
    }

    pub fn open(&mut self, idx: Index) -> NameResult<()> {
        self.node_mut(idx)?.data.transition(FileState::Open)
    }

    pub fn close(&mut self, idx: Index) -> NameResult<()> {
        self.node_mut(idx)?.data.transition(FileState::Closed)
    }

    pub fn delete(&mut self, idx: Index) -> NameResult<()> {
        self.node_mut(idx)?.data.transition(FileState::Deleted)
    }

    /// Read `no_bytes` from an open file. Content is not stored, so the bytes
    /// are zero.
    pub fn read(&self, idx: Index, no_bytes: usize) -> NameResult<Vec<u8>> {
        let state = self
            .node(idx)?
            .data
            .kind
            .file_state()
            .ok_or_else(|| NameError::illegal_argument("node is not a file"))?;
        NameError::ensure_state(state == FileState::Open, "file must be open")?;
        Ok(vec![0; no_bytes])
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        self.get_node(idx).map_or(0, |node| {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        })
    }
}

/// Pre-order traversal, children left to right.
pub struct TreeIterator<'a> {
    tree: &'a FileTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a FileTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_tree_when_inspecting_root_then_root_is_own_parent() {
        let tree = FileTree::new();
        assert_eq!(tree.parent(tree.root()).unwrap(), tree.root());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.full_name(tree.root()).unwrap().as_string(None).unwrap(), "");
    }

    #[test]
    fn given_file_as_parent_when_adding_then_illegal_argument() {
        let mut tree = FileTree::new();
        let f = tree.add_file("f", tree.root()).unwrap();
        assert!(tree.add_file("g", f).unwrap_err().is_precondition());
    }

    #[test]
    fn given_nested_nodes_when_iterating_then_pre_order() {
        let mut tree = FileTree::new();
        let a = tree.add_directory("a", tree.root()).unwrap();
        tree.add_file("b", a).unwrap();
        tree.add_directory("c", tree.root()).unwrap();

        let names: Vec<&str> = tree.iter().map(|(_, n)| n.data.base_name()).collect();
        assert_eq!(names, vec!["", "a", "b", "c"]);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn given_directory_when_moving_below_itself_then_rejected() {
        let mut tree = FileTree::new();
        let a = tree.add_directory("a", tree.root()).unwrap();
        let b = tree.add_directory("b", a).unwrap();
        assert!(tree.move_node(a, b).unwrap_err().is_precondition());
        assert!(tree.move_node(tree.root(), a).is_err());
    }
}
