use std::fmt;

use generational_arena::Index;

use crate::domain::{NameError, NameResult};

/// Lifecycle of a file node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileState {
    Open,
    #[default]
    Closed,
    Deleted,
}

/// What a node in the tree is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The single root directory; its base name is empty.
    Root,
    Directory,
    File(FileState),
    /// A file whose base name always reads back empty. Searching a tree that
    /// holds one fails with an invariant violation.
    BuggyFile(FileState),
}

impl NodeKind {
    pub fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Root | NodeKind::Directory)
    }

    pub fn file_state(&self) -> Option<FileState> {
        match self {
            NodeKind::File(state) | NodeKind::BuggyFile(state) => Some(*state),
            _ => None,
        }
    }
}

/// Payload of a tree node.
#[derive(Debug, Clone)]
pub struct NodeData {
    base_name: String,
    pub kind: NodeKind,
}

impl NodeData {
    pub fn new(base_name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            base_name: base_name.into(),
            kind,
        }
    }

    pub fn base_name(&self) -> &str {
        match self.kind {
            NodeKind::BuggyFile(_) => "",
            _ => &self.base_name,
        }
    }

    pub fn set_base_name(&mut self, base_name: impl Into<String>) {
        self.base_name = base_name.into();
    }

    /// Move an open file to `Closed`, a closed one to `Open`, or any file to
    /// `Deleted`, checking the state machine.
    pub(crate) fn transition(&mut self, to: FileState) -> NameResult<()> {
        let state = match &mut self.kind {
            NodeKind::File(state) | NodeKind::BuggyFile(state) => state,
            _ => return Err(NameError::illegal_argument("node is not a file")),
        };
        match to {
            FileState::Open => {
                NameError::ensure_state(*state != FileState::Deleted, "file is deleted")?;
                NameError::ensure_state(*state == FileState::Closed, "file already open")?;
            }
            FileState::Closed => {
                NameError::ensure_state(*state == FileState::Open, "file must be open")?;
            }
            FileState::Deleted => {
                NameError::ensure_state(*state != FileState::Deleted, "file is deleted")?;
            }
        }
        *state = to;
        Ok(())
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Root => write!(f, "/"),
            NodeKind::Directory => write!(f, "{}/", self.base_name),
            _ => write!(f, "{}", self.base_name()),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}
