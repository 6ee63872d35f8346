//! File system tree: the consumer of hierarchical names
//!
//! Directories and files live in an arena; full path names are built as
//! [`Name`](crate::domain::Name) values with `/` as delimiter.

pub mod arena;
pub mod display;
pub mod node;

pub use arena::{FileTree, TreeIterator, PATH_DELIMITER};
pub use display::TreeNodeConvert;
pub use node::{FileState, NodeData, NodeKind, TreeNode};

use crate::domain::NameResult;

/// Small sample file system used by the CLI and the tests.
///
/// ```text
/// /
/// ├── usr/bin/{ls, code}
/// ├── media/
/// └── home/riehle/{.bashrc, wallpaper.jpg, projects/}
/// ```
pub fn sample_tree(buggy_files: bool) -> NameResult<FileTree> {
    let mut tree = FileTree::new();
    let add_file = |tree: &mut FileTree, name: &str, parent| {
        if buggy_files {
            tree.add_buggy_file(name, parent)
        } else {
            tree.add_file(name, parent)
        }
    };

    let usr = tree.add_directory("usr", tree.root())?;
    let bin = tree.add_directory("bin", usr)?;
    add_file(&mut tree, "ls", bin)?;
    add_file(&mut tree, "code", bin)?;

    tree.add_directory("media", tree.root())?;

    let home = tree.add_directory("home", tree.root())?;
    let riehle = tree.add_directory("riehle", home)?;
    add_file(&mut tree, ".bashrc", riehle)?;
    add_file(&mut tree, "wallpaper.jpg", riehle)?;
    tree.add_directory("projects", riehle)?;

    Ok(tree)
}
