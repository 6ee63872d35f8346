use generational_arena::Index;
use termtree::Tree;

use crate::files::arena::FileTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for FileTree {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &FileTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.data.to_string());
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let root = self.root();
        let label = self
            .get_node(root)
            .map(|n| n.data.to_string())
            .unwrap_or_default();
        let mut tree = Tree::new(label);
        build_tree(self, root, &mut tree);
        tree
    }
}
