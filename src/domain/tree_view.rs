/*
Renders the catalog's structural shape (not its sorted order) as a termtree.
Children are labelled with their side so single-child nodes stay unambiguous.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::CourseTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for CourseTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &CourseTree, node_idx: Index, label: String) -> Tree<String> {
            let mut node_tree = Tree::new(label);
            if let Some(node) = tree.get_node(node_idx) {
                for (side, child) in [("L", node.left), ("R", node.right)] {
                    if let Some(child_idx) = child {
                        if let Some(child_node) = tree.get_node(child_idx) {
                            let child_label = format!("{}: {}", side, child_node.id());
                            node_tree.push(build_tree(tree, child_idx, child_label));
                        }
                    }
                }
            }
            node_tree
        }

        match self.root().and_then(|idx| self.get_node(idx).map(|n| (idx, n))) {
            Some((root_idx, root)) => build_tree(self, root_idx, root.id().to_string()),
            None => Tree::new("Empty catalog".to_string()),
        }
    }
}
