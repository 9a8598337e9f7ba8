use std::cmp::Ordering;

use super::{Link, NodeId, Tree};

impl<T: Ord> Tree<T> {
    /// Inserts a key. Returns false, leaving the tree untouched, if the key is
    /// already present.
    pub(crate) fn insert(&mut self, key: T) -> bool {
        let (root, inserted) = self.insert_below(self.root, None, key);
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    // Inserts into the subtree at `link`, whose parent is `parent`.
    // Returns the (possibly rotated) subtree root and whether a node was created.
    fn insert_below(&mut self, link: Link, parent: Link, key: T) -> (NodeId, bool) {
        let Some(id) = link else {
            return (self.nodes.alloc(key, parent), true);
        };

        let inserted = match key.cmp(&self.nodes[id].key) {
            Ordering::Equal => false,
            Ordering::Less => {
                let (child, inserted) = self.insert_below(self.nodes[id].left, Some(id), key);
                self.attach_left(id, Some(child));
                inserted
            }
            Ordering::Greater => {
                let (child, inserted) = self.insert_below(self.nodes[id].right, Some(id), key);
                self.attach_right(id, Some(child));
                inserted
            }
        };

        if inserted {
            (self.rebalance(id), true)
        } else {
            (id, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Tree;

    #[test]
    fn test_insert_ascending_stays_balanced() {
        let mut tree = Tree::new();
        for key in 1..=5 {
            assert!(tree.insert(key));
            tree.check_consistency();
        }
        assert_eq!(tree.len(), 5);
        assert!(tree.height() <= 3);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = Tree::new();
        assert!(tree.insert("b"));
        assert!(tree.insert("a"));
        assert!(!tree.insert("b"));
        assert!(!tree.insert("a"));
        assert_eq!(tree.len(), 2);
        tree.check_consistency();
    }
}
