use std::borrow::Borrow;
use std::cmp::Ordering;

use super::{Link, NodeId, Tree};

impl<T> Tree<T> {
    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.leftmost(root))
    }

    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.rightmost(root))
    }

    pub(super) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    pub(super) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// Returns the in-order successor of `id`, or `None` if `id` holds the greatest key.
    pub(crate) fn next(&self, id: NodeId) -> Link {
        if let Some(right) = self.nodes[id].right {
            return Some(self.leftmost(right));
        }
        // Walk up while coming from a right child.
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].left == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Returns the in-order predecessor of `id`, or `None` if `id` holds the smallest key.
    pub(crate) fn prev(&self, id: NodeId) -> Link {
        if let Some(left) = self.nodes[id].left {
            return Some(self.rightmost(left));
        }
        // Walk up while coming from a left child.
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].right == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::super::Tree;

    #[test]
    fn test_step_forward_and_backward() {
        let mut tree = Tree::new();
        for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            tree.insert(key);
        }

        let mut forward = Vec::new();
        let mut current = tree.first();
        while let Some(id) = current {
            forward.push(*tree.key(id));
            current = tree.next(id);
        }
        assert_eq!(forward, (1..=9).collect::<Vec<_>>());

        let mut backward = Vec::new();
        let mut current = tree.last();
        while let Some(id) = current {
            backward.push(*tree.key(id));
            current = tree.prev(id);
        }
        assert_eq!(backward, (1..=9).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_find() {
        let mut tree = Tree::new();
        assert!(tree.first().is_none());
        assert!(tree.last().is_none());
        assert!(tree.find(&1).is_none());

        for key in 0..32 {
            tree.insert(key * 2);
        }
        for key in 0..32 {
            let id = tree.find(&(key * 2)).unwrap();
            assert_eq!(*tree.key(id), key * 2);
            assert!(tree.find(&(key * 2 + 1)).is_none());
        }
        assert_eq!(*tree.key(tree.first().unwrap()), 0);
        assert_eq!(*tree.key(tree.last().unwrap()), 62);
    }
}
