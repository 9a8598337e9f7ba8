use std::borrow::Borrow;
use std::cmp::Ordering;

use super::{Link, NodeId, Tree};

impl<T: Ord> Tree<T> {
    /// Removes a key and returns it if it was present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = self.remove_below(self.root, key);
        self.root = root;
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    // Removes `key` from the subtree at `link`.
    // Returns the new subtree root and the removed key, if any.
    fn remove_below<Q>(&mut self, link: Link, key: &Q) -> (Link, Option<T>)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(id) = link else {
            return (None, None);
        };

        let removed = match key.cmp(self.nodes[id].key.borrow()) {
            Ordering::Equal => return self.remove_node(id, key),
            Ordering::Less => {
                let (child, removed) = self.remove_below(self.nodes[id].left, key);
                self.attach_left(id, child);
                removed
            }
            Ordering::Greater => {
                let (child, removed) = self.remove_below(self.nodes[id].right, key);
                self.attach_right(id, child);
                removed
            }
        };

        match removed {
            Some(_) => (Some(self.rebalance(id)), removed),
            None => (Some(id), None),
        }
    }

    // Removes the node `id`, which holds `key`.
    //
    // A leaf is freed directly. Otherwise the key of the predecessor or the
    // successor is swapped into `id` and `key`, now held by that neighbour,
    // is removed from the corresponding subtree.
    fn remove_node<Q>(&mut self, id: NodeId, key: &Q) -> (Link, Option<T>)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        let left_distance = self.left_distance(id);
        let right_distance = self.right_distance(id);
        let use_predecessor =
            (left_distance <= right_distance && left_distance != 0) || right_distance == 0;

        let removed = match (left, right) {
            (None, None) => return (None, Some(self.nodes.free(id))),
            (Some(left), _) if use_predecessor => {
                let predecessor = self.rightmost(left);
                self.nodes.swap_keys(id, predecessor);
                let (child, removed) = self.remove_below(Some(left), key);
                self.attach_left(id, child);
                removed
            }
            (_, Some(right)) => {
                let successor = self.leftmost(right);
                self.nodes.swap_keys(id, successor);
                let (child, removed) = self.remove_below(Some(right), key);
                self.attach_right(id, child);
                removed
            }
            (Some(_), None) => unreachable!("node without right subtree must use its predecessor"),
        };
        debug_assert!(removed.is_some());

        (Some(self.rebalance(id)), removed)
    }

    // 0 without a left subtree, else 1 + length of the right spine starting at `id`.
    fn left_distance(&self, id: NodeId) -> usize {
        if self.nodes[id].left.is_none() {
            return 0;
        }
        let mut distance = 1;
        let mut current = id;
        while let Some(right) = self.nodes[current].right {
            current = right;
            distance += 1;
        }
        distance
    }

    // 0 without a right subtree, else 1 + length of the left spine starting at `id`.
    fn right_distance(&self, id: NodeId) -> usize {
        if self.nodes[id].right.is_none() {
            return 0;
        }
        let mut distance = 1;
        let mut current = id;
        while let Some(left) = self.nodes[current].left {
            current = left;
            distance += 1;
        }
        distance
    }
}
