use super::{Link, NodeId, Tree};

impl<T> Tree<T> {
    pub(super) fn height_of(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(id) => self.nodes[id].height,
        }
    }

    pub(super) fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[id].height = height;
    }

    /// Height of the left subtree minus height of the right subtree.
    pub(super) fn balance_factor(&self, id: NodeId) -> isize {
        let node = &self.nodes[id];
        self.height_of(node.left) as isize - self.height_of(node.right) as isize
    }

    /// Makes `child` the left child of `id`.
    pub(super) fn attach_left(&mut self, id: NodeId, child: Link) {
        self.nodes[id].left = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(id);
        }
    }

    /// Makes `child` the right child of `id`.
    pub(super) fn attach_right(&mut self, id: NodeId, child: Link) {
        self.nodes[id].right = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(id);
        }
    }

    //   a            b
    //  / \          / \
    // x   b   ->   a   z
    //    / \      / \
    //   y   z    x   y
    //
    // Returns the new subtree root `b`, whose parent link takes over the one
    // of `a`. The caller rewires its own child link.
    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        log::trace!("rotate left at node {}", id.index());
        let Some(right) = self.nodes[id].right else {
            unreachable!("left rotation without right child");
        };
        let right_left = self.nodes[right].left;
        self.attach_right(id, right_left);

        self.nodes[right].parent = self.nodes[id].parent;
        self.attach_left(right, Some(id));

        self.update_height(id);
        self.update_height(right);
        right
    }

    //     a        b
    //    / \      / \
    //   b   z -> x   a
    //  / \          / \
    // x   y        y   z
    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        log::trace!("rotate right at node {}", id.index());
        let Some(left) = self.nodes[id].left else {
            unreachable!("right rotation without left child");
        };
        let left_right = self.nodes[left].right;
        self.attach_left(id, left_right);

        self.nodes[left].parent = self.nodes[id].parent;
        self.attach_right(left, Some(id));

        self.update_height(id);
        self.update_height(left);
        left
    }

    // Right rotation at the right child, then left rotation at the node itself.
    fn rotate_left_then_up(&mut self, id: NodeId) -> NodeId {
        if let Some(right) = self.nodes[id].right {
            let new_right = self.rotate_right(right);
            self.attach_right(id, Some(new_right));
        }
        self.rotate_left(id)
    }

    // Left rotation at the left child, then right rotation at the node itself.
    fn rotate_right_then_up(&mut self, id: NodeId) -> NodeId {
        if let Some(left) = self.nodes[id].left {
            let new_left = self.rotate_left(left);
            self.attach_left(id, Some(new_left));
        }
        self.rotate_right(id)
    }

    /// Adjusts the height of `id` and restores the AVL condition there if necessary.
    /// Returns the root of the subtree formerly rooted at `id`.
    ///
    /// The balance factor may not exceed +2 or -2, which always holds after a
    /// single insert or remove below `id`. The heavy child then has a balance
    /// factor of -1, 0 or +1.
    pub(super) fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance_factor(id);
        debug_assert!((-2..=2).contains(&balance));
        match balance {
            -2 => {
                let Some(right) = self.nodes[id].right else {
                    unreachable!("right-heavy node without right child");
                };
                match self.balance_factor(right) {
                    0 | -1 => self.rotate_left(id),
                    1 => self.rotate_left_then_up(id),
                    other => unreachable!("right child out of balance: {other}"),
                }
            }
            2 => {
                let Some(left) = self.nodes[id].left else {
                    unreachable!("left-heavy node without left child");
                };
                match self.balance_factor(left) {
                    0 | 1 => self.rotate_right(id),
                    -1 => self.rotate_right_then_up(id),
                    other => unreachable!("left child out of balance: {other}"),
                }
            }
            _ => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Tree;

    fn root_key(tree: &Tree<i32>) -> i32 {
        *tree.key(tree.root.unwrap())
    }

    #[test]
    fn test_single_rotations() {
        // 1 ->    2
        //  \     / \
        //   2   1   3
        //    \
        //     3
        let mut tree = Tree::new();
        for key in [1, 2, 3] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), 2);
        assert_eq!(tree.height(), 2);

        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let mut tree = Tree::new();
        for key in [3, 2, 1] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), 2);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_double_rotations() {
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let mut tree = Tree::new();
        for key in [1, 3, 2] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), 2);

        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut tree = Tree::new();
        for key in [3, 1, 2] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), 2);
    }

    #[test]
    fn test_balance_factor() {
        let mut tree = Tree::new();
        tree.insert(2);
        let root = tree.root.unwrap();
        assert_eq!(tree.balance_factor(root), 0);
        tree.insert(1);
        assert_eq!(tree.balance_factor(root), 1);
        tree.insert(3);
        assert_eq!(tree.balance_factor(root), 0);
        tree.insert(4);
        assert_eq!(tree.balance_factor(root), -1);
        assert_eq!(tree.height_of(None), 0);
        assert_eq!(tree.height_of(Some(root)), 3);
    }
}
