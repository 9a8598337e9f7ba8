mod balance;
mod erase;
mod insert;
mod navigate;
mod node;

pub(crate) use node::{Link, NodeId};

use node::Arena;

/// An AVL tree of unique keys, stored in an arena.
///
/// All mutating operations keep the search order, the AVL condition, the
/// cached heights and the parent links consistent.
pub(crate) struct Tree<T> {
    nodes: Arena<T>,
    root: Link,
    num_nodes: usize,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            num_nodes: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            num_nodes: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn len(&self) -> usize {
        self.num_nodes
    }

    pub(crate) fn height(&self) -> usize {
        self.height_of(self.root)
    }

    pub(crate) fn key(&self, id: NodeId) -> &T {
        &self.nodes[id].key
    }

    pub(crate) fn node_height(&self, id: NodeId) -> usize {
        self.nodes[id].height
    }

    pub(crate) fn generation(&self, id: NodeId) -> u32 {
        self.nodes.generation(id)
    }

    pub(crate) fn resolve(&self, index: usize, generation: u32) -> Option<NodeId> {
        self.nodes.resolve(index, generation)
    }

    /// Frees every node in post-order.
    ///
    /// The walk follows parent links instead of using recursion or a stack:
    /// a leaf is detached from its parent and freed, then the walk resumes at
    /// the parent, which may have become a leaf itself.
    pub(crate) fn clear(&mut self) {
        log::debug!("clearing tree of {} nodes", self.num_nodes);
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            if let Some(left) = node.left {
                current = Some(left);
            } else if let Some(right) = node.right {
                current = Some(right);
            } else {
                let parent = node.parent;
                if let Some(parent) = parent {
                    let parent_node = &mut self.nodes[parent];
                    if parent_node.left == Some(id) {
                        parent_node.left = None;
                    } else {
                        parent_node.right = None;
                    }
                }
                self.nodes.free(id);
                current = parent;
            }
        }
        self.root = None;
        self.num_nodes = 0;
    }

    /// Moves all keys out of the tree in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<T> {
        let mut ids = Vec::with_capacity(self.num_nodes);
        self.inorder(|id| ids.push(id));
        let keys: Vec<T> = ids.into_iter().map(|id| self.nodes.free(id)).collect();
        self.root = None;
        self.num_nodes = 0;
        keys
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self)
    where
        T: Ord,
    {
        // Check root link
        if let Some(root) = self.root {
            assert!(self.nodes[root].parent.is_none());
        }

        // Check tree nodes
        let mut num_nodes = 0;
        self.preorder(|id| {
            let node = &self.nodes[id];
            let left_height = self.height_of(node.left);
            let right_height = self.height_of(node.right);

            // Check link for left child node
            if let Some(left) = node.left {
                assert!(self.nodes[left].parent == Some(id));
                assert!(self.nodes[left].key < node.key);
            }

            // Check link for right child node
            if let Some(right) = node.right {
                assert!(self.nodes[right].parent == Some(id));
                assert!(self.nodes[right].key > node.key);
            }

            // Check height
            assert_eq!(node.height, 1 + left_height.max(right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            num_nodes += 1;
        });

        // Check in-order sequence is strictly increasing
        let mut ordered = Vec::with_capacity(self.num_nodes);
        self.inorder(|id| ordered.push(id));
        for pair in ordered.windows(2) {
            assert!(self.nodes[pair[0]].key < self.nodes[pair[1]].key);
        }

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.nodes.num_occupied(), self.num_nodes);
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn preorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(f, |_| {});
    }

    fn inorder<F: FnMut(NodeId)>(&self, f: F) {
        self.traverse(|_| {}, f);
    }

    fn traverse<Pre, In>(&self, mut preorder: Pre, mut inorder: In)
    where
        Pre: FnMut(NodeId),
        In: FnMut(NodeId),
    {
        if let Some(mut id) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(id);
                        if let Some(left) = self.nodes[id].left {
                            id = left;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(id);
                        if let Some(right) = self.nodes[id].right {
                            id = right;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => match self.nodes[id].parent {
                        Some(parent) => {
                            if self.nodes[parent].left == Some(id) {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            id = parent;
                        }
                        None => break,
                    },
                }
            }
        }
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        log::debug!("cloning tree of {} nodes", self.num_nodes);
        let (nodes, root) = self.nodes.clone_subtree(self.root);
        Self {
            nodes,
            root,
            num_nodes: self.num_nodes,
        }
    }
}
