use std::mem;
use std::ops::{Index, IndexMut};

/// Index of an occupied slot in the node arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(usize);

pub(crate) type Link = Option<NodeId>;

pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
    pub(crate) height: usize,
}

enum Slot<T> {
    Occupied(Node<T>),
    // Vacant slots form a singly linked free list.
    Vacant { next_free: Option<usize> },
}

struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

/// Storage for tree nodes.
///
/// Nodes are addressed by index. Freed slots are chained into a free list and
/// reused by later allocations. Every slot carries a generation that is bumped
/// when the slot is freed, so stale handles can be told apart from live ones.
pub(crate) struct Arena<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<usize>,
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl<T> Node<T> {
    fn new(key: T, parent: Link) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
            height: 1,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    /// Creates a childless node of height 1 and returns its id.
    pub(crate) fn alloc(&mut self, key: T, parent: Link) -> NodeId {
        let node = Node::new(key, parent);
        match self.free_head {
            Some(index) => {
                let entry = &mut self.entries[index];
                match entry.slot {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot {index}"),
                }
                entry.slot = Slot::Occupied(node);
                NodeId(index)
            }
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    slot: Slot::Occupied(node),
                });
                NodeId(self.entries.len() - 1)
            }
        }
    }

    /// Vacates the slot of `id` and returns the key it held.
    /// The node's links are dropped; callers must have detached it already.
    pub(crate) fn free(&mut self, id: NodeId) -> T {
        let entry = &mut self.entries[id.0];
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut entry.slot, vacant) {
            Slot::Occupied(node) => {
                entry.generation = entry.generation.wrapping_add(1);
                self.free_head = Some(id.0);
                node.key
            }
            Slot::Vacant { .. } => unreachable!("double free of node slot {}", id.0),
        }
    }

    /// Swaps the keys held by two occupied slots, leaving all links in place.
    /// Both slots get a new generation, as neither holds its former key anymore.
    pub(crate) fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.entries.split_at_mut(high);
        let (x, y) = (&mut head[low], &mut tail[0]);
        match (&mut x.slot, &mut y.slot) {
            (Slot::Occupied(x), Slot::Occupied(y)) => mem::swap(&mut x.key, &mut y.key),
            _ => unreachable!("key swap involves a vacant slot"),
        }
        x.generation = x.generation.wrapping_add(1);
        y.generation = y.generation.wrapping_add(1);
    }

    pub(crate) fn generation(&self, id: NodeId) -> u32 {
        self.entries[id.0].generation
    }

    /// Returns the id at `index` if that slot is occupied with the given generation.
    pub(crate) fn resolve(&self, index: usize, generation: u32) -> Option<NodeId> {
        match self.entries.get(index) {
            Some(Entry {
                generation: current,
                slot: Slot::Occupied(_),
            }) if *current == generation => Some(NodeId(index)),
            _ => None,
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn num_occupied(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.slot, Slot::Occupied(_)))
            .count()
    }

    /// Deep-clones the subtree below `root` into a fresh, compact arena.
    /// Uses an explicit stack, so the depth of the subtree does not matter.
    pub(crate) fn clone_subtree(&self, root: Link) -> (Arena<T>, Link)
    where
        T: Clone,
    {
        let mut copy = Arena::with_capacity(self.entries.len());
        let Some(root) = root else {
            return (copy, None);
        };

        let new_root = copy.alloc(self[root].key.clone(), None);
        let mut stack = vec![(root, new_root)];
        while let Some((source, target)) = stack.pop() {
            let (left, right, height) = {
                let node = &self[source];
                (node.left, node.right, node.height)
            };
            copy[target].height = height;
            if let Some(left) = left {
                let new_left = copy.alloc(self[left].key.clone(), Some(target));
                copy[target].left = Some(new_left);
                stack.push((left, new_left));
            }
            if let Some(right) = right {
                let new_right = copy.alloc(self[right].key.clone(), Some(target));
                copy[target].right = Some(new_right);
                stack.push((right, new_right));
            }
        }
        (copy, Some(new_root))
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match &self.entries[id.0].slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("access to vacant node slot {}", id.0),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.entries[id.0].slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("access to vacant node slot {}", id.0),
        }
    }
}
