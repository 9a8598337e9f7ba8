//! An ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::vec;

use crate::error::{Error, Result};
use crate::tree::{Link, NodeId, Tree};

/// An ordered set implemented with an AVL tree.
///
/// ```
/// use avl_set::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// set.insert(0);
/// set.insert(1);
/// set.insert(2);
/// assert!(set.contains(&1));
/// set.remove(&1);
/// assert!(!set.contains(&1));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [0, 2]);
/// ```
///
/// Besides iterators, elements can be visited one step at a time through
/// [`Handle`]s:
///
/// ```
/// use avl_set::AvlTreeSet;
/// let set: AvlTreeSet<_> = [3, 1, 2].into_iter().collect();
/// let mut keys = Vec::new();
/// let mut current = set.first_handle();
/// while let Some(handle) = current {
///     keys.push(*set.key(handle)?);
///     current = set.successor(handle)?;
/// }
/// assert_eq!(keys, [1, 2, 3]);
/// # Ok::<(), avl_set::Error>(())
/// ```
#[derive(Clone)]
pub struct AvlTreeSet<T> {
    tree: Tree<T>,
}

/// A position of an element in a set.
///
/// A handle stays valid until its element is removed, until the element is
/// moved into the place of a removed in-order neighbour, or until the set is
/// cleared. Rotations caused by other insertions and removals do not
/// invalidate it. An invalidated handle is reported as
/// [`Error::StaleHandle`]. Using a handle with a set other than the one it was
/// obtained from gives unspecified results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

/// An iterator over the values of a set.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    front: Link,
    back: Link,
    remaining: usize,
}

/// An owning iterator over the values of a set.
pub struct IntoIter<T> {
    keys: vec::IntoIter<T>,
}

impl<T: Ord> AvlTreeSet<T> {
    /// Creates an empty set.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Creates an empty set with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Inserts a value into the set.
    /// Returns false if the value was already present; the set is left unchanged then.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value).is_some()
    }

    /// Removes a value from the set.
    /// Returns the value if it was previously in the set.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    /// Returns true if the set contains a value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(value).is_some()
    }

    /// Returns a reference to the value in the set that is equal to the given value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(value).map(|id| self.tree.key(id))
    }

    /// Returns a handle to the value in the set that is equal to the given value.
    pub fn find<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(value).map(|id| self.handle(id))
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency()
    }
}

impl<T> AvlTreeSet<T> {
    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the height of the underlying tree, 0 for an empty set.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Clears the set, deallocating all nodes.
    /// All handles obtained before become stale.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator over the values of the set in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.tree,
            front: self.tree.first(),
            back: self.tree.last(),
            remaining: self.tree.len(),
        }
    }

    /// Returns the smallest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|id| self.tree.key(id))
    }

    /// Returns the greatest value in the set.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|id| self.tree.key(id))
    }

    /// Returns a handle to the smallest value in the set.
    pub fn first_handle(&self) -> Option<Handle> {
        self.tree.first().map(|id| self.handle(id))
    }

    /// Returns a handle to the greatest value in the set.
    pub fn last_handle(&self) -> Option<Handle> {
        self.tree.last().map(|id| self.handle(id))
    }

    /// Returns a handle to the next greater value, or `None` past the greatest value.
    pub fn successor(&self, handle: Handle) -> Result<Option<Handle>> {
        let id = self.resolve(handle)?;
        Ok(self.tree.next(id).map(|next| self.handle(next)))
    }

    /// Returns a handle to the next smaller value, or `None` before the smallest value.
    pub fn predecessor(&self, handle: Handle) -> Result<Option<Handle>> {
        let id = self.resolve(handle)?;
        Ok(self.tree.prev(id).map(|prev| self.handle(prev)))
    }

    /// Returns the value a handle refers to.
    pub fn key(&self, handle: Handle) -> Result<&T> {
        let id = self.resolve(handle)?;
        Ok(self.tree.key(id))
    }

    /// Returns the height of the subtree rooted at the node a handle refers to.
    /// Leaves have height 1.
    pub fn node_height(&self, handle: Handle) -> Result<usize> {
        let id = self.resolve(handle)?;
        Ok(self.tree.node_height(id))
    }

    fn handle(&self, id: NodeId) -> Handle {
        Handle {
            index: id.index(),
            generation: self.tree.generation(id),
        }
    }

    fn resolve(&self, handle: Handle) -> Result<NodeId> {
        self.tree
            .resolve(handle.index, handle.generation)
            .ok_or(Error::StaleHandle(handle))
    }
}

impl<T: Ord> Default for AvlTreeSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for AvlTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTreeSet<T> {}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            keys: self.tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<'a, T> Extend<&'a T> for AvlTreeSet<T>
where
    T: Ord + Copy,
    T: 'a,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.next(id);
        self.remaining -= 1;
        Some(self.tree.key(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.prev(id);
        self.remaining -= 1;
        Some(self.tree.key(id))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.keys.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
