//! An ordered set implemented with an AVL tree.
//!
//! Nodes are kept in an arena and addressed by index, so the tree needs no
//! `unsafe` code for its parent links. Every insert and remove keeps the tree
//! height-balanced, giving `O(log n)` lookups, insertions and removals.
//!
//! ```
//! use avl_set::AvlTreeSet;
//!
//! let mut set: AvlTreeSet<_> = [5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
//! assert_eq!(set.len(), 9);
//! assert!(!set.contains(&10));
//!
//! set.remove(&5);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 6, 7, 8, 9]);
//! ```

mod error;
mod set;
#[cfg(feature = "serde")]
mod serde_impl;
mod tree;

pub use error::{Error, Result};
pub use set::{AvlTreeSet, Handle, IntoIter, Iter};
