//! Ordered associative containers built on [`RbTree`].
//!
//! Each container wraps exactly one tree and delegates all balancing to it.
//! What differs is the duplicate-key policy:
//!
//! | Container        | Entries   | Duplicate keys                         |
//! |------------------|-----------|----------------------------------------|
//! | [`TreeMap`]      | key/value | rejected; `insert` updates in place    |
//! | [`TreeMultiMap`] | key/value | kept, in insertion order               |
//! | [`TreeSet`]      | key       | rejected; `insert` reports `false`     |
//! | [`TreeMultiSet`] | key       | kept                                   |
//!
//! # Examples
//!
//! ```rust
//! use ordtree::containers::{TreeMap, TreeMultiSet};
//!
//! let mut scores = TreeMap::new();
//! scores.insert("bob", 3);
//! scores.insert("alice", 5);
//! assert_eq!(scores.insert("bob", 4), Some(3));
//! assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec!["alice", "bob"]);
//!
//! let mut rolls: TreeMultiSet<u8> = [3, 6, 3, 1].into_iter().collect();
//! assert_eq!(rolls.count(&3), 2);
//! assert!(rolls.remove_one(&3));
//! assert_eq!(rolls.count(&3), 1);
//! ```

mod map;
mod multimap;
mod multiset;
mod set;

pub use map::TreeMap;
pub use multimap::TreeMultiMap;
pub use multiset::TreeMultiSet;
pub use set::TreeSet;

use crate::comparator::Comparator;
use crate::tree::{NodeId, RbTree};
use std::cmp::Ordering;

/// The first node, in order, whose key equals `key`.
fn first_equal<K, V, C: Comparator<K>>(tree: &RbTree<K, V, C>, key: &K) -> Option<NodeId> {
    tree.lower_bound(key).filter(|&id| {
        tree.key(id)
            .is_ok_and(|found| tree.comparator().compare(found, key) == Ordering::Equal)
    })
}

/// Deletes every node whose key equals `key`, returning how many went.
fn delete_all_equal<K, V, C: Comparator<K>>(tree: &mut RbTree<K, V, C>, key: &K) -> usize {
    let mut removed = 0;
    while let Some(id) = first_equal(tree, key) {
        tree.delete(id);
        removed += 1;
    }
    removed
}

static_assertions::assert_impl_all!(TreeMap<String, i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(TreeSet<u64>: Send, Sync, Clone, Default);
