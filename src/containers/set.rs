//! Unique-key ordered set.

use crate::comparator::{Comparator, NaturalOrder};
use crate::tree::{Keys, RbTree};
use std::fmt;
use std::ops::Bound;

/// An ordered set of unique keys.
///
/// # Examples
///
/// ```rust
/// use ordtree::containers::TreeSet;
/// use std::ops::Bound;
///
/// let mut set = TreeSet::new();
/// assert!(set.insert(4));
/// assert!(set.insert(2));
/// assert!(!set.insert(4));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.lower_bound(&3), Some(&4));
/// assert_eq!(set.range(Bound::Unbounded, Bound::Excluded(&4)).collect::<Vec<_>>(), vec![&2]);
/// ```
#[derive(Clone)]
pub struct TreeSet<K, C = NaturalOrder> {
    tree: RbTree<K, (), C>,
}

impl<K: Ord> TreeSet<K> {
    /// Creates an empty set ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }
}

impl<K, C> TreeSet<K, C> {
    /// Creates an empty set ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    /// Returns the number of keys.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first().and_then(|id| self.tree.key(id).ok())
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last().and_then(|id| self.tree.key(id).ok())
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K, (), C> {
        self.tree.keys()
    }

    /// Returns the underlying tree.
    #[inline]
    #[must_use]
    pub const fn tree(&self) -> &RbTree<K, (), C> {
        &self.tree
    }
}

impl<K, C: Comparator<K>> TreeSet<K, C> {
    /// Adds `key`, returning `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.tree.contains_key(&key) {
            return false;
        }
        self.tree.insert(key, ());
        true
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Removes `key`, returning `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.delete_key(key).is_some()
    }

    /// Returns the smallest key not less than `key`.
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<&K> {
        self.tree
            .lower_bound(key)
            .and_then(|id| self.tree.key(id).ok())
    }

    /// Returns the smallest key greater than `key`.
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Option<&K> {
        self.tree
            .upper_bound(key)
            .and_then(|id| self.tree.key(id).ok())
    }

    /// Returns an iterator over the keys between two bounds.
    pub fn range(&self, lower: Bound<&K>, upper: Bound<&K>) -> impl DoubleEndedIterator<Item = &K> {
        self.tree.range(lower, upper).map(|(key, ())| key)
    }
}

impl<K: Ord> Default for TreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> Extend<K> for TreeSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for TreeSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, C> IntoIterator for TreeSet<K, C> {
    type Item = K;
    type IntoIter = std::iter::Map<crate::tree::IntoIter<K, ()>, fn((K, ())) -> K>;

    fn into_iter(self) -> Self::IntoIter {
        let project: fn((K, ())) -> K = |(key, ())| key;
        self.tree.into_iter().map(project)
    }
}

impl<'a, K, C> IntoIterator for &'a TreeSet<K, C> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, C> PartialEq for TreeSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C> Eq for TreeSet<K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for TreeSet<K, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}
