//! Ordered multi-set.

use super::{delete_all_equal, first_equal};
use crate::comparator::{Comparator, NaturalOrder};
use crate::tree::{Keys, RbTree};
use std::fmt;
use std::ops::Bound;

/// An ordered collection of keys that keeps duplicates.
///
/// # Examples
///
/// ```rust
/// use ordtree::containers::TreeMultiSet;
///
/// let mut words: TreeMultiSet<&str> = "to be or not to be".split(' ').collect();
/// assert_eq!(words.len(), 6);
/// assert_eq!(words.count(&"to"), 2);
///
/// assert_eq!(words.remove_all(&"be"), 2);
/// assert_eq!(words.iter().copied().collect::<Vec<_>>(), vec!["not", "or", "to", "to"]);
/// ```
#[derive(Clone)]
pub struct TreeMultiSet<K, C = NaturalOrder> {
    tree: RbTree<K, (), C>,
}

impl<K: Ord> TreeMultiSet<K> {
    /// Creates an empty multi-set ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }
}

impl<K, C> TreeMultiSet<K, C> {
    /// Creates an empty multi-set ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    /// Returns the number of keys, duplicates included.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multi-set is empty.
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

    /// Returns an iterator over keys in ascending order, duplicates repeated.
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

impl<K, C: Comparator<K>> TreeMultiSet<K, C> {
    /// Adds one occurrence of `key`.
    pub fn insert(&mut self, key: K) {
        self.tree.insert(key, ());
    }

    /// Returns the number of occurrences of `key`.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.tree
            .range(Bound::Included(key), Bound::Included(key))
            .count()
    }

    /// Returns `true` if `key` occurs at least once.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Removes one occurrence of `key`, returning `true` if there was one.
    pub fn remove_one(&mut self, key: &K) -> bool {
        first_equal(&self.tree, key).is_some_and(|id| self.tree.delete(id).is_some())
    }

    /// Removes every occurrence of `key`, returning how many were removed.
    pub fn remove_all(&mut self, key: &K) -> usize {
        delete_all_equal(&mut self.tree, key)
    }

    /// Returns the first key not less than `key`.
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<&K> {
        self.tree
            .lower_bound(key)
            .and_then(|id| self.tree.key(id).ok())
    }

    /// Returns the first key greater than `key`.
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

impl<K: Ord> Default for TreeMultiSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> Extend<K> for TreeMultiSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.tree.extend(iter.into_iter().map(|key| (key, ())));
    }
}

impl<K: Ord> FromIterator<K> for TreeMultiSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, K, C> IntoIterator for &'a TreeMultiSet<K, C> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, C> PartialEq for TreeMultiSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C> Eq for TreeMultiSet<K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for TreeMultiSet<K, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
