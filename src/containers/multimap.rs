//! Ordered map permitting duplicate keys.

use super::{delete_all_equal, first_equal};
use crate::comparator::{Comparator, NaturalOrder};
use crate::tree::{IntoIter, Iter, Keys, NodeId, Range, RbTree, Values};
use std::fmt;
use std::ops::Bound;

/// An ordered map that keeps every inserted entry.
///
/// Values under equal keys are kept in insertion order.
///
/// # Examples
///
/// ```rust
/// use ordtree::containers::TreeMultiMap;
///
/// let mut schedule = TreeMultiMap::new();
/// schedule.insert(9, "standup");
/// schedule.insert(14, "review");
/// schedule.insert(9, "coffee");
///
/// assert_eq!(schedule.count(&9), 2);
/// assert_eq!(schedule.get(&9), Some(&"standup"));
/// assert_eq!(schedule.get_all(&9).copied().collect::<Vec<_>>(), vec!["standup", "coffee"]);
///
/// assert_eq!(schedule.remove_all(&9), 2);
/// assert_eq!(schedule.len(), 1);
/// ```
#[derive(Clone)]
pub struct TreeMultiMap<K, V, C = NaturalOrder> {
    tree: RbTree<K, V, C>,
}

impl<K: Ord, V> TreeMultiMap<K, V> {
    /// Creates an empty multi-map ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }
}

impl<K, V, C> TreeMultiMap<K, V, C> {
    /// Creates an empty multi-map ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    /// Returns the number of entries, duplicates included.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multi-map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the first entry in order.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().and_then(|id| self.tree.entry(id).ok())
    }

    /// Returns the last entry in order.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().and_then(|id| self.tree.entry(id).ok())
    }

    /// Returns an iterator over entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns an iterator over keys, one per entry.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        self.tree.keys()
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C> {
        self.tree.values()
    }

    /// Visits entries in ascending key order until `visitor` returns `false`.
    pub fn traversal<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.tree.traversal(visitor);
    }

    /// Returns the underlying tree.
    #[inline]
    #[must_use]
    pub const fn tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }
}

impl<K, V, C: Comparator<K>> TreeMultiMap<K, V, C> {
    /// Inserts an entry after any existing entries with an equal key.
    pub fn insert(&mut self, key: K, value: V) -> NodeId {
        self.tree.insert(key, value)
    }

    /// Returns the earliest-inserted value under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        first_equal(&self.tree, key).and_then(|id| self.tree.value(id).ok())
    }

    /// Returns every value under `key` in insertion order.
    pub fn get_all(&self, key: &K) -> impl DoubleEndedIterator<Item = &V> {
        self.equal_range(key).map(|(_, value)| value)
    }

    /// Returns the entries whose key equals `key`.
    #[must_use]
    pub fn equal_range(&self, key: &K) -> Range<'_, K, V, C> {
        self.tree.range(Bound::Included(key), Bound::Included(key))
    }

    /// Returns the number of entries under `key`.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.equal_range(key).count()
    }

    /// Returns `true` if at least one entry has key `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Removes the earliest-inserted entry under `key`, returning its value.
    pub fn remove_one(&mut self, key: &K) -> Option<V> {
        let id = first_equal(&self.tree, key)?;
        self.tree.delete(id).map(|(_, value)| value)
    }

    /// Removes every entry under `key`, returning how many were removed.
    pub fn remove_all(&mut self, key: &K) -> usize {
        delete_all_equal(&mut self.tree, key)
    }

    /// Returns the first entry whose key is not less than `key`.
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.tree
            .lower_bound(key)
            .and_then(|id| self.tree.entry(id).ok())
    }

    /// Returns the first entry whose key is greater than `key`.
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Option<(&K, &V)> {
        self.tree
            .upper_bound(key)
            .and_then(|id| self.tree.entry(id).ok())
    }

    /// Returns an iterator over the entries between two bounds.
    #[must_use]
    pub fn range(&self, lower: Bound<&K>, upper: Bound<&K>) -> Range<'_, K, V, C> {
        self.tree.range(lower, upper)
    }
}

impl<K: Ord, V> Default for TreeMultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMultiMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K, V, C> IntoIterator for TreeMultiMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMultiMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMultiMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMultiMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMultiMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> TreeMultiMap<i32, &'static str> {
        [(2, "b1"), (1, "a"), (2, "b2"), (3, "c"), (2, "b3")]
            .into_iter()
            .collect()
    }

    #[rstest]
    fn test_duplicates_in_insertion_order() {
        let map = sample();
        assert_eq!(map.len(), 5);
        assert_eq!(map.get_all(&2).copied().collect::<Vec<_>>(), vec!["b1", "b2", "b3"]);
        assert_eq!(map.get_all(&2).rev().next(), Some(&"b3"));
        assert_eq!(map.get(&2), Some(&"b1"));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 3)]
    #[case(4, 0)]
    fn test_count(#[case] key: i32, #[case] expected: usize) {
        assert_eq!(sample().count(&key), expected);
    }

    #[rstest]
    fn test_remove_one_takes_earliest() {
        let mut map = sample();
        assert_eq!(map.remove_one(&2), Some("b1"));
        assert_eq!(map.remove_one(&2), Some("b2"));
        assert_eq!(map.get_all(&2).copied().collect::<Vec<_>>(), vec!["b3"]);
        assert_eq!(map.remove_one(&7), None);
        assert_eq!(map.tree().validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_all() {
        let mut map = sample();
        assert_eq!(map.remove_all(&2), 3);
        assert_eq!(map.remove_all(&2), 0);
        assert!(!map.contains_key(&2));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(map.tree().validate(), Ok(()));
    }

    #[rstest]
    fn test_bounds_skip_duplicates() {
        let map = sample();
        assert_eq!(map.lower_bound(&2), Some((&2, &"b1")));
        assert_eq!(map.upper_bound(&2), Some((&3, &"c")));
        assert_eq!(map.first(), Some((&1, &"a")));
        assert_eq!(map.last(), Some((&3, &"c")));
    }
}
