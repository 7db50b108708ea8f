//! Unique-key ordered map.

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::TreeError;
use crate::tree::{Cursor, IntoIter, Iter, Keys, Range, RbTree, Values, ValuesMut};
use std::fmt;
use std::ops::Bound;

/// An ordered map with unique keys.
///
/// Inserting a key that is already present replaces its value in place, so
/// the node (and any [`NodeId`](crate::NodeId) naming it) survives.
///
/// # Time Complexity
///
/// | Operation                  | Complexity |
/// |----------------------------|------------|
/// | `insert`                   | O(log N)   |
/// | `get`/`contains_key`       | O(log N)   |
/// | `remove`                   | O(log N)   |
/// | `lower_bound`/`upper_bound`| O(log N)   |
/// | `len`                      | O(1)       |
///
/// # Examples
///
/// ```rust
/// use ordtree::containers::TreeMap;
///
/// let mut map = TreeMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// assert_eq!(map.get(&2), Some(&"two"));
/// assert_eq!(map.first(), Some((&1, &"one")));
/// assert_eq!(map.lower_bound(&0), Some((&1, &"one")));
/// assert_eq!(map.upper_bound(&3), None);
/// ```
#[derive(Clone)]
pub struct TreeMap<K, V, C = NaturalOrder> {
    tree: RbTree<K, V, C>,
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty map ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().and_then(|id| self.tree.entry(id).ok())
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().and_then(|id| self.tree.entry(id).ok())
    }

    /// Returns an iterator over entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        self.tree.keys()
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C> {
        self.tree.values()
    }

    /// Returns a mutable iterator over values in ascending key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        self.tree.values_mut()
    }

    /// Visits entries in ascending key order until `visitor` returns `false`.
    pub fn traversal<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.tree.traversal(visitor);
    }

    /// Returns a cursor at the smallest entry.
    #[must_use]
    pub fn cursor_first(&self) -> Cursor<'_, K, V, C> {
        self.tree.cursor_first()
    }

    /// Returns a cursor at the largest entry.
    #[must_use]
    pub fn cursor_last(&self) -> Cursor<'_, K, V, C> {
        self.tree.cursor_last()
    }

    /// Returns the underlying tree.
    #[inline]
    #[must_use]
    pub const fn tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Inserts `value` under `key`.
    ///
    /// Returns the previous value if the key was present; the key itself is
    /// not replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::containers::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert("key", 1), None);
    /// assert_eq!(map.insert("key", 2), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.find(&key) {
            Some(id) => self.tree.set_value(id, value).ok(),
            None => {
                self.tree.insert(key, value);
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.delete_key(key)
    }

    /// Applies `update` to the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if `key` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::TreeError;
    /// use ordtree::containers::TreeMap;
    ///
    /// let mut counters = TreeMap::new();
    /// counters.insert("hits", 1);
    ///
    /// assert_eq!(counters.try_update(&"hits", |count| *count += 1), Ok(()));
    /// assert_eq!(counters.get(&"hits"), Some(&2));
    /// assert_eq!(counters.try_update(&"misses", |count| *count += 1), Err(TreeError::NotFound));
    /// ```
    pub fn try_update<F, R>(&mut self, key: &K, update: F) -> Result<R, TreeError>
    where
        F: FnOnce(&mut V) -> R,
    {
        let id = self.tree.find(key).ok_or(TreeError::NotFound)?;
        let value = self.tree.value_mut(id)?;
        Ok(update(value))
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::containers::TreeMap;
    /// use std::ops::Bound;
    ///
    /// let map: TreeMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')].into_iter().collect();
    /// let middle: String = map
    ///     .range(Bound::Excluded(&1), Bound::Included(&3))
    ///     .map(|(_, value)| *value)
    ///     .collect();
    /// assert_eq!(middle, "bc");
    /// ```
    #[must_use]
    pub fn range(&self, lower: Bound<&K>, upper: Bound<&K>) -> Range<'_, K, V, C> {
        self.tree.range(lower, upper)
    }

    /// Returns a cursor at the first entry whose key is not less than `key`.
    #[must_use]
    pub fn cursor_lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor_lower_bound(key)
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    /// Later entries overwrite earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}
