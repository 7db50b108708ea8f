//! Standard iterators over an [`RbTree`], all in ascending key order.

use super::{NodeId, RbTree};
use crate::comparator::{Comparator, NaturalOrder};
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::Bound;

// =============================================================================
// Iterator Definitions
// =============================================================================

/// An iterator over entries in ascending key order.
///
/// Walks the tree through successor/predecessor links; no snapshot is taken.
pub struct Iter<'a, K, V, C = NaturalOrder> {
    tree: &'a RbTree<K, V, C>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

/// An iterator over keys in ascending order.
pub struct Keys<'a, K, V, C = NaturalOrder> {
    inner: Iter<'a, K, V, C>,
}

/// An iterator over values in ascending key order.
pub struct Values<'a, K, V, C = NaturalOrder> {
    inner: Iter<'a, K, V, C>,
}

/// A mutable iterator over values in ascending key order.
pub struct ValuesMut<'a, V> {
    inner: std::vec::IntoIter<&'a mut V>,
}

/// An iterator over the entries between two bounds.
pub struct Range<'a, K, V, C = NaturalOrder> {
    tree: &'a RbTree<K, V, C>,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

/// An owning iterator over entries in ascending key order.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<(K, V)>,
}

// =============================================================================
// RbTree Iteration Methods
// =============================================================================

impl<K, V, C> RbTree<K, V, C> {
    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// let forward: Vec<(&i32, &char)> = tree.iter().collect();
    /// assert_eq!(forward, vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    ///
    /// let backward: Vec<&i32> = tree.iter().rev().map(|(key, _)| key).collect();
    /// assert_eq!(backward, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: self,
            front: self.first(),
            back: self.last(),
            remaining: self.length,
        }
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Returns a mutable iterator over values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let mut tree: RbTree<i32, i32> = (1..=3).map(|key| (key, key)).collect();
    /// for value in tree.values_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(tree.values().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        let order = self.in_order_ids();
        let mut by_slot = self.nodes.values_mut_by_slot();
        let in_order: Vec<&mut V> = order
            .into_iter()
            .filter_map(|id| by_slot.get_mut(id.index()).and_then(Option::take))
            .collect();
        ValuesMut {
            inner: in_order.into_iter(),
        }
    }
}

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Returns an iterator over the entries whose keys lie between `lower`
    /// and `upper`.
    ///
    /// The start is located with [`lower_bound`](Self::lower_bound) or
    /// [`upper_bound`](Self::upper_bound) depending on whether `lower` is
    /// inclusive, and likewise for the end. An inverted range is empty.
    ///
    /// # Complexity
    ///
    /// O(log N + k) where k is the number of entries yielded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    /// use std::ops::Bound;
    ///
    /// let tree: RbTree<i32, ()> = (1..=9).map(|key| (key, ())).collect();
    ///
    /// let keys: Vec<i32> = tree
    ///     .range(Bound::Included(&3), Bound::Excluded(&6))
    ///     .map(|(key, _)| *key)
    ///     .collect();
    /// assert_eq!(keys, vec![3, 4, 5]);
    ///
    /// assert_eq!(tree.range(Bound::Excluded(&8), Bound::Unbounded).count(), 1);
    /// assert_eq!(tree.range(Bound::Included(&6), Bound::Included(&2)).count(), 0);
    /// ```
    #[must_use]
    pub fn range(&self, lower: Bound<&K>, upper: Bound<&K>) -> Range<'_, K, V, C> {
        let start = match lower {
            Bound::Included(key) => self.lower_bound(key),
            Bound::Excluded(key) => self.upper_bound(key),
            Bound::Unbounded => self.first(),
        };
        // First node past the range.
        let stop = match upper {
            Bound::Included(key) => self.upper_bound(key),
            Bound::Excluded(key) => self.lower_bound(key),
            Bound::Unbounded => None,
        };

        let empty = match (start, stop) {
            (None, _) => true,
            (Some(start), Some(stop)) => {
                self.comparator
                    .compare(&self.nodes[start].key, &self.nodes[stop].key)
                    != Ordering::Less
            }
            (Some(_), None) => false,
        };

        if empty {
            return Range {
                tree: self,
                front: None,
                back: None,
            };
        }

        let back = stop.map_or_else(|| self.last(), |stop| self.predecessor(stop));
        Range {
            tree: self,
            front: start,
            back,
        }
    }
}

impl<K, V, C> IntoIterator for RbTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order_ids();
        let mut slots = self.nodes.into_slots();
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|id| slots.get_mut(id.index()).and_then(Option::take))
            .map(|node| (node.key, node.value))
            .collect();
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterator Implementations
// =============================================================================

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.successor(id);
        self.remaining -= 1;
        let node = &self.tree.nodes[id];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.predecessor(id);
        self.remaining -= 1;
        let node = &self.tree.nodes[id];
        Some((&node.key, &node.value))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for ValuesMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}

impl<'a, K, V, C> Iterator for Range<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.successor(id);
        }
        let node = &self.tree.nodes[id];
        Some((&node.key, &node.value))
    }
}

impl<K, V, C> DoubleEndedIterator for Range<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.predecessor(id);
        }
        let node = &self.tree.nodes[id];
        Some((&node.key, &node.value))
    }
}

impl<K, V, C> FusedIterator for Range<'_, K, V, C> {}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
