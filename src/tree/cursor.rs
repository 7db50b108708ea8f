//! Bidirectional cursors over an [`RbTree`].
//!
//! A cursor references one node, or the end position. Moving past either
//! extreme lands on the end position; moving from the end position stays
//! there. Reading through the end position is an error, never undefined.

use super::{NodeId, RbTree};
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::TreeError;
use std::fmt;

// =============================================================================
// Cursor
// =============================================================================

/// A read-only cursor.
///
/// Cursors borrow the tree, so the tree cannot be modified while one is
/// alive. Cloning a cursor produces an independent cursor at the same node;
/// two cursors are equal when they reference the same node of the same tree
/// or are both at the end.
///
/// # Examples
///
/// ```rust
/// use ordtree::{RbTree, TreeError};
///
/// let tree: RbTree<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
///
/// let mut cursor = tree.cursor_first();
/// let saved = cursor.clone();
/// cursor.move_next();
/// assert_eq!(cursor.entry(), Ok((&2, &"b")));
/// assert_ne!(cursor, saved);
///
/// cursor.move_prev();
/// assert_eq!(cursor, saved);
///
/// cursor.move_prev();
/// assert!(!cursor.is_valid());
/// assert_eq!(cursor.value(), Err(TreeError::InvalidIterator));
/// ```
pub struct Cursor<'a, K, V, C = NaturalOrder> {
    tree: &'a RbTree<K, V, C>,
    current: Option<NodeId>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(super) const fn new(tree: &'a RbTree<K, V, C>, current: Option<NodeId>) -> Self {
        Self { tree, current }
    }

    /// Returns `true` unless the cursor is at the end position.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the referenced node, or `None` at the end position.
    #[inline]
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        self.current
    }

    /// Returns the current key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn key(&self) -> Result<&'a K, TreeError> {
        self.entry().map(|(key, _)| key)
    }

    /// Returns the current value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn value(&self) -> Result<&'a V, TreeError> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the current key and value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn entry(&self) -> Result<(&'a K, &'a V), TreeError> {
        let tree = self.tree;
        self.current
            .ok_or(TreeError::InvalidIterator)
            .and_then(|id| tree.entry(id))
    }

    /// Moves to the next node in ascending order.
    pub fn move_next(&mut self) {
        self.current = self.current.and_then(|id| self.tree.successor(id));
    }

    /// Moves to the previous node in ascending order.
    pub fn move_prev(&mut self) {
        self.current = self.current.and_then(|id| self.tree.predecessor(id));
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            current: self.current,
        }
    }
}

impl<K, V, C> PartialEq for Cursor<'_, K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("node", &self.current)
            .field("entry", &self.entry().ok())
            .finish()
    }
}

// =============================================================================
// CursorMut
// =============================================================================

/// A cursor that can modify values and remove entries.
///
/// Keys stay immutable: changing a key in place could break the ordering.
///
/// # Examples
///
/// ```rust
/// use ordtree::RbTree;
///
/// let mut tree: RbTree<i32, i32> = (1..=5).map(|key| (key, 0)).collect();
///
/// let mut cursor = tree.cursor_mut_first();
/// while cursor.is_valid() {
///     if cursor.key().is_ok_and(|key| key % 2 == 0) {
///         cursor.remove_current().unwrap();
///     } else {
///         cursor.set_value(1).unwrap();
///         cursor.move_next();
///     }
/// }
///
/// let entries: Vec<(i32, i32)> = tree.iter().map(|(key, value)| (*key, *value)).collect();
/// assert_eq!(entries, vec![(1, 1), (3, 1), (5, 1)]);
/// ```
pub struct CursorMut<'a, K, V, C = NaturalOrder> {
    tree: &'a mut RbTree<K, V, C>,
    current: Option<NodeId>,
}

impl<'a, K, V, C> CursorMut<'a, K, V, C> {
    pub(super) const fn new(tree: &'a mut RbTree<K, V, C>, current: Option<NodeId>) -> Self {
        Self { tree, current }
    }

    /// Returns `true` unless the cursor is at the end position.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the referenced node, or `None` at the end position.
    #[inline]
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        self.current
    }

    /// Returns the current key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn key(&self) -> Result<&K, TreeError> {
        self.current
            .ok_or(TreeError::InvalidIterator)
            .and_then(|id| self.tree.key(id))
    }

    /// Returns the current value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn value(&self) -> Result<&V, TreeError> {
        self.current
            .ok_or(TreeError::InvalidIterator)
            .and_then(|id| self.tree.value(id))
    }

    /// Returns a mutable reference to the current value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn value_mut(&mut self) -> Result<&mut V, TreeError> {
        let id = self.current.ok_or(TreeError::InvalidIterator)?;
        self.tree.value_mut(id)
    }

    /// Replaces the current value in place, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn set_value(&mut self, value: V) -> Result<V, TreeError> {
        let id = self.current.ok_or(TreeError::InvalidIterator)?;
        self.tree.set_value(id, value)
    }

    /// Removes the current entry and moves to its successor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] at the end position.
    pub fn remove_current(&mut self) -> Result<(K, V), TreeError> {
        let id = self.current.ok_or(TreeError::InvalidIterator)?;
        let next = self.tree.successor(id);
        let entry = self.tree.delete(id).ok_or(TreeError::InvalidIterator)?;
        self.current = next;
        Ok(entry)
    }

    /// Moves to the next node in ascending order.
    pub fn move_next(&mut self) {
        self.current = self.current.and_then(|id| self.tree.successor(id));
    }

    /// Moves to the previous node in ascending order.
    pub fn move_prev(&mut self) {
        self.current = self.current.and_then(|id| self.tree.predecessor(id));
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self.tree, self.current)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for CursorMut<'_, K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CursorMut")
            .field("node", &self.current)
            .field("entry", &self.as_cursor().entry().ok())
            .finish()
    }
}

// =============================================================================
// Cursor Construction
// =============================================================================

impl<K, V, C> RbTree<K, V, C> {
    /// Returns a cursor at the smallest key (the end position if empty).
    #[must_use]
    pub fn cursor_first(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.first())
    }

    /// Returns a cursor at the largest key (the end position if empty).
    #[must_use]
    pub fn cursor_last(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.last())
    }

    /// Returns a cursor at `id`, or at the end position if `id` names no live
    /// node.
    #[must_use]
    pub fn cursor_at(&self, id: NodeId) -> Cursor<'_, K, V, C> {
        let current = self.nodes.contains(id).then_some(id);
        Cursor::new(self, current)
    }

    /// Returns a mutable cursor at the smallest key.
    pub fn cursor_mut_first(&mut self) -> CursorMut<'_, K, V, C> {
        let first = self.first();
        CursorMut::new(self, first)
    }

    /// Returns a mutable cursor at the largest key.
    pub fn cursor_mut_last(&mut self) -> CursorMut<'_, K, V, C> {
        let last = self.last();
        CursorMut::new(self, last)
    }

    /// Returns a mutable cursor at `id`, or at the end position if `id`
    /// names no live node.
    pub fn cursor_mut_at(&mut self, id: NodeId) -> CursorMut<'_, K, V, C> {
        let current = self.nodes.contains(id).then_some(id);
        CursorMut::new(self, current)
    }
}

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Returns a cursor at the first key not less than `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, ()> = [10, 20, 30].into_iter().map(|key| (key, ())).collect();
    /// let mut cursor = tree.cursor_lower_bound(&15);
    /// assert_eq!(cursor.key(), Ok(&20));
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), Ok(&30));
    /// cursor.move_next();
    /// assert!(!cursor.is_valid());
    /// ```
    #[must_use]
    pub fn cursor_lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.lower_bound(key))
    }

    /// Returns a cursor at the first key greater than `key`.
    #[must_use]
    pub fn cursor_upper_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.upper_bound(key))
    }

    /// Returns a mutable cursor at the first key not less than `key`.
    pub fn cursor_mut_lower_bound(&mut self, key: &K) -> CursorMut<'_, K, V, C> {
        let lower = self.lower_bound(key);
        CursorMut::new(self, lower)
    }
}
