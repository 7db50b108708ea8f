//! Red-black tree balancing engine.
//!
//! This module provides [`RbTree`], a self-balancing ordered binary search
//! tree, and [`Cursor`]/[`CursorMut`], its bidirectional iterators.
//!
//! # Overview
//!
//! - O(log N) insert, find, lower/upper bound and delete
//! - O(log N) first/last, amortized O(1) successor/predecessor
//! - O(1) len and `is_empty`
//! - Duplicate keys are permitted; equal keys keep insertion order
//!
//! Keys are ordered by an injected [`Comparator`], [`NaturalOrder`] by
//! default. Every container in [`containers`](crate::containers) is a thin
//! policy layer over this one engine.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::RbTree;
//!
//! let mut tree = RbTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, ());
//! }
//!
//! let lower = tree.lower_bound(&6).unwrap();
//! assert_eq!(tree.key(lower), Ok(&7));
//!
//! let mut cursor = tree.cursor_at(lower);
//! cursor.move_prev();
//! assert_eq!(cursor.key(), Ok(&5));
//! ```
//!
//! # Internal Structure
//!
//! Nodes are stored in a slot table owned by the tree and linked by
//! [`NodeId`] indices. The tree maintains these invariants after every
//! public operation:
//! 1. The root is black
//! 2. All absent children (nil leaves) count as black
//! 3. Red nodes have only black children
//! 4. Every path from a node to its descendant nil leaves has the same
//!    number of black nodes
//! 5. In-order traversal is non-decreasing under the comparator
//!
//! These invariants bound the height by `2 * log2(N + 1)`.
//!
//! # Deletion and handle identity
//!
//! Deleting a node with two children relinks its in-order successor into
//! the vacated position rather than copying the successor's entry. Every
//! surviving entry therefore keeps its [`NodeId`] across deletions; only the
//! deleted node's own handle goes stale.
//!
//! # Mutation during iteration
//!
//! [`Cursor`] and the iterators borrow the tree, so the borrow checker
//! rejects structural modification while one is alive. Bare [`NodeId`]
//! handles carry no borrow; holding one across `delete` of that same node or
//! across `clear` is the caller's responsibility.

mod cursor;
mod delete;
mod insert;
mod iter;
mod node;
mod rotate;
mod search;
mod traverse;
mod validate;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, Keys, Range, Values, ValuesMut};
pub use node::NodeId;

use node::{Color, Direction, Node, NodeTable};

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::TreeError;
use std::fmt;
use std::iter::FromIterator;

// =============================================================================
// RbTree Definition
// =============================================================================

/// A red-black tree mapping keys to values under an injected total order.
///
/// The tree exclusively owns every node. It permits duplicate keys: an entry
/// whose key compares equal to existing ones is placed after them, so
/// in-order traversal of equal keys follows insertion order. Enforcing
/// uniqueness is left to the wrapping container.
///
/// The tree holds no internal synchronization. It is `Send`/`Sync` whenever
/// its keys, values and comparator are; shared mutation needs an external
/// lock such as [`sync::Synchronized`](crate::sync).
///
/// # Time Complexity
///
/// | Operation                      | Complexity |
/// |--------------------------------|------------|
/// | `new`                          | O(1)       |
/// | `insert`                       | O(log N)   |
/// | `find`                         | O(log N)   |
/// | `lower_bound`/`upper_bound`    | O(log N)   |
/// | `delete`                       | O(log N)   |
/// | `first`/`last`                 | O(log N)   |
/// | `successor`/`predecessor`      | O(log N)   |
/// | `len`/`is_empty`               | O(1)       |
///
/// # Examples
///
/// ```rust
/// use ordtree::RbTree;
///
/// let mut tree = RbTree::new();
/// tree.insert(10, "a");
/// tree.insert(10, "b");
/// tree.insert(10, "c");
///
/// assert_eq!(tree.len(), 3);
/// let first = tree.lower_bound(&10).unwrap();
/// assert_eq!(tree.value(first), Ok(&"a"));
/// assert_eq!(tree.upper_bound(&10), None);
/// ```
#[derive(Clone)]
pub struct RbTree<K, V, C = NaturalOrder> {
    /// Owner of every node
    nodes: NodeTable<K, V>,
    /// Root node, `None` when empty
    root: Option<NodeId>,
    /// Number of live entries
    length: usize,
    /// Key order
    comparator: C,
}

impl<K: Ord, V> RbTree<K, V> {
    /// Creates an empty tree ordered by `K`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, String> = RbTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RbTree<K, V, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::{RbTree, comparator};
    ///
    /// let mut tree = RbTree::with_comparator(comparator::from_fn(|left: &i32, right: &i32| right.cmp(left)));
    /// tree.insert(1, ());
    /// tree.insert(2, ());
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: NodeTable::new(),
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator ordering this tree.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the root node, if any.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Removes every entry.
    ///
    /// All outstanding [`NodeId`] handles become stale. Clearing an empty
    /// tree is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let mut tree: RbTree<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.first(), None);
    /// ```
    pub fn clear(&mut self) {
        if self.root.is_none() {
            log::trace!("clear on an empty tree");
            return;
        }
        log::debug!("clearing tree with {} entries", self.length);
        self.root = None;
        self.length = 0;
        self.nodes.clear();
    }

    /// Returns `true` if `id` names a live node of this tree.
    #[inline]
    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Returns the key stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] if `id` names no live node.
    pub fn key(&self, id: NodeId) -> Result<&K, TreeError> {
        self.nodes
            .get(id)
            .map(|node| &node.key)
            .ok_or(TreeError::InvalidIterator)
    }

    /// Returns the value stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] if `id` names no live node.
    pub fn value(&self, id: NodeId) -> Result<&V, TreeError> {
        self.nodes
            .get(id)
            .map(|node| &node.value)
            .ok_or(TreeError::InvalidIterator)
    }

    /// Returns a mutable reference to the value stored at `id`.
    ///
    /// Keys are never handed out mutably: changing a key in place could
    /// break the ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] if `id` names no live node.
    pub fn value_mut(&mut self, id: NodeId) -> Result<&mut V, TreeError> {
        self.nodes
            .get_mut(id)
            .map(|node| &mut node.value)
            .ok_or(TreeError::InvalidIterator)
    }

    /// Returns the key and value stored at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] if `id` names no live node.
    pub fn entry(&self, id: NodeId) -> Result<(&K, &V), TreeError> {
        self.nodes
            .get(id)
            .map(|node| (&node.key, &node.value))
            .ok_or(TreeError::InvalidIterator)
    }

    /// Replaces the value stored at `id`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidIterator`] if `id` names no live node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let id = tree.insert("answer", 41);
    /// assert_eq!(tree.set_value(id, 42), Ok(41));
    /// assert_eq!(tree.value(id), Ok(&42));
    /// ```
    pub fn set_value(&mut self, id: NodeId, value: V) -> Result<V, TreeError> {
        self.value_mut(id)
            .map(|slot| std::mem::replace(slot, value))
    }

    // -------------------------------------------------------------------------
    // Link helpers shared by the balancing passes
    // -------------------------------------------------------------------------

    /// Nil leaves count as black.
    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.nodes[id].is_red())
    }

    #[inline]
    fn set_color(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id {
            self.nodes[id].color = color;
        }
    }

    /// Which child of `parent` the node `child` is.
    #[inline]
    fn direction_of(&self, child: NodeId, parent: NodeId) -> Direction {
        if self.nodes[parent].left == Some(child) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Points the link that referenced `old` (the parent's child slot, or the
    /// root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let direction = self.direction_of(old, parent);
                self.nodes[parent].set_child(direction, new);
            }
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Ord, V> Default for RbTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RbTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RbTree<K, V, C> {
    /// Two trees are equal when their in-order entry sequences are equal.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RbTree<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

static_assertions::assert_impl_all!(RbTree<i32, String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(NodeId: Send, Sync, Copy);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::ReverseOrder;
    use rstest::rstest;

    fn sample_tree() -> RbTree<i32, i32> {
        let mut tree = RbTree::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(key, key * 10);
        }
        tree
    }

    #[rstest]
    fn test_new_creates_empty() {
        let tree: RbTree<i32, i32> = RbTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    fn test_single_insert_makes_black_root() {
        let mut tree = RbTree::new();
        let id = tree.insert(1, "one");
        assert_eq!(tree.root(), Some(id));
        assert_eq!(tree.nodes[id].color, Color::Black);
    }

    #[rstest]
    fn test_handle_accessors() {
        let mut tree = sample_tree();
        let id = tree.find(&4).unwrap();
        assert_eq!(tree.key(id), Ok(&4));
        assert_eq!(tree.value(id), Ok(&40));
        assert_eq!(tree.entry(id), Ok((&4, &40)));

        *tree.value_mut(id).unwrap() += 1;
        assert_eq!(tree.value(id), Ok(&41));
        assert_eq!(tree.set_value(id, 0), Ok(41));
    }

    #[rstest]
    fn test_stale_handle_is_invalid() {
        let mut tree = sample_tree();
        let id = tree.find(&4).unwrap();
        tree.delete(id);
        assert!(!tree.contains_node(id));
        assert_eq!(tree.key(id), Err(TreeError::InvalidIterator));
        assert_eq!(tree.set_value(id, 1), Err(TreeError::InvalidIterator));
    }

    #[rstest]
    fn test_clear_resets_everything() {
        let mut tree = sample_tree();
        let id = tree.first().unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.key(id), Err(TreeError::InvalidIterator));
        tree.clear();
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_eq_compares_entries() {
        let left: RbTree<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
        let right: RbTree<i32, i32> = [(2, 2), (1, 1)].into_iter().collect();
        let other: RbTree<i32, i32> = [(1, 1), (2, 3)].into_iter().collect();
        assert_eq!(left, right);
        assert_ne!(left, other);
    }

    #[rstest]
    fn test_debug_formats_as_map() {
        let tree: RbTree<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
        assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b"}"#);
    }

    #[rstest]
    fn test_clone_preserves_handles() {
        let tree = sample_tree();
        let id = tree.find(&7).unwrap();
        let cloned = tree.clone();
        assert_eq!(cloned.key(id), Ok(&7));
        assert!(cloned.validate().is_ok());
    }

    #[rstest]
    fn test_extend_with_custom_comparator() {
        let mut tree = RbTree::with_comparator(ReverseOrder(NaturalOrder));
        tree.extend([(1, ()), (3, ()), (2, ())]);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert!(tree.validate().is_ok());
    }
}
