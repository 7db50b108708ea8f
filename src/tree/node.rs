//! Node storage for [`RbTree`](super::RbTree).
//!
//! Nodes live in a slot table owned by the tree. Child and parent links are
//! slot indices wrapped in [`NodeId`]; the parent link is used only for
//! navigation (rotations, successor/predecessor walks) and never owns
//! anything.

use std::fmt;
use std::ops::{Index, IndexMut};

// =============================================================================
// Color Definition
// =============================================================================

/// The color of a red-black tree node. Absent children count as black.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Color {
    Red,
    Black,
}

// =============================================================================
// Direction Definition
// =============================================================================

/// Which child of a node. Every mirrored case in the fixup passes is written
/// once in terms of a `Direction` and its opposite.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(super) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// NodeId Definition
// =============================================================================

/// A handle naming one node of an [`RbTree`](super::RbTree).
///
/// Handles are returned by insertion and the search operations and are
/// accepted by [`RbTree::delete`](super::RbTree::delete) and the handle-based
/// accessors. A handle stays valid until the node it names is deleted or the
/// tree is cleared; deletion never moves a surviving entry to a different
/// handle.
///
/// A handle held across a deletion of its own node, or across
/// [`RbTree::clear`](super::RbTree::clear), is stale. Accessors report a
/// stale handle as [`TreeError::InvalidIterator`](crate::TreeError) while its
/// slot is vacant, but once a later insertion reuses the slot the handle names
/// the new node. Not holding handles across such mutations is the caller's
/// obligation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw slot index of this handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// A tree vertex.
#[derive(Clone, Debug)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) color: Color,
    pub(super) parent: Option<NodeId>,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf hanging below `parent`.
    pub(super) const fn new_red(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(super) const fn child(&self, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(super) const fn set_child(&mut self, direction: Direction, child: Option<NodeId>) {
        match direction {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }

    #[inline]
    pub(super) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

// =============================================================================
// NodeTable Definition
// =============================================================================

/// Slot storage for nodes with a free list of vacated slots.
#[derive(Clone, Debug)]
pub(super) struct NodeTable<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    vacant: Vec<usize>,
}

impl<K, V> NodeTable<K, V> {
    pub(super) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Stores `node`, reusing a vacated slot when one exists.
    pub(super) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(index) = self.vacant.pop() {
            self.slots[index] = Some(node);
            NodeId(index)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Takes the node out of its slot and marks the slot reusable.
    pub(super) fn release(&mut self, id: NodeId) -> Option<Node<K, V>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.vacant.push(id.0);
        Some(node)
    }

    #[inline]
    pub(super) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(super) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    #[inline]
    pub(super) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of slots ever allocated, occupied or vacant.
    #[inline]
    pub(super) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    /// Mutable references to every stored value, indexed by slot.
    pub(super) fn values_mut_by_slot(&mut self) -> Vec<Option<&mut V>> {
        self.slots
            .iter_mut()
            .map(|slot| slot.as_mut().map(|node| &mut node.value))
            .collect()
    }

    /// Consumes the table, yielding every stored node indexed by slot.
    pub(super) fn into_slots(self) -> Vec<Option<Node<K, V>>> {
        self.slots
    }
}

impl<K, V> Index<NodeId> for NodeTable<K, V> {
    type Output = Node<K, V>;

    /// Links stored inside the tree always name occupied slots; a vacant slot
    /// here means the balancing code itself is broken.
    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => unreachable!("tree link {id} names a vacant slot"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for NodeTable<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(node) => node,
            None => unreachable!("tree link {id} names a vacant slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_allocate_reuses_released_slot() {
        let mut table = NodeTable::new();
        let first = table.allocate(Node::new_red(1, "one", None));
        let second = table.allocate(Node::new_red(2, "two", None));
        assert_ne!(first, second);

        let released = table.release(first).map(|node| node.key);
        assert_eq!(released, Some(1));
        assert!(!table.contains(first));

        let third = table.allocate(Node::new_red(3, "three", None));
        assert_eq!(third, first);
        assert_eq!(table[third].key, 3);
    }

    #[rstest]
    fn test_release_twice_is_none() {
        let mut table = NodeTable::new();
        let id = table.allocate(Node::new_red(1, (), None));
        assert!(table.release(id).is_some());
        assert!(table.release(id).is_none());
    }

    #[rstest]
    fn test_child_by_direction() {
        let mut node = Node::new_red(0, (), None);
        node.set_child(Direction::Left, Some(NodeId(4)));
        node.set_child(Direction::Right, Some(NodeId(7)));
        assert_eq!(node.child(Direction::Left), Some(NodeId(4)));
        assert_eq!(node.child(Direction::Right), Some(NodeId(7)));
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[rstest]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId(12)), "#12");
        assert_eq!(NodeId(12).index(), 12);
    }
}
