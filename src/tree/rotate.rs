//! Rotation primitives, the only structural transform used by both fixup
//! passes.

use super::{Direction, NodeId, RbTree};

impl<K, V, C> RbTree<K, V, C> {
    /// Rotates the subtree rooted at `pivot` toward `direction`.
    ///
    /// The child on the opposite side of `direction` becomes the subtree's
    /// root and `pivot` becomes its `direction` child. In-order key order is
    /// unchanged. A pivot without that child is left alone.
    ///
    /// ```text
    ///        P                      C
    ///       / \     rotate(P,     / \
    ///      a   C      Left)  →   P   c
    ///         / \               / \
    ///        b   c             a   b
    /// ```
    pub(super) fn rotate(&mut self, pivot: NodeId, direction: Direction) {
        let opposite = direction.opposite();
        let Some(child) = self.nodes[pivot].child(opposite) else {
            return;
        };

        let inner = self.nodes[child].child(direction);
        self.nodes[pivot].set_child(opposite, inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        let parent = self.nodes[pivot].parent;
        self.nodes[child].parent = parent;
        self.replace_child(parent, pivot, Some(child));

        self.nodes[child].set_child(direction, Some(pivot));
        self.nodes[pivot].parent = Some(child);
    }

    /// Re-roots the subtree at `pivot` on its right child.
    #[cfg(test)]
    pub(super) fn rotate_left(&mut self, pivot: NodeId) {
        self.rotate(pivot, Direction::Left);
    }

    /// Re-roots the subtree at `pivot` on its left child.
    #[cfg(test)]
    pub(super) fn rotate_right(&mut self, pivot: NodeId) {
        self.rotate(pivot, Direction::Right);
    }
}
