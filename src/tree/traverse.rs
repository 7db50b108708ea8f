//! In-order neighbours and visitor traversal.

use super::{Direction, NodeId, RbTree};

impl<K, V, C> RbTree<K, V, C> {
    /// Returns the node following `id` in ascending key order, or `None` at
    /// the end or when `id` names no live node.
    ///
    /// # Complexity
    ///
    /// O(log N) worst case, amortized O(1) over a full traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, ()> = [2, 1, 3].into_iter().map(|key| (key, ())).collect();
    /// let one = tree.first().unwrap();
    /// let two = tree.successor(one).unwrap();
    /// assert_eq!(tree.key(two), Ok(&2));
    /// assert_eq!(tree.successor(tree.last().unwrap()), None);
    /// ```
    #[must_use]
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Right)
    }

    /// Returns the node preceding `id` in ascending key order, or `None` at
    /// the beginning or when `id` names no live node.
    #[must_use]
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Left)
    }

    /// One in-order step toward `direction` (`Right` = successor).
    ///
    /// With a child on that side the answer is the nearest node of that
    /// subtree; otherwise climb while coming from that side, and the first
    /// ancestor reached from the other side is the answer.
    fn step(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if let Some(child) = node.child(direction) {
            return Some(self.extreme(child, direction.opposite()));
        }

        let mut current = id;
        let mut parent = node.parent;
        while let Some(parent_id) = parent
            && self.nodes[parent_id].child(direction) == Some(current)
        {
            current = parent_id;
            parent = self.nodes[parent_id].parent;
        }
        parent
    }

    /// Visits every entry in ascending key order.
    ///
    /// The visitor returns `true` to continue and `false` to stop early.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, i32> = (1..=10).map(|key| (key, key * key)).collect();
    ///
    /// let mut visited = Vec::new();
    /// tree.traversal(|key, value| {
    ///     visited.push(*value);
    ///     *key < 3
    /// });
    /// assert_eq!(visited, vec![1, 4, 9]);
    /// ```
    pub fn traversal<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut current = self.first();
        while let Some(id) = current {
            let node = &self.nodes[id];
            if !visitor(&node.key, &node.value) {
                return;
            }
            current = self.successor(id);
        }
    }

    /// Node handles in ascending key order.
    pub(super) fn in_order_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.length);
        let mut current = self.first();
        while let Some(id) = current {
            ids.push(id);
            current = self.successor(id);
        }
        ids
    }
}
