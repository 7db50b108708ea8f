//! Exact-match and bound descents.
//!
//! All three descents are iterative; depth is bounded by the tree height.

use super::{Direction, NodeId, RbTree};
use crate::comparator::Comparator;
use std::cmp::Ordering;

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Finds a node whose key compares equal to `key`.
    ///
    /// With duplicate keys present, the node returned is the first equal one
    /// met on the descent from the root, not necessarily the first in order;
    /// use [`lower_bound`](Self::lower_bound) for that.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    ///
    /// let id = tree.find(&2).unwrap();
    /// assert_eq!(tree.value(id), Ok(&"two"));
    /// assert_eq!(tree.find(&3), None);
    /// ```
    #[must_use]
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match self.comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Returns a reference to the value of a node whose key equals `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.nodes[id].value)
    }

    /// Returns a mutable reference to the value of a node whose key equals
    /// `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key).map(|id| &mut self.nodes[id].value)
    }

    /// Returns `true` if some node's key equals `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the leftmost node whose key is greater than or equal to `key`,
    /// or `None` ("end") if every key is smaller.
    ///
    /// Among duplicates this is the first occurrence in order.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, ()> = [1, 3, 5].into_iter().map(|key| (key, ())).collect();
    ///
    /// assert_eq!(tree.lower_bound(&3).map(|id| *tree.key(id).unwrap()), Some(3));
    /// assert_eq!(tree.lower_bound(&4).map(|id| *tree.key(id).unwrap()), Some(5));
    /// assert_eq!(tree.lower_bound(&6), None);
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<NodeId> {
        self.bound_descent(|node_key| self.comparator.compare(node_key, key) != Ordering::Less)
    }

    /// Returns the leftmost node whose key is strictly greater than `key`,
    /// or `None` ("end") if no key is greater.
    ///
    /// Among duplicates this is the node immediately past the last
    /// occurrence of `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, ()> = [1, 3, 3, 5].into_iter().map(|key| (key, ())).collect();
    ///
    /// assert_eq!(tree.upper_bound(&3).map(|id| *tree.key(id).unwrap()), Some(5));
    /// assert_eq!(tree.upper_bound(&0).map(|id| *tree.key(id).unwrap()), Some(1));
    /// assert_eq!(tree.upper_bound(&5), None);
    /// ```
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Option<NodeId> {
        self.bound_descent(|node_key| self.comparator.compare(node_key, key) == Ordering::Greater)
    }

    /// Finds the leftmost node satisfying `accepts`, which must be monotone
    /// over the in-order sequence (false, ..., false, true, ..., true).
    ///
    /// Every accepting node is a candidate that the left subtree might still
    /// improve on; every rejecting node sends the search right.
    fn bound_descent<P>(&self, accepts: P) -> Option<NodeId>
    where
        P: Fn(&K) -> bool,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            if accepts(&node.key) {
                best = Some(id);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        best
    }
}

impl<K, V, C> RbTree<K, V, C> {
    /// Returns the node with the smallest key, or `None` if empty.
    ///
    /// Among duplicates of the smallest key, the first inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let tree: RbTree<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(tree.first().map(|id| tree.entry(id).unwrap()), Some((&1, &"a")));
    /// assert_eq!(tree.last().map(|id| tree.entry(id).unwrap()), Some((&3, &"c")));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Left))
    }

    /// Returns the node with the largest key, or `None` if empty.
    #[must_use]
    pub fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Right))
    }

    /// Walks from `id` as far as possible toward `direction`: the minimum of
    /// the subtree for `Left`, the maximum for `Right`.
    pub(super) fn extreme(&self, id: NodeId, direction: Direction) -> NodeId {
        let mut current = id;
        while let Some(child) = self.nodes[current].child(direction) {
            current = child;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> RbTree<i32, usize> {
        let mut tree = RbTree::new();
        for (position, key) in keys.iter().enumerate() {
            tree.insert(*key, position);
        }
        tree
    }

    fn key_of(tree: &RbTree<i32, usize>, id: Option<NodeId>) -> Option<i32> {
        id.map(|id| *tree.key(id).unwrap())
    }

    #[rstest]
    fn test_find_existing_and_missing() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        for key in [1, 3, 4, 5, 7, 8, 9] {
            assert_eq!(key_of(&tree, tree.find(&key)), Some(key));
        }
        assert_eq!(tree.find(&0), None);
        assert_eq!(tree.find(&6), None);
        assert_eq!(tree.find(&10), None);
    }

    #[rstest]
    fn test_find_on_empty_tree() {
        let tree: RbTree<i32, usize> = RbTree::new();
        assert_eq!(tree.find(&1), None);
        assert_eq!(tree.lower_bound(&1), None);
        assert_eq!(tree.upper_bound(&1), None);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(1))]
    #[case(2, Some(3))]
    #[case(6, Some(7))]
    #[case(9, Some(9))]
    #[case(10, None)]
    fn test_lower_bound(#[case] target: i32, #[case] expected: Option<i32>) {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(key_of(&tree, tree.lower_bound(&target)), expected);
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(3))]
    #[case(5, Some(7))]
    #[case(8, Some(9))]
    #[case(9, None)]
    fn test_upper_bound(#[case] target: i32, #[case] expected: Option<i32>) {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(key_of(&tree, tree.upper_bound(&target)), expected);
    }

    #[rstest]
    fn test_bounds_with_duplicates() {
        let tree = tree_of(&[10, 10, 10]);
        assert_eq!(tree.len(), 3);

        let lower = tree.lower_bound(&10).unwrap();
        assert_eq!(tree.value(lower), Ok(&0));
        assert_eq!(tree.predecessor(lower), None);
        assert_eq!(tree.upper_bound(&10), None);
    }

    #[rstest]
    fn test_bounds_straddle_duplicate_run() {
        let tree = tree_of(&[2, 5, 5, 1, 5, 8, 5]);

        let lower = tree.lower_bound(&5).unwrap();
        assert_eq!(tree.entry(lower), Ok((&5, &1)));
        assert_eq!(key_of(&tree, tree.predecessor(lower)), Some(2));

        let upper = tree.upper_bound(&5).unwrap();
        assert_eq!(tree.key(upper), Ok(&8));
        let before_upper = tree.predecessor(upper).unwrap();
        assert_eq!(tree.entry(before_upper), Ok((&5, &6)));
    }

    #[rstest]
    fn test_first_and_last() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(key_of(&tree, tree.first()), Some(1));
        assert_eq!(key_of(&tree, tree.last()), Some(9));
    }

    #[rstest]
    fn test_get_and_get_mut() {
        let mut tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.get(&2), Some(&1));
        if let Some(value) = tree.get_mut(&2) {
            *value = 100;
        }
        assert_eq!(tree.get(&2), Some(&100));
        assert!(tree.contains_key(&3));
        assert!(!tree.contains_key(&4));
    }
}
