//! Leaf insertion and the insert-fixup pass.

use super::{Color, Direction, Node, NodeId, RbTree};
use crate::comparator::Comparator;
use std::cmp::Ordering;

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Inserts an entry and returns the handle of its new node.
    ///
    /// Insertion always succeeds. A key equal to existing keys is placed
    /// after all of them, so it never replaces anything; the wrapping
    /// container decides whether duplicates are allowed.
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
    /// let mut tree = RbTree::new();
    /// let first = tree.insert(1, "one");
    /// let second = tree.insert(1, "uno");
    ///
    /// assert_ne!(first, second);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.successor(first), Some(second));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> NodeId {
        let mut parent = None;
        let mut direction = Direction::Left;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            direction = match self.comparator.compare(&key, &node.key) {
                Ordering::Less => Direction::Left,
                Ordering::Equal | Ordering::Greater => Direction::Right,
            };
            parent = Some(id);
            current = node.child(direction);
        }

        let id = self.nodes.allocate(Node::new_red(key, value, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.nodes[parent].set_child(direction, Some(id)),
        }
        self.length += 1;

        self.insert_fixup(id);
        id
    }
}

impl<K, V, C> RbTree<K, V, C> {
    /// Restores the red-black invariants after `node` was attached as a red
    /// leaf.
    ///
    /// While `node` and its parent are both red: a red uncle is resolved by
    /// recoloring and moving the violation up to the grandparent; a black
    /// uncle by at most two rotations, after which the loop ends.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.nodes[node].parent
            && self.nodes[parent].is_red()
        {
            // A red parent is never the root.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let side = self.direction_of(parent, grandparent);
            let uncle = self.nodes[grandparent].child(side.opposite());

            if self.is_red(uncle) {
                self.nodes[parent].color = Color::Black;
                self.set_color(uncle, Color::Black);
                self.nodes[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.nodes[parent].child(side.opposite()) == Some(node) {
                // Zig-zag: lift the inner grandchild so the three form a line.
                self.rotate(parent, side);
                parent = node;
            }

            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
            break;
        }

        self.set_color(self.root, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn colors_in_order(tree: &RbTree<i32, ()>) -> Vec<(i32, Color)> {
        let mut result = Vec::new();
        let mut current = tree.first();
        while let Some(id) = current {
            result.push((tree.nodes[id].key, tree.nodes[id].color));
            current = tree.successor(id);
        }
        result
    }

    #[rstest]
    fn test_insert_ascending_rotates_left() {
        let mut tree = RbTree::new();
        let one = tree.insert(1, ());
        let two = tree.insert(2, ());
        let three = tree.insert(3, ());

        assert_eq!(tree.root, Some(two));
        assert_eq!(tree.nodes[two].left, Some(one));
        assert_eq!(tree.nodes[two].right, Some(three));
        assert_eq!(
            colors_in_order(&tree),
            vec![(1, Color::Red), (2, Color::Black), (3, Color::Red)]
        );
    }

    #[rstest]
    fn test_insert_descending_rotates_right() {
        let mut tree = RbTree::new();
        let three = tree.insert(3, ());
        let two = tree.insert(2, ());
        let one = tree.insert(1, ());

        assert_eq!(tree.root, Some(two));
        assert_eq!(tree.nodes[two].left, Some(one));
        assert_eq!(tree.nodes[two].right, Some(three));
    }

    #[rstest]
    #[case(&[3, 1, 2])]
    #[case(&[1, 3, 2])]
    fn test_insert_zig_zag_double_rotation(#[case] keys: &[i32]) {
        let mut tree = RbTree::new();
        for key in keys {
            tree.insert(*key, ());
        }

        let root = tree.root.unwrap();
        assert_eq!(tree.nodes[root].key, 2);
        assert_eq!(
            colors_in_order(&tree),
            vec![(1, Color::Red), (2, Color::Black), (3, Color::Red)]
        );
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    fn test_insert_red_uncle_recolors() {
        let mut tree = RbTree::new();
        for key in [2, 1, 3, 4] {
            tree.insert(key, ());
        }

        assert_eq!(
            colors_in_order(&tree),
            vec![
                (1, Color::Black),
                (2, Color::Black),
                (3, Color::Black),
                (4, Color::Red)
            ]
        );
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    fn test_insert_sequences_stay_valid() {
        let mut ascending = RbTree::new();
        let mut descending = RbTree::new();
        for key in 0..512 {
            ascending.insert(key, ());
            descending.insert(-key, ());
            assert!(ascending.validate().is_ok());
            assert!(descending.validate().is_ok());
        }
        assert_eq!(ascending.len(), 512);
        assert_eq!(descending.len(), 512);
    }

    #[rstest]
    fn test_insert_duplicates_go_after_equals() {
        let mut tree = RbTree::new();
        let values: Vec<NodeId> = (0..6).map(|value| tree.insert(7, value)).collect();
        let in_order: Vec<i32> = tree.values().copied().collect();
        assert_eq!(in_order, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(tree.lower_bound(&7), Some(values[0]));
        assert!(tree.validate().is_ok());
    }
}
