//! Node removal and the delete-fixup ("double-black") pass.
//!
//! A node with two children is not emptied by copying its successor's entry
//! into it. Instead the successor node itself is relinked into the removed
//! node's position, taking over its color. The node the fixup reasons about
//! as "physically removed" is therefore the successor's old position, and
//! every surviving entry keeps its [`NodeId`].

use super::{Color, Direction, NodeId, RbTree};
use crate::comparator::Comparator;

impl<K, V, C> RbTree<K, V, C> {
    /// Deletes the node named by `id` and returns its entry.
    ///
    /// Deleting a handle that names no live node is a no-op returning
    /// `None`. Every other handle stays valid and keeps naming the same
    /// entry.
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
    /// for key in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// let four = tree.find(&4).unwrap();
    /// let five = tree.find(&5).unwrap();
    /// assert_eq!(tree.delete(five), Some((5, ())));
    /// assert_eq!(tree.delete(five), None);
    ///
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 7, 8, 9]);
    /// assert_eq!(tree.key(four), Ok(&4));
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn delete(&mut self, id: NodeId) -> Option<(K, V)> {
        if !self.nodes.contains(id) {
            log::trace!("delete of {id} ignored: no live node");
            return None;
        }

        let left = self.nodes[id].left;
        let right = self.nodes[id].right;

        // `removed_color` is the color that disappears from the path through
        // `fixup_parent`; `fixup_node` now sits where it was.
        let (removed_color, fixup_node, fixup_parent) = match (left, right) {
            (None, child) | (child, None) => {
                let parent = self.nodes[id].parent;
                self.transplant(id, child);
                (self.nodes[id].color, child, parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.extreme(right, Direction::Left);
                let successor_color = self.nodes[successor].color;
                let successor_child = self.nodes[successor].right;

                let fixup_parent = if self.nodes[successor].parent == Some(id) {
                    successor
                } else {
                    let successor_parent = self.nodes[successor].parent;
                    self.transplant(successor, successor_child);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                    successor_parent.unwrap_or(successor)
                };

                self.transplant(id, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[id].color;

                (successor_color, successor_child, Some(fixup_parent))
            }
        };

        self.length -= 1;
        if removed_color == Color::Black {
            self.delete_fixup(fixup_node, fixup_parent);
        }

        self.nodes.release(id).map(|node| (node.key, node.value))
    }

    /// Puts `replacement` where `target` hangs (its parent's child slot or
    /// the root). `target`'s own links are left untouched.
    fn transplant(&mut self, target: NodeId, replacement: Option<NodeId>) {
        let parent = self.nodes[target].parent;
        self.replace_child(parent, target, replacement);
        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
    }

    /// Resolves the black-height deficit at `node`, a possibly absent child
    /// of `parent`.
    ///
    /// Walks upward until the deficit is absorbed by a red node, resolved by
    /// rotation, or reaches the root. Each case is written once for the side
    /// the deficit is on; `far` and `near` name the sibling's children away
    /// from and toward that side.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.root && !self.is_red(node) {
            let Some(parent_id) = parent else {
                break;
            };
            let side = if self.nodes[parent_id].left == node {
                Direction::Left
            } else {
                Direction::Right
            };

            let mut sibling = self.nodes[parent_id].child(side.opposite());

            // Red sibling: rotate it above the parent so the new sibling is
            // black.
            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.nodes[parent_id].color = Color::Red;
                self.rotate(parent_id, side);
                sibling = self.nodes[parent_id].child(side.opposite());
            }

            // A node carrying a deficit always has a sibling of black height
            // at least one.
            let Some(mut sibling_id) = sibling else {
                break;
            };

            let near = self.nodes[sibling_id].child(side);
            let far = self.nodes[sibling_id].child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                // Black sibling with black children: push the deficit up.
                self.nodes[sibling_id].color = Color::Red;
                node = Some(parent_id);
                parent = self.nodes[parent_id].parent;
                continue;
            }

            if !self.is_red(far) {
                // Near child red, far child black: rotate the sibling so the
                // red child becomes the far one.
                self.set_color(near, Color::Black);
                self.nodes[sibling_id].color = Color::Red;
                self.rotate(sibling_id, side.opposite());
                let Some(rotated) = self.nodes[parent_id].child(side.opposite()) else {
                    break;
                };
                sibling_id = rotated;
            }

            // Far child red: one rotation at the parent absorbs the deficit.
            self.nodes[sibling_id].color = self.nodes[parent_id].color;
            self.nodes[parent_id].color = Color::Black;
            let far = self.nodes[sibling_id].child(side.opposite());
            self.set_color(far, Color::Black);
            self.rotate(parent_id, side);
            node = self.root;
            parent = None;
        }

        self.set_color(node, Color::Black);
    }
}

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Finds a node whose key equals `key` and deletes it.
    ///
    /// With duplicates present, removes the node [`find`](Self::find) lands
    /// on. Returns `None` if no key matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let mut tree: RbTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.delete_key(&1), Some((1, "one")));
    /// assert_eq!(tree.delete_key(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn delete_key(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.find(key)?;
        self.delete(id)
    }
}
