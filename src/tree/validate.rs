//! Structural self-check of the red-black invariants.

use super::{NodeId, RbTree};
use crate::comparator::Comparator;
use crate::error::InvariantViolation;
use smallvec::{SmallVec, smallvec};
use std::cmp::Ordering;

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Checks every red-black and search-tree invariant.
    ///
    /// Verifies that the root is black and parentless, that no red node has
    /// a red child, that every root-to-nil path carries the same number of
    /// black nodes, that each child's parent link points back, that the
    /// number of reachable nodes matches [`len`](Self::len), and that
    /// in-order neighbours are non-decreasing under the comparator.
    ///
    /// Intended for tests and diagnostics; the public operations keep these
    /// invariants on their own.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for key in (0..100).rev() {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let result = self.check_structure().and_then(|()| self.check_order());
        if let Err(violation) = &result {
            log::debug!("tree validation failed: {violation}");
        }
        result
    }

    /// Colors, parent links, black heights and the node count, in one
    /// iterative post-order pass.
    fn check_structure(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return if self.length == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::SizeMismatch {
                    recorded: self.length,
                    reachable: 0,
                })
            };
        };

        if self.nodes[root].is_red() {
            return Err(InvariantViolation::RedRoot { node: root });
        }
        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink { node: root });
        }

        // Black height of each finished subtree, by slot. Nil leaves count 1.
        let mut black_heights = vec![0_usize; self.nodes.slot_count()];
        let mut stack: SmallVec<[(NodeId, bool); 64]> = smallvec![(root, false)];
        let mut reachable = 0_usize;

        while let Some((id, children_done)) = stack.pop() {
            let node = &self.nodes[id];

            if children_done {
                let left = node.left.map_or(1, |child| black_heights[child.index()]);
                let right = node.right.map_or(1, |child| black_heights[child.index()]);
                if left != right {
                    return Err(InvariantViolation::BlackHeightMismatch {
                        node: id,
                        left,
                        right,
                    });
                }
                black_heights[id.index()] = left + usize::from(!node.is_red());
                continue;
            }

            reachable += 1;
            if reachable > self.length {
                return Err(InvariantViolation::SizeMismatch {
                    recorded: self.length,
                    reachable,
                });
            }

            stack.push((id, true));
            for child in [node.left, node.right].into_iter().flatten() {
                let Some(child_node) = self.nodes.get(child) else {
                    return Err(InvariantViolation::BrokenParentLink { node: child });
                };
                if child_node.parent != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink { node: child });
                }
                if node.is_red() && child_node.is_red() {
                    return Err(InvariantViolation::RedRedEdge { parent: id, child });
                }
                stack.push((child, false));
            }
        }

        if reachable == self.length {
            Ok(())
        } else {
            Err(InvariantViolation::SizeMismatch {
                recorded: self.length,
                reachable,
            })
        }
    }

    fn check_order(&self) -> Result<(), InvariantViolation> {
        let Some(mut earlier) = self.first() else {
            return Ok(());
        };
        while let Some(later) = self.successor(earlier) {
            let ordering = self
                .comparator
                .compare(&self.nodes[earlier].key, &self.nodes[later].key);
            if ordering == Ordering::Greater {
                return Err(InvariantViolation::OrderViolation { earlier, later });
            }
            earlier = later;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Color, Node};
    use super::*;
    use rstest::rstest;

    /// 2 (black) with children 1 and 3 (red).
    fn three_nodes() -> (RbTree<i32, ()>, NodeId, NodeId, NodeId) {
        let mut tree = RbTree::new();
        let two = tree.insert(2, ());
        let one = tree.insert(1, ());
        let three = tree.insert(3, ());
        (tree, one, two, three)
    }

    #[rstest]
    fn test_valid_trees_pass() {
        let (tree, ..) = three_nodes();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(RbTree::<i32, ()>::new().validate(), Ok(()));
    }

    #[rstest]
    fn test_red_root_detected() {
        let (mut tree, _, two, _) = three_nodes();
        tree.nodes[two].color = Color::Red;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRoot { node: two })
        );
    }

    #[rstest]
    fn test_red_red_edge_detected() {
        let (mut tree, one, two, _) = three_nodes();
        let zero = tree.nodes.allocate(Node::new_red(0, (), Some(one)));
        tree.nodes[one].left = Some(zero);
        tree.length += 1;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRedEdge {
                parent: one,
                child: zero
            })
        );
        assert_eq!(tree.nodes[two].color, Color::Black);
    }

    #[rstest]
    fn test_black_height_mismatch_detected() {
        let (mut tree, one, two, _) = three_nodes();
        tree.nodes[one].color = Color::Black;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch {
                node: two,
                left: 2,
                right: 1
            })
        );
    }

    #[rstest]
    fn test_order_violation_detected() {
        let (mut tree, one, two, _) = three_nodes();
        tree.nodes[one].key = 5;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::OrderViolation {
                earlier: one,
                later: two
            })
        );
    }

    #[rstest]
    fn test_broken_parent_link_detected() {
        let (mut tree, _, _, three) = three_nodes();
        tree.nodes[three].parent = None;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BrokenParentLink { node: three })
        );
    }

    #[rstest]
    #[case(4, 3)]
    #[case(2, 3)]
    fn test_size_mismatch_detected(#[case] recorded: usize, #[case] reachable: usize) {
        let (mut tree, ..) = three_nodes();
        tree.length = recorded;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::SizeMismatch {
                recorded,
                reachable
            })
        );
    }

    #[rstest]
    fn test_size_mismatch_on_empty_root() {
        let mut tree: RbTree<i32, ()> = RbTree::new();
        tree.length = 1;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::SizeMismatch {
                recorded: 1,
                reachable: 0
            })
        );
    }
}
