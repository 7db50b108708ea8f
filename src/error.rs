//! Error types for the tree and its containers.
//!
//! Two kinds of failure exist:
//!
//! - [`TreeError`]: recoverable conditions a caller can trigger, such as
//!   reading through an end cursor. These are always surfaced as typed
//!   results.
//! - [`InvariantViolation`]: a programming defect detected by
//!   [`RbTree::validate`](crate::RbTree::validate). It is never produced on
//!   the hot path; tests use it to prove the balancing logic correct.
//!
//! Lookups that simply find nothing return `Option::None` rather than an
//! error.

use crate::tree::NodeId;

/// Recoverable errors surfaced by tree and container operations.
///
/// # Examples
///
/// ```rust
/// use ordtree::{RbTree, TreeError};
///
/// let tree: RbTree<i32, &str> = RbTree::new();
/// let cursor = tree.cursor_first();
///
/// assert!(!cursor.is_valid());
/// assert_eq!(cursor.key(), Err(TreeError::InvalidIterator));
/// assert_eq!(
///     format!("{}", TreeError::InvalidIterator),
///     "iterator does not reference a live node"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// A cursor or node handle was dereferenced while at the end position
    /// or after the node it named was removed.
    InvalidIterator,
    /// A container operation required a key that is not present.
    NotFound,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIterator => write!(formatter, "iterator does not reference a live node"),
            Self::NotFound => write!(formatter, "key not found"),
        }
    }
}

impl std::error::Error for TreeError {}

/// A broken red-black or binary-search-tree invariant.
///
/// Each variant names the node at which the defect was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot {
        /// The root.
        node: NodeId,
    },
    /// A red node has a red child.
    RedRedEdge {
        /// The red parent.
        parent: NodeId,
        /// The red child.
        child: NodeId,
    },
    /// Two paths below `node` reach nil leaves through different numbers of
    /// black nodes.
    BlackHeightMismatch {
        /// The node whose subtrees disagree.
        node: NodeId,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// An in-order neighbour pair is out of order under the comparator.
    OrderViolation {
        /// The node visited first in order.
        earlier: NodeId,
        /// The node visited next, which compares less than `earlier`.
        later: NodeId,
    },
    /// A child's parent link does not point back at its parent.
    BrokenParentLink {
        /// The child whose back-reference is wrong.
        node: NodeId,
    },
    /// The number of reachable nodes differs from the recorded size.
    SizeMismatch {
        /// The size counter.
        recorded: usize,
        /// The number of nodes reachable from the root.
        reachable: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedRoot { node } => write!(formatter, "root {node} is red"),
            Self::RedRedEdge { parent, child } => {
                write!(formatter, "red node {parent} has red child {child}")
            }
            Self::BlackHeightMismatch { node, left, right } => write!(
                formatter,
                "black height below {node} differs: left {left}, right {right}"
            ),
            Self::OrderViolation { earlier, later } => {
                write!(formatter, "node {later} sorts before its predecessor {earlier}")
            }
            Self::BrokenParentLink { node } => {
                write!(formatter, "node {node} has a wrong parent link")
            }
            Self::SizeMismatch {
                recorded,
                reachable,
            } => write!(
                formatter,
                "size is {recorded} but {reachable} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_tree_error_display() {
        assert_eq!(
            format!("{}", TreeError::InvalidIterator),
            "iterator does not reference a live node"
        );
        assert_eq!(format!("{}", TreeError::NotFound), "key not found");
    }

    #[rstest]
    fn test_invariant_violation_display() {
        let violation = InvariantViolation::SizeMismatch {
            recorded: 3,
            reachable: 2,
        };
        assert_eq!(
            format!("{violation}"),
            "size is 3 but 2 nodes are reachable"
        );
    }

    #[rstest]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&TreeError::NotFound);
        assert_error(&InvariantViolation::SizeMismatch {
            recorded: 0,
            reachable: 1,
        });
    }
}
