//! Injected total orders for [`RbTree`](crate::RbTree) keys.
//!
//! The tree never calls [`Ord`] directly. Every comparison goes through a
//! [`Comparator`] chosen at construction time, so the same balancing engine
//! can order keys naturally, in reverse, or by any caller-supplied rule.
//!
//! A comparator must define a consistent total preorder over every key ever
//! inserted. An inconsistent comparator (non-transitive or
//! non-deterministic) silently corrupts the tree; nothing detects it at
//! runtime except [`RbTree::validate`](crate::RbTree::validate).
//!
//! # Examples
//!
//! ```rust
//! use ordtree::comparator::{self, Comparator, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder(NaturalOrder).compare(&1, &2), Ordering::Greater);
//!
//! let by_length = comparator::from_fn(|left: &&str, right: &&str| left.len().cmp(&right.len()));
//! assert_eq!(by_length.compare(&"ab", &"c"), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A total order over keys of type `K`.
///
/// `compare(a, b)` returns [`Ordering::Less`] when `a` sorts before `b`,
/// [`Ordering::Equal`] when they are equivalent and [`Ordering::Greater`]
/// otherwise.
pub trait Comparator<K> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

impl<K, C: Comparator<K> + ?Sized> Comparator<K> for &C {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (**self).compare(left, right)
    }
}

// =============================================================================
// NaturalOrder
// =============================================================================

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

// =============================================================================
// ReverseOrder
// =============================================================================

/// Flips the order of the wrapped comparator.
///
/// # Examples
///
/// ```rust
/// use ordtree::{NaturalOrder, RbTree, ReverseOrder};
///
/// let mut tree = RbTree::with_comparator(ReverseOrder(NaturalOrder));
/// tree.insert(1, ());
/// tree.insert(3, ());
/// tree.insert(2, ());
///
/// let keys: Vec<i32> = tree.keys().copied().collect();
/// assert_eq!(keys, vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder<C>(pub C);

impl<K, C: Comparator<K>> Comparator<K> for ReverseOrder<C> {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self.0.compare(right, left)
    }
}

// =============================================================================
// FnComparator
// =============================================================================

/// Adapts a closure `Fn(&K, &K) -> Ordering` into a [`Comparator`].
///
/// Build one with [`from_fn`], which pins down the closure's argument
/// types so inference works at the call site.
#[derive(Clone, Copy)]
pub struct FnComparator<F> {
    function: F,
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("FnComparator")
    }
}

impl<K, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.function)(left, right)
    }
}

/// Creates a comparator from a closure.
///
/// # Examples
///
/// ```rust
/// use ordtree::{RbTree, comparator};
///
/// let mut tree = RbTree::with_comparator(comparator::from_fn(|left: &i32, right: &i32| {
///     left.abs().cmp(&right.abs())
/// }));
/// tree.insert(-3, "minus three");
/// tree.insert(2, "two");
///
/// let keys: Vec<i32> = tree.keys().copied().collect();
/// assert_eq!(keys, vec![2, -3]);
/// ```
pub const fn from_fn<K, F>(function: F) -> FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    FnComparator { function }
}
