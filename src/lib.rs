//! # ordtree
//!
//! A red-black tree balancing engine and the ordered containers built on it.
//!
//! ## Overview
//!
//! - [`tree`]: [`RbTree`], the self-balancing binary search tree with
//!   O(log N) insert, lookup, bound queries and deletion, plus a
//!   bidirectional [`Cursor`]
//! - [`comparator`]: the injected total order ([`Comparator`])
//! - [`error`]: [`TreeError`] and the validator's [`InvariantViolation`]
//! - [`containers`]: [`TreeMap`](containers::TreeMap),
//!   [`TreeMultiMap`](containers::TreeMultiMap), [`TreeSet`](containers::TreeSet)
//!   and [`TreeMultiSet`](containers::TreeMultiSet)
//! - [`sync`]: pluggable lock strategies and the [`Synchronized`](sync::Synchronized)
//!   wrapper
//!
//! The tree itself holds no synchronization. It permits duplicate keys;
//! uniqueness is a policy of the wrapping container.
//!
//! ## Feature Flags
//!
//! - `containers`: map, multi-map, set and multi-set wrappers
//! - `sync`: lock strategies (requires `containers`, pulls in `parking_lot`)
//! - `full`: everything
//!
//! ## Quick Start
//!
//! ```rust
//! use ordtree::prelude::*;
//!
//! let mut tree = RbTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key * 10);
//! }
//!
//! let keys: Vec<i32> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! let five = tree.find(&5).unwrap();
//! assert_eq!(tree.delete(five), Some((5, 50)));
//! assert_eq!(tree.len(), 6);
//! assert!(tree.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ordtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::*;
    pub use crate::error::*;
    pub use crate::tree::*;

    #[cfg(feature = "containers")]
    pub use crate::containers::*;

    #[cfg(feature = "sync")]
    pub use crate::sync::*;
}

pub mod comparator;
pub mod error;
pub mod tree;

#[cfg(feature = "containers")]
pub mod containers;

#[cfg(feature = "sync")]
pub mod sync;

pub use comparator::{Comparator, FnComparator, NaturalOrder, ReverseOrder};
pub use error::{InvariantViolation, TreeError};
pub use tree::{Cursor, CursorMut, NodeId, RbTree};
