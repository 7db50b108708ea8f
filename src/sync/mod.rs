//! Pluggable lock strategies for sharing containers.
//!
//! [`RbTree`](crate::RbTree) and the containers hold no synchronization of
//! their own. [`Synchronized`] wraps a container in a [`LockStrategy`]
//! chosen at construction time and routes every call through it: an
//! exclusive lock for insert, remove and clear, a shared lock for lookups,
//! bound queries and traversal.
//!
//! | Strategy       | Backing                  | Shared access          | Thread-safe |
//! |----------------|--------------------------|------------------------|-------------|
//! | [`NoopLock`]   | `RefCell`                | concurrent borrows     | No          |
//! | [`MutexLock`]  | `parking_lot::Mutex`     | serialized             | Yes         |
//! | [`RwLock`]     | `parking_lot::RwLock`    | concurrent readers     | Yes         |
//!
//! # Examples
//!
//! ```rust
//! use ordtree::containers::TreeMap;
//! use ordtree::sync::{RwLock, Synchronized};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let shared: Arc<Synchronized<TreeMap<u32, u32>, RwLock<_>>> =
//!     Arc::new(Synchronized::new(TreeMap::new()));
//!
//! let workers: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let shared = Arc::clone(&shared);
//!         thread::spawn(move || {
//!             for offset in 0..25 {
//!                 shared.insert(worker * 25 + offset, worker);
//!             }
//!         })
//!     })
//!     .collect();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//!
//! assert_eq!(shared.len(), 100);
//! assert_eq!(shared.get_cloned(&30), Some(1));
//! ```

use crate::comparator::Comparator;
use crate::containers::TreeMap;
use std::cell::RefCell;
use std::marker::PhantomData;

// =============================================================================
// LockStrategy Definition
// =============================================================================

/// A way of guarding a value of type `T`.
///
/// Implementations decide what "shared" and "exclusive" access mean; the
/// only contract is that no shared access overlaps an exclusive one.
pub trait LockStrategy<T> {
    /// Wraps `value`.
    fn new(value: T) -> Self
    where
        Self: Sized;

    /// Runs `action` with shared access to the value.
    fn with_shared<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Runs `action` with exclusive access to the value.
    fn with_exclusive<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut T) -> R;

    /// Unwraps the value.
    fn into_inner(self) -> T;
}

// =============================================================================
// Strategies
// =============================================================================

/// No synchronization, for callers that guarantee single-threaded access.
///
/// Backed by a [`RefCell`], so the wrapper is `!Sync`.
///
/// # Panics
///
/// Exclusive access requested from inside another access closure on the same
/// value panics, as a `RefCell` double borrow does.
#[derive(Debug, Default)]
pub struct NoopLock<T> {
    cell: RefCell<T>,
}

impl<T> LockStrategy<T> for NoopLock<T> {
    fn new(value: T) -> Self {
        Self {
            cell: RefCell::new(value),
        }
    }

    fn with_shared<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        action(&self.cell.borrow())
    }

    fn with_exclusive<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        action(&mut self.cell.borrow_mut())
    }

    fn into_inner(self) -> T {
        self.cell.into_inner()
    }
}

/// A single mutex; shared and exclusive access both take it.
#[derive(Debug, Default)]
pub struct MutexLock<T> {
    mutex: parking_lot::Mutex<T>,
}

impl<T> LockStrategy<T> for MutexLock<T> {
    fn new(value: T) -> Self {
        Self {
            mutex: parking_lot::Mutex::new(value),
        }
    }

    fn with_shared<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        log::trace!("acquiring mutex for shared access");
        action(&self.mutex.lock())
    }

    fn with_exclusive<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        log::trace!("acquiring mutex for exclusive access");
        action(&mut self.mutex.lock())
    }

    fn into_inner(self) -> T {
        self.mutex.into_inner()
    }
}

/// A reader-writer lock; shared access takes the read side.
#[derive(Debug, Default)]
pub struct RwLock<T> {
    lock: parking_lot::RwLock<T>,
}

impl<T> LockStrategy<T> for RwLock<T> {
    fn new(value: T) -> Self {
        Self {
            lock: parking_lot::RwLock::new(value),
        }
    }

    fn with_shared<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        log::trace!("acquiring read lock");
        action(&self.lock.read())
    }

    fn with_exclusive<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        log::trace!("acquiring write lock");
        action(&mut self.lock.write())
    }

    fn into_inner(self) -> T {
        self.lock.into_inner()
    }
}

// =============================================================================
// Synchronized Definition
// =============================================================================

/// A container guarded by the lock strategy `L`.
///
/// [`read`](Self::read) and [`write`](Self::write) give closure access to the
/// wrapped value for anything the convenience methods do not cover.
pub struct Synchronized<T, L = NoopLock<T>> {
    lock: L,
    marker: PhantomData<T>,
}

impl<T, L: LockStrategy<T>> Synchronized<T, L> {
    /// Wraps `value` in a fresh lock.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            lock: L::new(value),
            marker: PhantomData,
        }
    }

    /// Runs `action` under the shared lock.
    pub fn read<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.lock.with_shared(action)
    }

    /// Runs `action` under the exclusive lock.
    pub fn write<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.lock.with_exclusive(action)
    }

    /// Unwraps the container.
    pub fn into_inner(self) -> T {
        self.lock.into_inner()
    }
}

impl<T: Default, L: LockStrategy<T>> Default for Synchronized<T, L> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug, L: LockStrategy<T>> std::fmt::Debug for Synchronized<T, L> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.read(|value| formatter.debug_tuple("Synchronized").field(value).finish())
    }
}

impl<K, V, C, L> Synchronized<TreeMap<K, V, C>, L>
where
    C: Comparator<K>,
    L: LockStrategy<TreeMap<K, V, C>>,
{
    /// Inserts under the exclusive lock; returns the previous value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.write(|map| map.insert(key, value))
    }

    /// Clones the value under `key` out of the shared lock.
    #[must_use]
    pub fn get_cloned(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.read(|map| map.get(key).cloned())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.read(|map| map.contains_key(key))
    }

    /// Removes under the exclusive lock.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.write(|map| map.remove(key))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(|map| map.len())
    }

    /// Returns `true` if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(|map| map.is_empty())
    }

    /// Removes every entry under the exclusive lock.
    pub fn clear(&self) {
        self.write(|map| map.clear());
    }

    /// Visits entries in ascending key order under the shared lock.
    pub fn traversal<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.read(|map| map.traversal(visitor));
    }
}

static_assertions::assert_impl_all!(
    Synchronized<TreeMap<i32, String>, RwLock<TreeMap<i32, String>>>: Send, Sync
);
static_assertions::assert_impl_all!(
    Synchronized<TreeMap<i32, String>, MutexLock<TreeMap<i32, String>>>: Send, Sync
);
static_assertions::assert_not_impl_any!(Synchronized<TreeMap<i32, String>>: Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn exercise<L: LockStrategy<TreeMap<i32, i32>>>() {
        let map: Synchronized<TreeMap<i32, i32>, L> = Synchronized::default();
        assert!(map.is_empty());
        assert_eq!(map.insert(2, 20), None);
        assert_eq!(map.insert(1, 10), None);
        assert_eq!(map.insert(2, 21), Some(20));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_cloned(&2), Some(21));
        assert!(map.contains_key(&1));

        let mut keys = Vec::new();
        map.traversal(|key, _| {
            keys.push(*key);
            true
        });
        assert_eq!(keys, vec![1, 2]);

        assert_eq!(map.remove(&1), Some(10));
        assert_eq!(map.read(|inner| inner.tree().validate()), Ok(()));
        map.clear();
        assert!(map.into_inner().is_empty());
    }

    #[rstest]
    fn test_noop_lock() {
        exercise::<NoopLock<_>>();
    }

    #[rstest]
    fn test_mutex_lock() {
        exercise::<MutexLock<_>>();
    }

    #[rstest]
    fn test_rw_lock() {
        exercise::<RwLock<_>>();
    }

    #[rstest]
    fn test_write_closure_returns_value() {
        let map: Synchronized<TreeMap<&str, i32>> = Synchronized::new(TreeMap::new());
        let previous = map.write(|inner| {
            inner.insert("a", 1);
            inner.insert("a", 2)
        });
        assert_eq!(previous, Some(1));
        assert_eq!(format!("{map:?}"), "Synchronized({\"a\": 2})");
    }
}
