#![cfg(feature = "sync")]
//! Integration tests for the lock strategies.

use ordtree::containers::TreeMap;
use ordtree::sync::{LockStrategy, MutexLock, NoopLock, RwLock, Synchronized};
use rstest::rstest;
use std::sync::Arc;
use std::thread;

type Shared<L> = Arc<Synchronized<TreeMap<u32, u32>, L>>;

fn hammer<L>(shared: &Shared<L>, threads: u32, per_thread: u32)
where
    L: LockStrategy<TreeMap<u32, u32>> + Send + Sync + 'static,
{
    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let shared = Arc::clone(shared);
            thread::spawn(move || {
                for offset in 0..per_thread {
                    let key = worker * per_thread + offset;
                    shared.insert(key, worker);
                    assert!(shared.contains_key(&key));
                    if offset % 4 == 0 {
                        assert_eq!(shared.remove(&key), Some(worker));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[rstest]
fn test_rw_lock_concurrent_writers() {
    let shared: Shared<RwLock<_>> = Arc::new(Synchronized::default());
    hammer(&shared, 8, 200);

    assert_eq!(shared.len(), 8 * 150);
    assert_eq!(shared.read(|map| map.tree().validate()), Ok(()));
}

#[rstest]
fn test_mutex_lock_concurrent_writers() {
    let shared: Shared<MutexLock<_>> = Arc::new(Synchronized::default());
    hammer(&shared, 4, 100);

    assert_eq!(shared.len(), 4 * 75);
    assert_eq!(shared.get_cloned(&101), Some(1));
    assert_eq!(shared.get_cloned(&100), None);
}

#[rstest]
fn test_readers_see_consistent_snapshots() {
    let shared: Shared<RwLock<_>> = Arc::new(Synchronized::default());
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for key in 0..500 {
                shared.write(|map| {
                    map.insert(key, key);
                });
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..50 {
                    let (length, walked) = shared.read(|map| (map.len(), map.iter().count()));
                    assert_eq!(length, walked);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(shared.len(), 500);
}

#[rstest]
fn test_noop_lock_single_thread() {
    let map: Synchronized<TreeMap<&str, i32>, NoopLock<_>> = Synchronized::new(TreeMap::new());
    map.insert("a", 1);
    map.insert("b", 2);

    let mut visited = Vec::new();
    map.traversal(|key, value| {
        visited.push((*key, *value));
        true
    });
    assert_eq!(visited, vec![("a", 1), ("b", 2)]);

    map.clear();
    assert!(map.is_empty());
}

#[rstest]
fn test_into_inner_returns_container() {
    let map: Synchronized<TreeMap<u8, u8>, MutexLock<_>> = Synchronized::default();
    map.insert(1, 1);
    let inner = map.into_inner();
    assert_eq!(inner.get(&1), Some(&1));
}
