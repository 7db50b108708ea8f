//! Integration tests for RbTree.
//!
//! Covers the concrete insert/delete scenarios, duplicate-key bound queries,
//! cursor protocol, handle identity across deletions, and a randomized
//! stress run validated after every operation.

use ordtree::comparator::{self, ReverseOrder};
use ordtree::{NaturalOrder, NodeId, RbTree, TreeError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use std::collections::BTreeMap;
use std::ops::Bound;

// =============================================================================
// Helpers
// =============================================================================

fn tree_of(keys: &[i32]) -> RbTree<i32, i32> {
    let mut tree = RbTree::new();
    for key in keys {
        tree.insert(*key, key * 100);
    }
    tree
}

fn keys_of<V, C>(tree: &RbTree<i32, V, C>) -> Vec<i32> {
    tree.keys().copied().collect()
}

/// Seeded with a fixed algorithm; a failing run replays exactly.
fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0x5EED)
}

// =============================================================================
// Concrete Scenarios
// =============================================================================

#[rstest]
fn test_insert_then_delete_root_scenario() {
    let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(keys_of(&tree), vec![1, 3, 4, 5, 7, 8, 9]);

    assert_eq!(tree.delete_key(&5), Some((5, 500)));
    assert_eq!(keys_of(&tree), vec![1, 3, 4, 7, 8, 9]);
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.len(), 6);
}

#[rstest]
fn test_duplicate_keys_scenario() {
    let mut tree = RbTree::new();
    let first = tree.insert(10, 'a');
    tree.insert(10, 'b');
    tree.insert(10, 'c');

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.lower_bound(&10), Some(first));
    assert_eq!(tree.upper_bound(&10), None);
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_empty_tree_operations_are_noops() {
    let mut tree: RbTree<i32, i32> = RbTree::new();
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.find(&1), None);
    assert_eq!(tree.lower_bound(&1), None);
    assert_eq!(tree.delete_key(&1), None);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.validate(), Ok(()));
}

// =============================================================================
// Search Tests
// =============================================================================

#[rstest]
#[case(0, Some(1), Some(1))]
#[case(1, Some(1), Some(3))]
#[case(2, Some(3), Some(3))]
#[case(6, Some(7), Some(7))]
#[case(9, Some(9), None)]
#[case(10, None, None)]
fn test_bounds_against_sample(
    #[case] probe: i32,
    #[case] lower: Option<i32>,
    #[case] upper: Option<i32>,
) {
    let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    let key_at = |id: NodeId| *tree.key(id).unwrap();
    assert_eq!(tree.lower_bound(&probe).map(key_at), lower);
    assert_eq!(tree.upper_bound(&probe).map(key_at), upper);
}

#[rstest]
fn test_find_with_duplicates_lands_on_equal_key() {
    let tree = tree_of(&[4, 4, 2, 4, 6, 4]);
    let found = tree.find(&4).unwrap();
    assert_eq!(tree.key(found), Ok(&4));
    assert_eq!(tree.find(&5), None);
}

#[rstest]
fn test_bounds_under_reverse_order() {
    let mut tree = RbTree::with_comparator(ReverseOrder(NaturalOrder));
    for key in [1, 5, 3] {
        tree.insert(key, ());
    }
    assert_eq!(keys_of(&tree), vec![5, 3, 1]);
    let lower = tree.lower_bound(&4).unwrap();
    assert_eq!(tree.key(lower), Ok(&3));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_custom_comparator_groups_equivalent_keys() {
    let by_tens = comparator::from_fn(|left: &i32, right: &i32| (left / 10).cmp(&(right / 10)));
    let mut tree = RbTree::with_comparator(by_tens);
    for key in [21, 5, 27, 13, 20] {
        tree.insert(key, ());
    }
    // Equivalent keys keep insertion order.
    assert_eq!(keys_of(&tree), vec![5, 13, 21, 27, 20]);
    assert_eq!(
        tree.range(Bound::Included(&25), Bound::Included(&25)).count(),
        3
    );
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[rstest]
fn test_cursor_walks_both_directions() {
    let tree = tree_of(&[2, 1, 3]);
    let mut cursor = tree.cursor_first();
    let mut forward = Vec::new();
    while cursor.is_valid() {
        forward.push(*cursor.key().unwrap());
        cursor.move_next();
    }
    assert_eq!(forward, vec![1, 2, 3]);

    let mut cursor = tree.cursor_last();
    let mut backward = Vec::new();
    while let Ok(key) = cursor.key() {
        backward.push(*key);
        cursor.move_prev();
    }
    assert_eq!(backward, vec![3, 2, 1]);
}

#[rstest]
fn test_end_cursor_reports_invalid_iterator() {
    let tree = tree_of(&[1]);
    let mut cursor = tree.cursor_first();
    cursor.move_next();
    assert!(!cursor.is_valid());
    assert_eq!(cursor.key(), Err(TreeError::InvalidIterator));
    assert_eq!(cursor.value(), Err(TreeError::InvalidIterator));
    cursor.move_next();
    assert!(!cursor.is_valid());
}

#[rstest]
fn test_cursor_clone_and_equality() {
    let tree = tree_of(&[1, 2, 3]);
    let mut cursor = tree.cursor_first();
    let snapshot = cursor.clone();
    assert_eq!(cursor, snapshot);

    cursor.move_next();
    assert_ne!(cursor, snapshot);
    assert_eq!(snapshot.key(), Ok(&1));

    cursor.move_next();
    cursor.move_next();
    let mut other_end = tree.cursor_last();
    other_end.move_next();
    assert_eq!(cursor, other_end);
}

#[rstest]
fn test_cursor_mut_set_value_and_remove() {
    let mut tree = tree_of(&[1, 2, 3, 4]);
    {
        let mut cursor = tree.cursor_mut_first();
        assert_eq!(cursor.set_value(-1), Ok(100));
        cursor.move_next();
        assert_eq!(cursor.remove_current(), Ok((2, 200)));
        assert_eq!(cursor.key(), Ok(&3));
    }
    assert_eq!(keys_of(&tree), vec![1, 3, 4]);
    assert_eq!(tree.get(&1), Some(&-1));
    assert_eq!(tree.validate(), Ok(()));
}

// =============================================================================
// Handle Identity Tests
// =============================================================================

#[rstest]
fn test_handles_survive_unrelated_deletions() {
    let keys: Vec<i32> = (0..200).collect();
    let mut tree = tree_of(&keys);
    let handles: Vec<(i32, NodeId)> = keys
        .iter()
        .map(|key| (*key, tree.find(key).unwrap()))
        .collect();

    for (key, id) in &handles {
        if key % 3 == 0 {
            assert_eq!(tree.delete(*id), Some((*key, key * 100)));
        }
    }

    for (key, id) in &handles {
        if key % 3 == 0 {
            assert!(!tree.contains_node(*id));
            assert_eq!(tree.key(*id), Err(TreeError::InvalidIterator));
        } else {
            assert_eq!(tree.key(*id), Ok(key));
        }
    }
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_delete_stale_handle_is_noop() {
    let mut tree = tree_of(&[1, 2]);
    let one = tree.find(&1).unwrap();
    assert!(tree.delete(one).is_some());
    assert_eq!(tree.delete(one), None);
    assert_eq!(tree.len(), 1);
}

#[rstest]
fn test_clear_invalidates_handles() {
    let mut tree = tree_of(&[1, 2, 3]);
    let two = tree.find(&2).unwrap();
    tree.clear();
    assert_eq!(tree.value(two), Err(TreeError::InvalidIterator));
    assert_eq!(tree.len(), 0);
    tree.insert(5, 5);
    assert_eq!(keys_of(&tree), vec![5]);
}

// =============================================================================
// Traversal Tests
// =============================================================================

#[rstest]
fn test_traversal_early_exit() {
    let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    let mut seen = Vec::new();
    tree.traversal(|key, _| {
        seen.push(*key);
        *key != 4
    });
    assert_eq!(seen, vec![1, 3, 4]);
}

#[rstest]
fn test_equality_ignores_shape() {
    let ascending = tree_of(&[1, 2, 3, 4, 5, 6]);
    let scrambled = tree_of(&[4, 6, 1, 5, 2, 3]);
    assert_eq!(ascending, scrambled);
    assert_eq!(format!("{:?}", tree_of(&[2, 1])), "{1: 100, 2: 200}");
}

// =============================================================================
// Stress
// =============================================================================

#[rstest]
fn test_stress_insert_and_delete_validated_every_step() {
    const INSERTS: usize = 10_000;
    let mut random = seeded_rng();
    let mut tree = RbTree::new();
    let mut model: BTreeMap<i64, usize> = BTreeMap::new();
    let mut live: Vec<i64> = Vec::new();

    for step in 0..INSERTS {
        let key = random.random_range(0..5_000_i64);
        tree.insert(key, step);
        *model.entry(key).or_default() += 1;
        live.push(key);
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.len(), live.len());

        if step % 2 == 1 {
            let victim = live.swap_remove(random.random_range(0..live.len()));
            assert_eq!(tree.delete_key(&victim).map(|(key, _)| key), Some(victim));
            let count = model.entry(victim).or_default();
            *count -= 1;
            if *count == 0 {
                model.remove(&victim);
            }
            assert_eq!(tree.validate(), Ok(()));
            assert_eq!(tree.len(), live.len());
        }
    }

    assert_eq!(tree.len(), INSERTS / 2);
    let expected: Vec<i64> = model
        .iter()
        .flat_map(|(key, count)| std::iter::repeat_n(*key, *count))
        .collect();
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), expected);
}
