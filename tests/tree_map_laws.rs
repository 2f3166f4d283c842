//! Property-based tests for the tree maps.
//!
//! These tests verify that both balancing schemes satisfy the ordered map
//! laws and their structural invariants using proptest.

use arbor::tree::{AvlTreeMap, OrderedMap, RedBlackTreeMap, TreeKind, TreeMap};
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Operation {
    Insert(i16, i32),
    Remove(i16),
}

/// Keys are drawn from a small range so that overwrites and hits on
/// removal are frequent.
fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (-64_i16..64, any::<i32>()).prop_map(|(key, value)| Operation::Insert(key, value)),
        2 => (-64_i16..64).prop_map(Operation::Remove),
    ]
}

fn operations(max_length: usize) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation(), 0..max_length)
}

fn tree_kind() -> impl Strategy<Value = TreeKind> {
    prop_oneof![Just(TreeKind::Avl), Just(TreeKind::RedBlack)]
}

fn apply(map: &mut dyn OrderedMap<i16, i32>, operation: &Operation) {
    match *operation {
        Operation::Insert(key, value) => {
            map.insert(key, value);
        }
        Operation::Remove(key) => {
            map.remove(&key);
        }
    }
}

fn arbitrary_map() -> impl Strategy<Value = TreeMap<i16, i32>> {
    (tree_kind(), operations(60)).prop_map(|(kind, script)| {
        let mut map = TreeMap::new(kind);
        for operation in &script {
            apply(&mut map, operation);
        }
        map
    })
}

// =============================================================================
// Structural Invariants
// =============================================================================

proptest! {
    /// Law: iteration yields strictly increasing keys after any sequence of
    /// operations, and every invariant holds after every single operation.
    #[test]
    fn prop_invariants_hold_after_every_operation(
        kind in tree_kind(),
        script in operations(120)
    ) {
        let mut map = TreeMap::new(kind);
        for operation in &script {
            apply(&mut map, operation);
            prop_assert_eq!(map.validate(), Ok(()));
        }
        let keys: Vec<i16> = map.iter().map(|(key, _)| *key).collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Law: len equals the number of entries visited by a full traversal.
    #[test]
    fn prop_len_matches_traversal(map in arbitrary_map()) {
        prop_assert_eq!(map.len(), map.iter().count());
        prop_assert_eq!(map.is_empty(), map.iter().next().is_none());
    }

    /// Law: AVL height never exceeds 1.44 log2(n + 2).
    #[test]
    fn prop_avl_height_bound(keys in prop::collection::vec(any::<i32>(), 1..300)) {
        let map: AvlTreeMap<i32, ()> = keys.into_iter().map(|key| (key, ())).collect();
        let height = map.height().unwrap_or(0) as f64;
        let bound = 1.45 * ((map.len() + 2) as f64).log2();
        prop_assert!(height <= bound, "height {} exceeds {}", height, bound);
    }

    /// Law: Red-Black height never exceeds 2 log2(n + 1).
    #[test]
    fn prop_red_black_height_bound(keys in prop::collection::vec(any::<i32>(), 1..300)) {
        let map: RedBlackTreeMap<i32, ()> = keys.into_iter().map(|key| (key, ())).collect();
        let height = (map.height().unwrap_or(0) + 1) as f64;
        let bound = 2.0 * ((map.len() + 1) as f64).log2();
        prop_assert!(height <= bound, "height {} exceeds {}", height, bound);
    }
}

// =============================================================================
// Overwrite Laws
// =============================================================================

proptest! {
    /// Law: put(k, v1) then put(k, v2) keeps len, and get(k) == v2.
    /// The first put returns absent for a fresh key, the second returns v1.
    #[test]
    fn prop_overwrite_law(
        mut map in arbitrary_map(),
        key: i16,
        first: i32,
        second: i32
    ) {
        map.remove(&key);
        let length = map.len();

        prop_assert_eq!(map.insert(key, first), None);
        prop_assert_eq!(map.len(), length + 1);
        prop_assert_eq!(map.insert(key, second), Some(first));
        prop_assert_eq!(map.len(), length + 1);
        prop_assert_eq!(map.get(&key), Some(&second));
    }

    /// Law: get after insert returns the inserted value.
    #[test]
    fn prop_get_insert_law(mut map in arbitrary_map(), key: i16, value: i32) {
        map.insert(key, value);
        prop_assert_eq!(map.get(&key), Some(&value));
    }

    /// Law: insert does not affect other keys.
    #[test]
    fn prop_get_insert_other_law(
        mut map in arbitrary_map(),
        key1: i16,
        key2: i16,
        value: i32
    ) {
        prop_assume!(key1 != key2);
        let before = map.get(&key2).copied();
        map.insert(key1, value);
        prop_assert_eq!(map.get(&key2).copied(), before);
    }
}

// =============================================================================
// Removal Laws
// =============================================================================

proptest! {
    /// Law: removing an absent key returns None and changes nothing.
    #[test]
    fn prop_remove_absent_law(mut map in arbitrary_map(), key: i16) {
        map.remove(&key);
        let before = map.clone();

        prop_assert_eq!(map.remove(&key), None);
        prop_assert_eq!(&map, &before);
        prop_assert_eq!(map.height(), before.height());
    }

    /// Law: removing a present key returns its value, shrinks len by one and
    /// leaves the key absent.
    #[test]
    fn prop_remove_present_law(mut map in arbitrary_map(), key: i16, value: i32) {
        map.insert(key, value);
        let length = map.len();

        prop_assert_eq!(map.remove(&key), Some(value));
        prop_assert_eq!(map.len(), length - 1);
        prop_assert!(!map.contains_key(&key));
        prop_assert_eq!(map.validate(), Ok(()));
    }

    /// Law: remove does not affect other keys.
    #[test]
    fn prop_remove_other_law(mut map in arbitrary_map(), key1: i16, key2: i16) {
        prop_assume!(key1 != key2);
        let before = map.get(&key2).copied();
        map.remove(&key1);
        prop_assert_eq!(map.get(&key2).copied(), before);
    }
}

// =============================================================================
// Model Equivalence
// =============================================================================

proptest! {
    /// Law: both kinds agree with BTreeMap on every return value and on the
    /// final contents.
    #[test]
    fn prop_matches_btree_map(kind in tree_kind(), script in operations(200)) {
        let mut map = TreeMap::new(kind);
        let mut model = BTreeMap::new();

        for operation in script {
            match operation {
                Operation::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                Operation::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
            }
        }

        prop_assert!(map.iter().eq(model.iter()));
        prop_assert_eq!(map.first_key_value(), model.first_key_value());
        prop_assert_eq!(map.last_key_value(), model.last_key_value());
    }

    /// Law: into_iter of a map built from entries equals the sorted, deduplicated
    /// entries with the last value winning.
    #[test]
    fn prop_collect_then_into_iter(entries in prop::collection::vec((any::<i16>(), any::<i32>()), 0..80)) {
        let avl: AvlTreeMap<i16, i32> = entries.iter().copied().collect();
        let red_black: RedBlackTreeMap<i16, i32> = entries.iter().copied().collect();
        let model: BTreeMap<i16, i32> = entries.into_iter().collect();

        let expected: Vec<(i16, i32)> = model.into_iter().collect();
        prop_assert_eq!(avl.into_iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(red_black.into_iter().collect::<Vec<_>>(), expected);
    }
}
