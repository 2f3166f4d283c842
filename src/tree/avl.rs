//! Mutable ordered map based on an AVL tree.
//!
//! This module provides [`AvlTreeMap`], an ordered map that keeps the heights
//! of the two subtrees of every node within one of each other.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) insert
//! - O(log N) remove
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//!
//! # Rebalancing
//!
//! Every node stores its height (0 for a leaf, -1 for an absent child).
//! After an insertion or a removal the heights are recomputed on the path
//! from the changed position up to the root. Any node found with a balance
//! factor (`height(left) - height(right)`) outside `-1..=1` is repaired with
//! one of four shapes:
//!
//! | Shape | Condition                                 | Fix                              |
//! |-------|-------------------------------------------|----------------------------------|
//! | LL    | left child is not right-heavy             | rotate right at the node         |
//! | LR    | left child is right-heavy                 | rotate left at the child, then right at the node |
//! | RR    | right child is not left-heavy             | rotate left at the node          |
//! | RL    | right child is left-heavy                 | rotate right at the child, then left at the node |
//!
//! The shape is chosen from the child's balance factor, never from which
//! grandchildren happen to exist. After a removal the child may be perfectly
//! balanced; that case takes the single rotation.
//!
//! # Examples
//!
//! ```rust
//! use arbor::tree::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! map.insert(3, "three");
//! map.insert(2, "two");
//! map.insert(1, "one");
//!
//! // A single right rotation made 2 the root.
//! assert_eq!(map.height(), Some(1));
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use tracing::debug;

use super::arena::NodeId;
use super::balance::Height;
use super::error::TreeError;
use super::iter::{IntoIter, Iter, Keys, Values, ValuesMut};
use super::macros::impl_tree_map;
use super::ordered_map::{OrderedMap, TreeKind};
use super::raw::{RawTree, Search};

/// Imbalance shapes repaired by [`AvlTreeMap`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Shape {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

/// An ordered map based on an AVL tree.
///
/// Keys must implement [`Ord`]. Entries are kept in ascending key order and
/// the tree height stays within about `1.44 log2(N)`.
///
/// # Time Complexity
///
/// | Operation        | Complexity |
/// |------------------|------------|
/// | `get`            | O(log N)   |
/// | `insert`         | O(log N)   |
/// | `remove`         | O(log N)   |
/// | `contains_key`   | O(log N)   |
/// | `contains_value` | O(N)       |
/// | `len`            | O(1)       |
/// | `height`         | O(1)       |
///
/// # Examples
///
/// ```rust
/// use arbor::tree::AvlTreeMap;
///
/// let mut map = AvlTreeMap::new();
/// assert_eq!(map.insert(1, "one"), None);
/// assert_eq!(map.insert(1, "ONE"), Some("one"));
/// assert_eq!(map.get(&1), Some(&"ONE"));
/// assert_eq!(map.remove(&1), Some("ONE"));
/// assert!(map.is_empty());
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V> {
    raw: RawTree<K, V, Height>,
}

impl_tree_map!(AvlTreeMap, TreeKind::Avl);

impl<K, V> AvlTreeMap<K, V> {
    /// Height of the tree: 0 for a single entry, `None` when empty. O(1).
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw
            .root
            .and_then(|root| usize::try_from(self.raw.height(Some(root))).ok())
    }

    /// Recomputes heights from `start` up to the root, repairing every
    /// unbalanced node on the way.
    fn rebalance_upward(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            self.raw.refresh_height(id);
            let subtree_root = self.restore_balance(id);
            current = self.raw.arena[subtree_root].parent;
        }
    }

    /// Repairs `id` if its balance factor is out of range and returns the
    /// root of the (possibly rotated) subtree.
    fn restore_balance(&mut self, id: NodeId) -> NodeId {
        let balance_factor = self.raw.balance_factor(id);
        let shape = if balance_factor > 1 {
            let Some(left) = self.raw.arena[id].left else {
                return id;
            };
            if self.raw.balance_factor(left) < 0 {
                Shape::LeftRight
            } else {
                Shape::LeftLeft
            }
        } else if balance_factor < -1 {
            let Some(right) = self.raw.arena[id].right else {
                return id;
            };
            if self.raw.balance_factor(right) > 0 {
                Shape::RightLeft
            } else {
                Shape::RightRight
            }
        } else {
            return id;
        };

        let subtree_root = match shape {
            Shape::LeftLeft => self.raw.rotate_right(id),
            Shape::LeftRight => {
                if let Some(left) = self.raw.arena[id].left {
                    self.raw.rotate_left(left);
                }
                self.raw.rotate_right(id)
            }
            Shape::RightRight => self.raw.rotate_left(id),
            Shape::RightLeft => {
                if let Some(right) = self.raw.arena[id].right {
                    self.raw.rotate_right(right);
                }
                self.raw.rotate_left(id)
            }
        };
        debug!(?shape, balance_factor, "restored AVL balance");
        subtree_root
    }
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Stores `value` under `key`. O(log N).
    ///
    /// If the key is already present its value is replaced in place, the
    /// old value is returned and the tree is not restructured. Otherwise a
    /// new leaf is attached and the path to the root is rebalanced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// for key in 0..=10 {
    ///     map.insert(key, key * key);
    /// }
    /// assert_eq!(map.len(), 11);
    /// assert!(map.height().unwrap() <= 4);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.search(&key) {
            Search::Found(id) => Some(std::mem::replace(self.raw.value_mut(id), value)),
            Search::Vacant { parent, side } => {
                self.raw.attach(key, value, Height::LEAF, parent, side);
                self.rebalance_upward(parent);
                None
            }
        }
    }

    /// Removes `key` and returns the stored key and value. O(log N).
    ///
    /// A node with a right subtree is not unlinked itself: it takes over the
    /// entry of its in-order successor, and the successor's node is unlinked
    /// instead. Heights are then repaired from the unlinked position to the
    /// root, rotating at every unbalanced ancestor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::tree::AvlTreeMap;
    ///
    /// let mut map: AvlTreeMap<String, u8> = [("a".to_string(), 1)].into_iter().collect();
    /// assert_eq!(map.remove_entry("a"), Some(("a".to_string(), 1)));
    /// assert_eq!(map.remove_entry("a"), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.raw.find(key)?;
        let doomed = self.raw.migrate_for_removal(target);
        let parent = self.raw.splice(doomed);
        self.rebalance_upward(parent);
        let entry = self.raw.release(doomed);
        Some((entry.key, entry.value))
    }

    /// Checks ordering, parent links, stored heights and the AVL balance
    /// bound at every node. O(N).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Corrupted`] describing the first broken invariant.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.raw.validate_avl().map_err(TreeError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keys_of<V>(map: &AvlTreeMap<i32, V>) -> Vec<i32> {
        map.keys().copied().collect()
    }

    /// Root key and its two children, to check rotation outcomes.
    fn top(map: &AvlTreeMap<i32, i32>) -> (i32, Option<i32>, Option<i32>) {
        let root = map.raw.root.unwrap();
        let links = map.raw.arena[root];
        (
            *map.raw.key(root),
            links.left.map(|id| *map.raw.key(id)),
            links.right.map(|id| *map.raw.key(id)),
        )
    }

    fn build(keys: &[i32]) -> AvlTreeMap<i32, i32> {
        keys.iter().map(|&key| (key, key)).collect()
    }

    // =========================================================================
    // Rotation Shapes
    // =========================================================================

    #[rstest]
    #[case::left_left(&[3, 2, 1])]
    #[case::left_right(&[3, 1, 2])]
    #[case::right_right(&[1, 2, 3])]
    #[case::right_left(&[1, 3, 2])]
    fn test_three_key_shapes_settle_on_middle_root(#[case] keys: &[i32]) {
        let map = build(keys);

        assert_eq!(top(&map), (2, Some(1), Some(3)));
        assert_eq!(map.height(), Some(1));
        assert_eq!(map.validate(), Ok(()));
    }

    #[rstest]
    fn test_removal_with_balanced_sibling_takes_single_rotation() {
        //     2              4
        //    / \            / \
        //   1   4    ->    2   5
        //      / \          \
        //     3   5          3
        let mut map = build(&[2, 1, 4, 3, 5]);
        assert_eq!(map.remove(&1), Some(1));

        assert_eq!(top(&map), (4, Some(2), Some(5)));
        assert_eq!(keys_of(&map), vec![2, 3, 4, 5]);
        assert_eq!(map.validate(), Ok(()));
    }

    #[rstest]
    fn test_removal_rebalances_multiple_levels() {
        // Removing from the short side of a left-heavy root: the repair
        // climbs from the leaf all the way up and replaces the root.
        let mut map = build(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        assert_eq!(map.validate(), Ok(()));
        assert_eq!(top(&map), (8, Some(5), Some(11)));

        map.remove(&12);

        assert_eq!(map.validate(), Ok(()));
        assert_eq!(top(&map), (5, Some(3), Some(8)));
        assert_eq!(keys_of(&map), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    // =========================================================================
    // Insert / Remove
    // =========================================================================

    #[rstest]
    fn test_overwrite_keeps_shape_and_length() {
        let mut map = build(&[4, 2, 6, 1, 3]);
        let before = top(&map);

        assert_eq!(map.insert(3, 30), Some(3));

        assert_eq!(map.len(), 5);
        assert_eq!(top(&map), before);
        assert_eq!(map.get(&3), Some(&30));
    }

    #[rstest]
    fn test_ascending_inserts_respect_height_bound() {
        let map = build(&(0..=10).collect::<Vec<_>>());

        assert_eq!(keys_of(&map), (0..=10).collect::<Vec<_>>());
        // ceil(log2(11 + 1)) == 4
        assert!(map.height().unwrap() <= 4);
        assert_eq!(map.validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_each_key_keeps_invariants() {
        let mut map = build(&(0..=10).collect::<Vec<_>>());

        for key in 0..=10 {
            assert_eq!(map.remove(&key), Some(key));
            assert!(!map.contains_key(&key));
            assert_eq!(map.validate(), Ok(()));
        }
        assert!(map.is_empty());
        assert_eq!(map.height(), None);
    }

    #[rstest]
    fn test_remove_root_with_two_children_migrates_successor() {
        let mut map = build(&[2, 1, 3]);
        assert_eq!(map.remove_entry(&2), Some((2, 2)));

        assert_eq!(top(&map), (3, Some(1), None));
        assert_eq!(map.validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_absent_leaves_tree_untouched() {
        let mut map = build(&[5, 3, 8]);
        let before = top(&map);

        assert_eq!(map.remove(&42), None);

        assert_eq!(map.len(), 3);
        assert_eq!(top(&map), before);
    }

    #[rstest]
    fn test_string_keys_with_borrowed_lookup() {
        let mut map = AvlTreeMap::new();
        map.insert("pear".to_string(), 3);
        map.insert("apple".to_string(), 1);

        assert_eq!(map.get("apple"), Some(&1));
        assert_eq!(map["pear"], 3);
        assert_eq!(map.remove("pear"), Some(3));
        assert!(!map.contains_key("pear"));
    }

    #[rstest]
    fn test_first_and_last_entries() {
        let map = build(&[7, 3, 9, 1]);
        assert_eq!(map.first_key_value(), Some((&1, &1)));
        assert_eq!(map.last_key_value(), Some((&9, &9)));
    }

    #[rstest]
    fn test_contains_value() {
        let map: AvlTreeMap<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
        assert!(map.contains_value(&"b"));
        assert!(!map.contains_value(&"z"));
    }

    #[rstest]
    fn test_clear_then_reuse() {
        let mut map = build(&[1, 2, 3]);
        map.clear();
        assert!(map.is_empty());

        map.insert(9, 9);
        assert_eq!(keys_of(&map), vec![9]);
        assert_eq!(map.validate(), Ok(()));
    }

    // =========================================================================
    // Display / Debug / Eq
    // =========================================================================

    #[rstest]
    fn test_display_sorted() {
        let map: AvlTreeMap<i32, &str> = [(3, "c"), (1, "a")].into_iter().collect();
        assert_eq!(format!("{map}"), "{1: a, 3: c}");
        assert_eq!(format!("{}", AvlTreeMap::<i32, i32>::new()), "{}");
    }

    #[rstest]
    fn test_equality_ignores_insertion_order() {
        assert_eq!(build(&[1, 2, 3]), build(&[3, 1, 2]));
        assert_ne!(build(&[1, 2]), build(&[1, 2, 3]));
    }
}
