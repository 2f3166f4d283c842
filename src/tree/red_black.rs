//! Mutable ordered map based on a Red-Black Tree.
//!
//! This module provides [`RedBlackTreeMap`], an ordered map balanced by node
//! colors rather than heights.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) insert
//! - O(log N) remove
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//!
//! # Internal Structure
//!
//! The Red-Black Tree maintains the following invariants:
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. All leaves (NIL) are black
//! 4. Red nodes have only black children
//! 5. Every path from root to leaf has the same number of black nodes
//!
//! These invariants ensure the tree height is O(log N).
//!
//! New nodes are red. Insertion repairs a red node under a red parent by
//! recoloring while the uncle is red, and otherwise with one or two
//! rotations. Removing a black node leaves a "double black" deficit that is
//! pushed upward by recoloring until a rotation (or a red node, or the root)
//! absorbs it.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use tracing::debug;

use super::arena::NodeId;
use super::balance::Color;
use super::error::TreeError;
use super::iter::{IntoIter, Iter, Keys, Values, ValuesMut};
use super::macros::impl_tree_map;
use super::ordered_map::{OrderedMap, TreeKind};
use super::raw::{RawTree, Search};

/// An ordered map based on a Red-Black Tree.
///
/// Keys must implement [`Ord`]. Entries are kept in ascending key order and
/// the tree height stays within `2 log2(N + 1)`.
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
/// | `height`         | O(N)       |
///
/// # Examples
///
/// ```rust
/// use arbor::tree::RedBlackTreeMap;
///
/// let mut map = RedBlackTreeMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &2, &3]);
/// assert_eq!(map.remove(&2), Some("two"));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct RedBlackTreeMap<K, V> {
    raw: RawTree<K, V, Color>,
}

impl_tree_map!(RedBlackTreeMap, TreeKind::RedBlack);

impl<K, V> RedBlackTreeMap<K, V> {
    /// Height of the tree: 0 for a single entry, `None` when empty.
    ///
    /// Colors carry no height information, so this walks the tree. O(N).
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.measure_height()
    }

    /// Restores the invariants after `inserted` was attached as a red leaf.
    fn repair_after_insert(&mut self, inserted: NodeId) {
        let mut node = inserted;
        loop {
            let Some(parent) = self.raw.arena[node].parent else {
                break;
            };
            if !self.raw.is_red(Some(parent)) {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.raw.arena[parent].parent else {
                break;
            };
            let Some(parent_side) = self.raw.arena[grandparent].side_of(parent) else {
                break;
            };
            let uncle = self.raw.arena[grandparent].child(parent_side.opposite());

            if self.raw.is_red(uncle) {
                self.raw.paint(Some(parent), Color::Black);
                self.raw.paint(uncle, Color::Black);
                self.raw.paint(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.raw.arena[parent].side_of(node) == Some(parent_side.opposite()) {
                // zig-zag: straighten into zig-zig first
                node = parent;
                parent = self.raw.rotate(node, parent_side);
            }
            self.raw.paint(Some(parent), Color::Black);
            self.raw.paint(Some(grandparent), Color::Red);
            self.raw.rotate(grandparent, parent_side.opposite());
            debug!(?parent_side, "red-black insert fix-up rotated");
            break;
        }
        self.raw.paint(self.raw.root, Color::Black);
    }

    /// Resolves the black-height deficit below `start`'s parent after a
    /// black node was removed. `start` is the node that took the removed
    /// node's place, or the removed leaf itself while it is still linked.
    fn repair_after_removal(&mut self, start: NodeId) {
        let mut node = start;
        while Some(node) != self.raw.root && !self.raw.is_red(Some(node)) {
            let Some(parent) = self.raw.arena[node].parent else {
                break;
            };
            let Some(side) = self.raw.arena[parent].side_of(node) else {
                break;
            };
            let other = side.opposite();

            let mut sibling = self.raw.arena[parent].child(other);
            if self.raw.is_red(sibling) {
                self.raw.paint(sibling, Color::Black);
                self.raw.paint(Some(parent), Color::Red);
                self.raw.rotate(parent, side);
                sibling = self.raw.arena[parent].child(other);
            }
            let Some(mut sibling) = sibling else {
                node = parent;
                continue;
            };

            let near = self.raw.arena[sibling].child(side);
            let far = self.raw.arena[sibling].child(other);
            if !self.raw.is_red(near) && !self.raw.is_red(far) {
                self.raw.paint(Some(sibling), Color::Red);
                node = parent;
                continue;
            }

            if !self.raw.is_red(far) {
                self.raw.paint(near, Color::Black);
                self.raw.paint(Some(sibling), Color::Red);
                self.raw.rotate(sibling, other);
                let Some(rotated) = self.raw.arena[parent].child(other) else {
                    break;
                };
                sibling = rotated;
            }
            let parent_color = self.raw.color(Some(parent));
            self.raw.paint(Some(sibling), parent_color);
            self.raw.paint(Some(parent), Color::Black);
            let far = self.raw.arena[sibling].child(other);
            self.raw.paint(far, Color::Black);
            self.raw.rotate(parent, side);
            debug!(?side, "red-black removal fix-up rotated");
            if let Some(root) = self.raw.root {
                node = root;
            }
            break;
        }
        self.raw.paint(Some(node), Color::Black);
    }
}

impl<K: Ord, V> RedBlackTreeMap<K, V> {
    /// Stores `value` under `key`. O(log N).
    ///
    /// If the key is already present its value is replaced in place, the
    /// old value is returned and neither colors nor links change. Otherwise
    /// a red leaf is attached and the invariants are restored upward.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::tree::RedBlackTreeMap;
    ///
    /// let mut map = RedBlackTreeMap::new();
    /// assert_eq!(map.insert(5, 'a'), None);
    /// assert_eq!(map.insert(5, 'b'), Some('a'));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.search(&key) {
            Search::Found(id) => Some(std::mem::replace(self.raw.value_mut(id), value)),
            Search::Vacant { parent, side } => {
                let id = self.raw.attach(key, value, Color::Red, parent, side);
                self.repair_after_insert(id);
                None
            }
        }
    }

    /// Removes `key` and returns the stored key and value. O(log N).
    ///
    /// A node with a right subtree takes over the entry of its in-order
    /// successor, whose node is unlinked instead. If the unlinked node was
    /// black the double-black fix-up runs before the node leaves the tree.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.raw.find(key)?;
        let doomed = self.raw.migrate_for_removal(target);
        let links = self.raw.arena[doomed];
        let was_black = !self.raw.is_red(Some(doomed));

        match links.left.or(links.right) {
            Some(child) => {
                self.raw.splice(doomed);
                if was_black {
                    self.repair_after_removal(child);
                }
            }
            None if links.parent.is_none() => {
                self.raw.splice(doomed);
            }
            None => {
                // The leaf stands in for the empty slot during the fix-up.
                if was_black {
                    self.repair_after_removal(doomed);
                }
                self.raw.splice(doomed);
            }
        }

        let entry = self.raw.release(doomed);
        Some((entry.key, entry.value))
    }

    /// Checks ordering, parent links, the black root, the absence of red
    /// children under red nodes and equal black-heights. O(N).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Corrupted`] describing the first broken invariant.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.raw.validate_red_black().map_err(TreeError::from)
    }
}
