//! The binary search tree skeleton shared by both balanced variants.
//!
//! [`RawTree`] knows how to descend by key, attach a new leaf, find minimum
//! and successor nodes, splice a node with at most one child out of the
//! tree, and rotate. It never decides *when* to rotate: that is the job of
//! the AVL and Red-Black maps built on top of it.

use std::borrow::Borrow;
use std::cmp::Ordering;

use tracing::trace;

use super::arena::{Arena, Entry, NodeId, Side};
use super::balance::Balance;
use super::iter::Iter;

/// Outcome of descending the tree for a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Search {
    /// The key is stored in this node.
    Found(NodeId),
    /// The key is absent; a new leaf belongs in `side` of `parent`
    /// (or at the root when `parent` is `None`).
    Vacant {
        parent: Option<NodeId>,
        side: Side,
    },
}

/// Root handle, entry count and node storage of a tree.
#[derive(Clone)]
pub(crate) struct RawTree<K, V, B> {
    pub(crate) arena: Arena<K, V, B>,
    pub(crate) root: Option<NodeId>,
    pub(crate) length: usize,
}

impl<K, V, B> RawTree<K, V, B> {
    pub(crate) const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            length: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            length: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.length = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.arena.entries(), self.arena.links(), self.root, self.length)
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.arena.entry(id).key
    }

    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> &V {
        &self.arena.entry(id).value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.arena.entry_mut(id).value
    }

    /// Leftmost node of the subtree rooted at `from`.
    pub(crate) fn minimum(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while let Some(left) = self.arena[current].left {
            current = left;
        }
        current
    }

    /// Rightmost node of the subtree rooted at `from`.
    pub(crate) fn maximum(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while let Some(right) = self.arena[current].right {
            current = right;
        }
        current
    }

    /// In-order successor of `id`, walking parent links when `id` has no
    /// right subtree.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.arena[id].right {
            return Some(self.minimum(right));
        }
        let mut current = id;
        let mut parent = self.arena[id].parent;
        while let Some(ancestor) = parent {
            if self.arena[ancestor].right != Some(current) {
                break;
            }
            current = ancestor;
            parent = self.arena[ancestor].parent;
        }
        parent
    }

    /// Points `parent`'s link to `old` (or the root) at `new`, and sets the
    /// back-reference of `new`.
    pub(crate) fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if let Some(side) = self.arena[parent].side_of(old) {
                    self.arena[parent].set_child(side, new);
                }
            }
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Picks the node to unlink in order to delete `target`.
    ///
    /// Without a right subtree that is `target` itself. Otherwise the key and
    /// value of `target` are exchanged with its in-order successor (the
    /// minimum of the right subtree), which is returned instead. Either way
    /// the returned node has at most one child and holds the entry being
    /// deleted.
    pub(crate) fn migrate_for_removal(&mut self, target: NodeId) -> NodeId {
        match self.arena[target].right {
            None => target,
            Some(right) => {
                let successor = self.minimum(right);
                self.arena.swap_entries(target, successor);
                successor
            }
        }
    }

    /// Replaces a node with at most one child by that child.
    ///
    /// Returns the former parent of the node, from which rebalancing starts.
    /// The node stays in the arena until [`release`](Self::release).
    pub(crate) fn splice(&mut self, doomed: NodeId) -> Option<NodeId> {
        let links = self.arena[doomed];
        debug_assert!(
            links.left.is_none() || links.right.is_none(),
            "splice requires a node with at most one child"
        );
        let child = links.left.or(links.right);
        self.replace_child(links.parent, doomed, child);
        self.arena[doomed].parent = None;
        self.arena[doomed].left = None;
        self.arena[doomed].right = None;
        links.parent
    }

    /// Drops an unlinked node from the arena and returns its entry.
    ///
    /// The last node of the arena takes over the freed slot; its neighbours
    /// are relinked to the new handle.
    pub(crate) fn release(&mut self, doomed: NodeId) -> Entry<K, V> {
        let (entry, moved) = self.arena.swap_remove(doomed);
        self.length -= 1;
        if let Some(previous) = moved {
            let links = self.arena[doomed];
            match links.parent {
                None => self.root = Some(doomed),
                Some(parent) => {
                    if let Some(side) = self.arena[parent].side_of(previous) {
                        self.arena[parent].set_child(side, Some(doomed));
                    }
                }
            }
            for child in [links.left, links.right].into_iter().flatten() {
                self.arena[child].parent = Some(doomed);
            }
        }
        entry
    }

    /// Locates the node holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(self.key(id).borrow()) {
                Ordering::Less => self.arena[id].left,
                Ordering::Greater => self.arena[id].right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Descends to the node holding `key` or to the slot where it belongs.
    pub(crate) fn search(&self, key: &K) -> Search
    where
        K: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            side = match key.cmp(self.key(id)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(id),
            };
            parent = Some(id);
            current = self.arena[id].child(side);
        }
        Search::Vacant { parent, side }
    }

    /// Links a new leaf into a vacant slot found by [`search`](Self::search).
    pub(crate) fn attach(&mut self, key: K, value: V, tag: B, parent: Option<NodeId>, side: Side) -> NodeId {
        let id = self.arena.allocate(key, value, parent, tag);
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.arena[parent].set_child(side, Some(id)),
        }
        self.length += 1;
        id
    }

    /// Scans every value in key order, following successor links.
    pub(crate) fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut current = self.root.map(|root| self.minimum(root));
        while let Some(id) = current {
            if self.value(id) == value {
                return true;
            }
            current = self.successor(id);
        }
        false
    }

    /// Length of the longest root-to-leaf path in edges, by walking every node.
    pub(crate) fn measure_height(&self) -> Option<usize> {
        let mut deepest = None;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(Some(depth));
            let links = self.arena[id];
            for child in [links.left, links.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }
}

// =============================================================================
// Rotation Engine
// =============================================================================

impl<K, V, B: Balance> RawTree<K, V, B> {
    /// Rotates the subtree rooted at `node` in `direction`.
    ///
    /// A left rotation promotes the right child of `node`; the promoted
    /// node's left subtree becomes the right subtree of `node`, and `node`
    /// becomes the promoted node's left child. A right rotation is the
    /// mirror image. In-order key sequence is unchanged.
    ///
    /// Returns the promoted node. If `node` has no child to promote the tree
    /// is left untouched and `node` is returned.
    pub(crate) fn rotate(&mut self, node: NodeId, direction: Side) -> NodeId {
        let rising = direction.opposite();
        let Some(pivot) = self.arena[node].child(rising) else {
            debug_assert!(false, "rotation without a child to promote");
            return node;
        };
        let inner = self.arena[pivot].child(direction);
        let parent = self.arena[node].parent;

        // child links
        self.arena[node].set_child(rising, inner);
        self.arena[pivot].set_child(direction, Some(node));

        // parent links
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }
        self.arena[pivot].parent = parent;
        self.arena[node].parent = Some(pivot);

        // link from above
        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if let Some(side) = self.arena[parent].side_of(node) {
                    self.arena[parent].set_child(side, Some(pivot));
                }
            }
        }

        B::rotated(self, node, pivot);
        trace!(?direction, promoted = pivot.index(), demoted = node.index(), "rotated");
        pivot
    }

    #[inline]
    pub(crate) fn rotate_left(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Side::Left)
    }

    #[inline]
    pub(crate) fn rotate_right(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Side::Right)
    }
}
