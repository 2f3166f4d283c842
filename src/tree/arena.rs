//! Index-addressed node storage.
//!
//! Every node of a tree lives in an [`Arena`] and is addressed by a
//! [`NodeId`]. A node is split into three parallel slots sharing the same
//! index:
//!
//! - [`Entry`]: the key and the value
//! - [`Links`]: the parent back-reference and the two child links
//! - the balance tag `B` (a height or a color)
//!
//! Child links and parent links are plain indices, so the parent/child cycle
//! never turns into an ownership cycle: the arena alone owns the nodes.
//!
//! Removing a node moves the last node of the arena into the freed slot.
//! The caller is responsible for relinking the neighbours of the moved node
//! (see `RawTree::release`).

use std::ops::{Index, IndexMut};

// =============================================================================
// Node Identifier
// =============================================================================

/// Stable handle to a node while it stays in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Node Parts
// =============================================================================

/// Key and value of a node.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Structural links of a node. `parent` is `None` only for the root.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct Links {
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl Links {
    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side on which `child` hangs, if it is a child of this node.
    #[inline]
    pub(crate) fn side_of(&self, child: NodeId) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Owner of all nodes of one tree.
#[derive(Clone)]
pub(crate) struct Arena<K, V, B> {
    entries: Vec<Entry<K, V>>,
    links: Vec<Links>,
    tags: Vec<B>,
}

impl<K, V, B> Arena<K, V, B> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            links: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            links: Vec::with_capacity(capacity),
            tags: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Stores a new unlinked node and returns its handle.
    pub(crate) fn allocate(&mut self, key: K, value: V, parent: Option<NodeId>, tag: B) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry { key, value });
        self.links.push(Links {
            parent,
            left: None,
            right: None,
        });
        self.tags.push(tag);
        id
    }

    /// Removes a node, moving the last node of the arena into its slot.
    ///
    /// Returns the removed entry and, when a node was moved, the handle it
    /// had before the move. The moved node now answers to `id`.
    pub(crate) fn swap_remove(&mut self, id: NodeId) -> (Entry<K, V>, Option<NodeId>) {
        let last = NodeId(self.entries.len() - 1);
        let entry = self.entries.swap_remove(id.0);
        self.links.swap_remove(id.0);
        self.tags.swap_remove(id.0);
        let moved = (last != id).then_some(last);
        (entry, moved)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.links.clear();
        self.tags.clear();
    }

    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> &Entry<K, V> {
        &self.entries[id.0]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, id: NodeId) -> &mut Entry<K, V> {
        &mut self.entries[id.0]
    }

    #[inline]
    pub(crate) fn tag(&self, id: NodeId) -> &B {
        &self.tags[id.0]
    }

    #[inline]
    pub(crate) fn tag_mut(&mut self, id: NodeId) -> &mut B {
        &mut self.tags[id.0]
    }

    /// Exchanges the key and value of two distinct nodes, leaving their links
    /// and tags in place.
    pub(crate) fn swap_entries(&mut self, first: NodeId, second: NodeId) {
        let (low, high) = if first.0 < second.0 {
            (first.0, second.0)
        } else {
            (second.0, first.0)
        };
        if low == high {
            return;
        }
        let (head, tail) = self.entries.split_at_mut(high);
        std::mem::swap(&mut head[low], &mut tail[0]);
    }

    pub(crate) fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    pub(crate) fn links(&self) -> &[Links] {
        &self.links
    }

    /// Splits the arena into mutable entries and shared links.
    pub(crate) fn entries_mut_with_links(&mut self) -> (&mut [Entry<K, V>], &[Links]) {
        (&mut self.entries, &self.links)
    }

    /// Consumes the arena, keeping only the entries and links.
    pub(crate) fn into_parts(self) -> (Vec<Entry<K, V>>, Vec<Links>) {
        (self.entries, self.links)
    }
}

impl<K, V, B> Index<NodeId> for Arena<K, V, B> {
    type Output = Links;

    #[inline]
    fn index(&self, id: NodeId) -> &Links {
        &self.links[id.0]
    }
}

impl<K, V, B> IndexMut<NodeId> for Arena<K, V, B> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Links {
        &mut self.links[id.0]
    }
}
