//! In-order iterators over the tree maps.
//!
//! All iterators walk the tree with an explicit stack: it is seeded with the
//! left spine from the root, and every step pops the top node and pushes the
//! left spine of that node's right subtree. A full traversal is amortized
//! O(1) per step and O(log N) in the worst case, with no recursion.
//!
//! Borrowing iterators hold a shared (or, for [`ValuesMut`], exclusive)
//! borrow of the map, so the map cannot be restructured while one of them is
//! alive.

use std::iter::FusedIterator;

use super::arena::{Entry, Links, NodeId};
use super::error::TreeError;

// =============================================================================
// Traversal Cursor
// =============================================================================

/// The explicit stack driving an in-order walk.
#[derive(Clone, Debug)]
struct InOrder {
    stack: Vec<NodeId>,
    remaining: usize,
}

impl InOrder {
    fn new(links: &[Links], root: Option<NodeId>, length: usize) -> Self {
        let mut cursor = Self {
            stack: Vec::new(),
            remaining: length,
        };
        cursor.push_left_spine(links, root);
        cursor
    }

    fn push_left_spine(&mut self, links: &[Links], mut node: Option<NodeId>) {
        while let Some(id) = node {
            self.stack.push(id);
            node = links[id.index()].left;
        }
    }

    fn advance(&mut self, links: &[Links]) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(links, links[id.index()].right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(id)
    }
}

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the entries of a tree map, in ascending key order.
///
/// Created by `iter` on [`AvlTreeMap`](super::AvlTreeMap),
/// [`RedBlackTreeMap`](super::RedBlackTreeMap) and [`TreeMap`](super::TreeMap).
pub struct Iter<'a, K, V> {
    entries: &'a [Entry<K, V>],
    links: &'a [Links],
    cursor: InOrder,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        entries: &'a [Entry<K, V>],
        links: &'a [Links],
        root: Option<NodeId>,
        length: usize,
    ) -> Self {
        Self {
            entries,
            links,
            cursor: InOrder::new(links, root, length),
        }
    }

    /// Advances the iterator, failing once every entry has been produced.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Exhausted`] when there are no entries left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::tree::{RedBlackTreeMap, TreeError};
    ///
    /// let map: RedBlackTreeMap<i32, char> = [(1, 'a')].into_iter().collect();
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.try_next(), Ok((&1, &'a')));
    /// assert_eq!(iterator.try_next(), Err(TreeError::Exhausted));
    /// ```
    pub fn try_next(&mut self) -> Result<(&'a K, &'a V), TreeError> {
        self.next().ok_or(TreeError::Exhausted)
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.advance(self.links)?;
        let entry = &self.entries[id.index()];
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            links: self.links,
            cursor: self.cursor.clone(),
        }
    }
}

// =============================================================================
// Keys / Values
// =============================================================================

/// An iterator over the keys of a tree map, in ascending order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a tree map, in ascending key order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

// =============================================================================
// ValuesMut
// =============================================================================

/// A mutable iterator over the values of a tree map, in ascending key order.
pub struct ValuesMut<'a, V> {
    slots: Vec<Option<&'a mut V>>,
    links: &'a [Links],
    cursor: InOrder,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new<K>(
        entries: &'a mut [Entry<K, V>],
        links: &'a [Links],
        root: Option<NodeId>,
        length: usize,
    ) -> Self {
        Self {
            slots: entries.iter_mut().map(|entry| Some(&mut entry.value)).collect(),
            links,
            cursor: InOrder::new(links, root, length),
        }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.advance(self.links)?;
        self.slots[id.index()].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}

impl<V> FusedIterator for ValuesMut<'_, V> {}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over the entries of a tree map, in ascending key order.
pub struct IntoIter<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    links: Vec<Links>,
    cursor: InOrder,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(
        entries: Vec<Entry<K, V>>,
        links: Vec<Links>,
        root: Option<NodeId>,
        length: usize,
    ) -> Self {
        let cursor = InOrder::new(&links, root, length);
        Self {
            slots: entries.into_iter().map(Some).collect(),
            links,
            cursor,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.advance(&self.links)?;
        self.slots[id.index()]
            .take()
            .map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
