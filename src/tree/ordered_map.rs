//! The ordered map contract and run-time selection of a balancing scheme.
//!
//! [`OrderedMap`] is implemented independently by [`AvlTreeMap`] and
//! [`RedBlackTreeMap`]. [`TreeMap`] picks one of them at construction time
//! from a [`TreeKind`] and forwards every operation to it.

use std::fmt;
use std::str::FromStr;

use super::avl::AvlTreeMap;
use super::error::TreeError;
use super::iter::Iter;
use super::red_black::RedBlackTreeMap;

// =============================================================================
// OrderedMap
// =============================================================================

/// A mutable map that keeps its entries sorted by key.
///
/// Keys must be totally ordered through [`Ord`]; an inconsistent `Ord`
/// implementation is a caller error and leaves the map in an unspecified
/// (but memory-safe) state. Absent keys are not errors: lookups and removals
/// return `None`.
///
/// The trait is object safe, so a `Box<dyn OrderedMap<K, V>>` can hold either
/// variant.
///
/// # Examples
///
/// ```rust
/// use arbor::tree::{AvlTreeMap, OrderedMap, RedBlackTreeMap};
///
/// fn fill(map: &mut dyn OrderedMap<i32, &'static str>) {
///     map.insert(2, "two");
///     map.insert(1, "one");
/// }
///
/// let mut maps: Vec<Box<dyn OrderedMap<i32, &'static str>>> =
///     vec![Box::new(AvlTreeMap::new()), Box::new(RedBlackTreeMap::new())];
/// for map in &mut maps {
///     fill(map.as_mut());
///     assert_eq!(map.len(), 2);
///     assert_eq!(map.first_key_value(), Some((&1, &"one")));
/// }
/// ```
pub trait OrderedMap<K: Ord, V> {
    /// The balancing scheme of this map.
    fn kind(&self) -> TreeKind;

    /// Returns the number of entries. O(1).
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries. O(1).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored for `key`. O(log N).
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value stored for `key`. O(log N).
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Returns `true` if the map holds a value for `key`. O(log N).
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if some entry holds `value`. O(N).
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, candidate)| candidate == value)
    }

    /// Stores `value` under `key`.
    ///
    /// If the key was present its value is replaced in place and the old
    /// value returned; the length and the shape of the tree are unchanged.
    /// Otherwise a new entry is added, the tree is rebalanced and `None` is
    /// returned.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key` and returns its value; `None` if it was absent.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Returns the entry with the smallest key.
    fn first_key_value(&self) -> Option<(&K, &V)>;

    /// Returns the entry with the largest key.
    fn last_key_value(&self) -> Option<(&K, &V)>;

    /// Returns an iterator over the entries in ascending key order.
    fn iter(&self) -> Iter<'_, K, V>;

    /// Height of the tree: 0 for a single entry, `None` when empty.
    fn height(&self) -> Option<usize>;

    /// Checks every structural invariant of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Corrupted`] describing the first broken invariant.
    fn validate(&self) -> Result<(), TreeError>;
}

// =============================================================================
// TreeKind
// =============================================================================

/// The balancing scheme backing a [`TreeMap`].
///
/// # Examples
///
/// ```rust
/// use arbor::tree::TreeKind;
///
/// assert_eq!("red-black".parse::<TreeKind>(), Ok(TreeKind::RedBlack));
/// assert_eq!(TreeKind::default(), TreeKind::Avl);
/// assert_eq!(TreeKind::Avl.to_string(), "avl");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TreeKind {
    /// Height-balanced: subtree heights differ by at most one.
    #[default]
    Avl,
    /// Color-balanced: equal black-height on every path, no red-red edge.
    RedBlack,
}

impl TreeKind {
    /// Every available kind.
    pub const ALL: [Self; 2] = [Self::Avl, Self::RedBlack];

    /// The name used by [`FromStr`] and [`Display`](fmt::Display).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avl => "avl",
            Self::RedBlack => "red-black",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for TreeKind {
    type Err = TreeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| TreeError::UnknownKind(text.to_string()))
    }
}

// =============================================================================
// TreeMap
// =============================================================================

/// An ordered map whose balancing scheme is chosen at run time.
///
/// # Examples
///
/// ```rust
/// use arbor::tree::{OrderedMap, TreeKind, TreeMap};
///
/// let mut map = TreeMap::new(TreeKind::RedBlack);
/// assert_eq!(map.insert(8, "eight"), None);
/// assert_eq!(map.insert(8, "EIGHT"), Some("eight"));
/// assert_eq!(map.kind(), TreeKind::RedBlack);
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum TreeMap<K, V> {
    /// Backed by an [`AvlTreeMap`].
    Avl(AvlTreeMap<K, V>),
    /// Backed by a [`RedBlackTreeMap`].
    RedBlack(RedBlackTreeMap<K, V>),
}

macro_rules! forward {
    ($self:ident, $map:ident => $body:expr) => {
        match $self {
            TreeMap::Avl($map) => $body,
            TreeMap::RedBlack($map) => $body,
        }
    };
}

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map of the given kind.
    #[must_use]
    pub const fn new(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Avl => Self::Avl(AvlTreeMap::new()),
            TreeKind::RedBlack => Self::RedBlack(RedBlackTreeMap::new()),
        }
    }

    /// Creates an empty map of the given kind with room for `capacity`
    /// entries.
    #[must_use]
    pub fn with_capacity(kind: TreeKind, capacity: usize) -> Self {
        match kind {
            TreeKind::Avl => Self::Avl(AvlTreeMap::with_capacity(capacity)),
            TreeKind::RedBlack => Self::RedBlack(RedBlackTreeMap::with_capacity(capacity)),
        }
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Builds a map of the given kind from key-value pairs; later pairs
    /// overwrite earlier ones with the same key.
    pub fn from_entries<I>(kind: TreeKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        match kind {
            TreeKind::Avl => Self::Avl(entries.into_iter().collect()),
            TreeKind::RedBlack => Self::RedBlack(entries.into_iter().collect()),
        }
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new(TreeKind::default())
    }
}

impl<K: Ord, V> OrderedMap<K, V> for TreeMap<K, V> {
    fn kind(&self) -> TreeKind {
        match self {
            Self::Avl(_) => TreeKind::Avl,
            Self::RedBlack(_) => TreeKind::RedBlack,
        }
    }

    fn len(&self) -> usize {
        forward!(self, map => map.len())
    }

    fn get(&self, key: &K) -> Option<&V> {
        forward!(self, map => map.get(key))
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        forward!(self, map => map.get_mut(key))
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        forward!(self, map => map.contains_value(value))
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        forward!(self, map => map.insert(key, value))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        forward!(self, map => map.remove(key))
    }

    fn clear(&mut self) {
        forward!(self, map => map.clear());
    }

    fn first_key_value(&self) -> Option<(&K, &V)> {
        forward!(self, map => map.first_key_value())
    }

    fn last_key_value(&self) -> Option<(&K, &V)> {
        forward!(self, map => map.last_key_value())
    }

    fn iter(&self) -> Iter<'_, K, V> {
        forward!(self, map => map.iter())
    }

    fn height(&self) -> Option<usize> {
        forward!(self, map => map.height())
    }

    fn validate(&self) -> Result<(), TreeError> {
        forward!(self, map => map.validate())
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        forward!(self, map => map.extend(iter));
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        forward!(self, map => map.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        forward!(self, map => fmt::Debug::fmt(map, formatter))
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        forward!(self, map => fmt::Display::fmt(map, formatter))
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for TreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        forward!(self, map => serde::Serialize::serialize(map, serializer))
    }
}
