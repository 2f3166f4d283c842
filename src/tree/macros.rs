//! Implementation shared by [`AvlTreeMap`](super::AvlTreeMap) and
//! [`RedBlackTreeMap`](super::RedBlackTreeMap).
//!
//! Both maps wrap a `RawTree` in a field named `raw` and provide their own
//! `insert`, `remove_entry`, `height` and `validate`. Everything that does
//! not depend on the balancing scheme is generated here.

macro_rules! impl_tree_map {
    ($map:ident, $kind:expr) => {
        impl<K, V> $map<K, V> {
            /// Creates a new empty map.
            #[inline]
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    raw: RawTree::new(),
                }
            }

            /// Creates an empty map with room for `capacity` entries before
            /// the node arena reallocates.
            #[must_use]
            pub fn with_capacity(capacity: usize) -> Self {
                Self {
                    raw: RawTree::with_capacity(capacity),
                }
            }

            /// Returns the number of entries. O(1).
            #[inline]
            #[must_use]
            pub const fn len(&self) -> usize {
                self.raw.length
            }

            /// Returns `true` if the map contains no entries. O(1).
            #[inline]
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.raw.length == 0
            }

            /// Removes every entry.
            pub fn clear(&mut self) {
                self.raw.clear();
            }

            /// Returns an iterator over the entries in ascending key order.
            ///
            /// The iterator borrows the map, so the map cannot be modified
            /// until the iterator is dropped.
            #[must_use]
            pub fn iter(&self) -> Iter<'_, K, V> {
                self.raw.iter()
            }

            /// Returns an iterator over the keys in ascending order.
            #[must_use]
            pub fn keys(&self) -> Keys<'_, K, V> {
                Keys {
                    inner: self.raw.iter(),
                }
            }

            /// Returns an iterator over the values in ascending key order.
            #[must_use]
            pub fn values(&self) -> Values<'_, K, V> {
                Values {
                    inner: self.raw.iter(),
                }
            }

            /// Returns a mutable iterator over the values in ascending key order.
            pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
                let (root, length) = (self.raw.root, self.raw.length);
                let (entries, links) = self.raw.arena.entries_mut_with_links();
                ValuesMut::new(entries, links, root, length)
            }

            /// Returns `true` if some entry holds `value`.
            ///
            /// Values are not ordered, so this scans every entry. O(N).
            #[must_use]
            pub fn contains_value(&self, value: &V) -> bool
            where
                V: PartialEq,
            {
                self.raw.contains_value(value)
            }

            /// Returns the entry with the smallest key.
            #[must_use]
            pub fn first_key_value(&self) -> Option<(&K, &V)> {
                self.raw.root.map(|root| {
                    let id = self.raw.minimum(root);
                    (self.raw.key(id), self.raw.value(id))
                })
            }

            /// Returns the entry with the largest key.
            #[must_use]
            pub fn last_key_value(&self) -> Option<(&K, &V)> {
                self.raw.root.map(|root| {
                    let id = self.raw.maximum(root);
                    (self.raw.key(id), self.raw.value(id))
                })
            }
        }

        impl<K: Ord, V> $map<K, V> {
            /// Returns a reference to the value stored for `key`. O(log N).
            ///
            /// The key may be any borrowed form of the map's key type, but the
            /// ordering on the borrowed form must match the ordering on the
            /// key type.
            #[must_use]
            pub fn get<Q>(&self, key: &Q) -> Option<&V>
            where
                K: Borrow<Q>,
                Q: Ord + ?Sized,
            {
                self.raw.find(key).map(|id| self.raw.value(id))
            }

            /// Returns the stored key and value for `key`.
            #[must_use]
            pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
            where
                K: Borrow<Q>,
                Q: Ord + ?Sized,
            {
                self.raw
                    .find(key)
                    .map(|id| (self.raw.key(id), self.raw.value(id)))
            }

            /// Returns a mutable reference to the value stored for `key`.
            pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
            where
                K: Borrow<Q>,
                Q: Ord + ?Sized,
            {
                let id = self.raw.find(key)?;
                Some(self.raw.value_mut(id))
            }

            /// Returns `true` if the map holds a value for `key`. O(log N).
            #[must_use]
            pub fn contains_key<Q>(&self, key: &Q) -> bool
            where
                K: Borrow<Q>,
                Q: Ord + ?Sized,
            {
                self.raw.find(key).is_some()
            }

            /// Removes `key` and returns its value, or `None` (leaving the map
            /// untouched) if it was absent. O(log N).
            pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
            where
                K: Borrow<Q>,
                Q: Ord + ?Sized,
            {
                self.remove_entry(key).map(|(_, value)| value)
            }
        }

        impl<K, V> Default for $map<K, V> {
            #[inline]
            fn default() -> Self {
                Self::new()
            }
        }

        impl<K: Ord, V> FromIterator<(K, V)> for $map<K, V> {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                let mut map = Self::new();
                map.extend(iter);
                map
            }
        }

        impl<K: Ord, V> Extend<(K, V)> for $map<K, V> {
            fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
                for (key, value) in iter {
                    self.insert(key, value);
                }
            }
        }

        impl<K, V> IntoIterator for $map<K, V> {
            type Item = (K, V);
            type IntoIter = IntoIter<K, V>;

            fn into_iter(self) -> Self::IntoIter {
                let RawTree {
                    arena,
                    root,
                    length,
                } = self.raw;
                let (entries, links) = arena.into_parts();
                IntoIter::new(entries, links, root, length)
            }
        }

        impl<'a, K, V> IntoIterator for &'a $map<K, V> {
            type Item = (&'a K, &'a V);
            type IntoIter = Iter<'a, K, V>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<K, V, Q> Index<&Q> for $map<K, V>
        where
            K: Ord + Borrow<Q>,
            Q: Ord + ?Sized,
        {
            type Output = V;

            /// # Panics
            ///
            /// Panics if the key is not present in the map.
            fn index(&self, key: &Q) -> &V {
                match self.get(key) {
                    Some(value) => value,
                    None => panic!("key not found in {}", stringify!($map)),
                }
            }
        }

        impl<K: PartialEq, V: PartialEq> PartialEq for $map<K, V> {
            fn eq(&self, other: &Self) -> bool {
                self.len() == other.len() && self.iter().eq(other.iter())
            }
        }

        impl<K: Eq, V: Eq> Eq for $map<K, V> {}

        impl<K: Hash, V: Hash> Hash for $map<K, V> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.len().hash(state);
                for (key, value) in self {
                    key.hash(state);
                    value.hash(state);
                }
            }
        }

        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for $map<K, V> {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.debug_map().entries(self.iter()).finish()
            }
        }

        impl<K: fmt::Display, V: fmt::Display> fmt::Display for $map<K, V> {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{{")?;
                let mut first = true;
                for (key, value) in self {
                    if first {
                        first = false;
                    } else {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                write!(formatter, "}}")
            }
        }

        impl<K: Ord, V> OrderedMap<K, V> for $map<K, V> {
            fn kind(&self) -> TreeKind {
                $kind
            }

            fn len(&self) -> usize {
                Self::len(self)
            }

            fn get(&self, key: &K) -> Option<&V> {
                Self::get(self, key)
            }

            fn get_mut(&mut self, key: &K) -> Option<&mut V> {
                Self::get_mut(self, key)
            }

            fn insert(&mut self, key: K, value: V) -> Option<V> {
                Self::insert(self, key, value)
            }

            fn remove(&mut self, key: &K) -> Option<V> {
                Self::remove(self, key)
            }

            fn clear(&mut self) {
                Self::clear(self);
            }

            fn first_key_value(&self) -> Option<(&K, &V)> {
                Self::first_key_value(self)
            }

            fn last_key_value(&self) -> Option<(&K, &V)> {
                Self::last_key_value(self)
            }

            fn iter(&self) -> Iter<'_, K, V> {
                Self::iter(self)
            }

            fn height(&self) -> Option<usize> {
                Self::height(self)
            }

            fn validate(&self) -> Result<(), TreeError> {
                Self::validate(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<K, V> serde::Serialize for $map<K, V>
        where
            K: serde::Serialize,
            V: serde::Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_map(self.iter())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de, K, V> serde::Deserialize<'de> for $map<K, V>
        where
            K: serde::Deserialize<'de> + Ord,
            V: serde::Deserialize<'de>,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct MapVisitor<K, V> {
                    marker: std::marker::PhantomData<(K, V)>,
                }

                impl<'de, K, V> serde::de::Visitor<'de> for MapVisitor<K, V>
                where
                    K: serde::Deserialize<'de> + Ord,
                    V: serde::Deserialize<'de>,
                {
                    type Value = $map<K, V>;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str("a map")
                    }

                    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
                    where
                        A: serde::de::MapAccess<'de>,
                    {
                        // Sequential insert keeps memory growth proportional to the input.
                        let mut map = $map::new();
                        while let Some((key, value)) = access.next_entry()? {
                            map.insert(key, value);
                        }
                        Ok(map)
                    }
                }

                deserializer.deserialize_map(MapVisitor {
                    marker: std::marker::PhantomData,
                })
            }
        }
    };
}

pub(crate) use impl_tree_map;
