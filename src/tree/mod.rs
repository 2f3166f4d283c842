//! Mutable self-balancing binary search tree maps.
//!
//! This module provides two independent ordered maps with the same contract:
//!
//! - [`AvlTreeMap`]: balanced by subtree heights (AVL tree)
//! - [`RedBlackTreeMap`]: balanced by node colors (Red-Black Tree)
//!
//! Both implement [`OrderedMap`]. [`TreeMap`] chooses one of them at run time
//! from a [`TreeKind`].
//!
//! # Storage
//!
//! Nodes live in a per-map arena and refer to each other by index, so
//! parent links need neither reference counting nor `unsafe`. Removing an
//! entry moves the last node of the arena into the freed slot, keeping the
//! arena dense.
//!
//! # Examples
//!
//! ## `AvlTreeMap`
//!
//! ```rust
//! use arbor::tree::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! for key in [1, 8, 5, 8, 1] {
//!     map.insert(key, key * 10);
//! }
//! assert_eq!(map.len(), 3);
//!
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![1, 5, 8]);
//! ```
//!
//! ## `RedBlackTreeMap`
//!
//! ```rust
//! use arbor::tree::RedBlackTreeMap;
//!
//! let mut map: RedBlackTreeMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
//! assert_eq!(map.remove(&42), None);
//! assert_eq!(map.remove(&4), Some(4));
//! assert!(map.validate().is_ok());
//! ```
//!
//! ## `TreeMap`
//!
//! ```rust
//! use arbor::tree::{OrderedMap, TreeKind, TreeMap};
//!
//! let kind: TreeKind = "red-black".parse().unwrap();
//! let mut map = TreeMap::new(kind);
//! map.insert("b", 2);
//! map.insert("a", 1);
//! assert_eq!(map.kind(), TreeKind::RedBlack);
//! assert_eq!(map.first_key_value(), Some((&"a", &1)));
//! ```

mod arena;
mod avl;
mod balance;
mod error;
mod iter;
mod macros;
mod ordered_map;
mod raw;
mod red_black;
mod validate;

pub use avl::AvlTreeMap;
pub use error::InvariantViolation;
pub use error::TreeError;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;
pub use iter::ValuesMut;
pub use ordered_map::OrderedMap;
pub use ordered_map::TreeKind;
pub use ordered_map::TreeMap;
pub use red_black::RedBlackTreeMap;
