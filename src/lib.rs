//! # arbor
//!
//! Mutable, in-memory ordered maps backed by self-balancing binary search
//! trees.
//!
//! ## Overview
//!
//! - **AVL tree**: [`AvlTreeMap`](tree::AvlTreeMap), height-balanced, O(1) height
//! - **Red-Black Tree**: [`RedBlackTreeMap`](tree::RedBlackTreeMap), color-balanced
//! - **Common contract**: [`OrderedMap`](tree::OrderedMap), implemented by both
//! - **Run-time choice**: [`TreeMap`](tree::TreeMap) selected by [`TreeKind`](tree::TreeKind)
//!
//! Every map supports O(log N) lookup, insertion and removal, O(1) size, and
//! in-order iteration. Structural invariants can be checked at any time with
//! `validate`.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the maps and [`TreeKind`](tree::TreeKind)
//!
//! ## Example
//!
//! ```rust
//! use arbor::prelude::*;
//!
//! let mut map = AvlTreeMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! let entries: Vec<(&i32, &&str)> = map.iter().collect();
//! assert_eq!(entries, vec![(&1, &"one"), (&2, &"two"), (&3, &"three")]);
//! assert!(map.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the map types, their iterators and the error types.
///
/// # Usage
///
/// ```rust
/// use arbor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::tree::*;
}

pub mod tree;
