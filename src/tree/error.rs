//! Error types for the balanced tree maps.
//!
//! Lookups and removals of absent keys are not errors: they return `None`.
//! Keys are totally ordered through their `Ord` implementation, so there is
//! no run-time "incomparable key" failure either. What remains is:
//!
//! - [`TreeError::Exhausted`]: an iterator was advanced past its last entry
//!   through [`Iter::try_next`](super::Iter::try_next).
//! - [`TreeError::Corrupted`]: [`validate`](super::OrderedMap::validate)
//!   found a broken structural invariant. This indicates a bug in the tree,
//!   never a condition callers are expected to recover from.
//! - [`TreeError::UnknownKind`]: a [`TreeKind`](super::TreeKind) could not be
//!   parsed from a string.

use thiserror::Error;

/// Represents errors reported by the tree maps.
///
/// # Examples
///
/// ```rust
/// use arbor::tree::{AvlTreeMap, TreeError};
///
/// let map: AvlTreeMap<i32, &str> = AvlTreeMap::new();
/// let mut iterator = map.iter();
/// assert_eq!(iterator.try_next(), Err(TreeError::Exhausted));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The iterator has no more entries.
    #[error("iterator exhausted: no more entries")]
    Exhausted,
    /// A structural invariant does not hold.
    #[error("tree structure corrupted: {0}")]
    Corrupted(#[from] InvariantViolation),
    /// The string does not name a tree kind.
    #[error("unknown tree kind `{0}`, expected `avl` or `red-black`")]
    UnknownKind(String),
}

/// A broken tree invariant, as found by `validate`.
///
/// Positions are zero-based indices in ascending key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvariantViolation {
    /// The key at `position` is not greater than the key before it.
    #[error("key at position {position} is out of order")]
    OutOfOrder {
        /// Position of the offending entry.
        position: usize,
    },
    /// The subtree heights below `position` differ by more than one.
    #[error("node at position {position} has balance factor {balance_factor}")]
    Unbalanced {
        /// Position of the offending entry.
        position: usize,
        /// `height(left) - height(right)` at that node.
        balance_factor: i32,
    },
    /// The height stored at `position` does not match its subtrees.
    #[error("node at position {position} stores a stale height")]
    StaleHeight {
        /// Position of the offending entry.
        position: usize,
    },
    /// The root of a Red-Black tree is red.
    #[error("root is red")]
    RedRoot,
    /// A red node at `position` has a red child.
    #[error("red node at position {position} has a red child")]
    RedChildOfRed {
        /// Position of the red parent.
        position: usize,
    },
    /// The two subtrees of the node at `position` have different black-heights.
    #[error("subtrees of node at position {position} differ in black-height")]
    BlackHeightMismatch {
        /// Position of the offending entry.
        position: usize,
    },
    /// A child of the node at `position` does not point back to it, or the
    /// root has a parent.
    #[error("parent link mismatch at position {position}")]
    ParentMismatch {
        /// Position of the node whose child (or own parent link) is wrong.
        position: usize,
    },
    /// The recorded length differs from the number of reachable nodes.
    #[error("length is {recorded} but {counted} nodes are reachable")]
    LengthMismatch {
        /// Value of the length counter.
        recorded: usize,
        /// Number of nodes reachable from the root.
        counted: usize,
    },
}
