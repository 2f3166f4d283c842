//! Balance tags carried by every node.
//!
//! The AVL variant stores a [`Height`], the Red-Black variant a [`Color`].
//! The rotation engine is shared, so each tag type tells it how to bring the
//! two rotated nodes up to date through [`Balance::rotated`].

use super::arena::NodeId;
use super::raw::RawTree;

/// Per-variant balance metadata.
pub(crate) trait Balance: Copy {
    /// Called by the rotation engine once the links of a rotation are in
    /// place. `demoted` is the former subtree root, `promoted` the new one.
    fn rotated<K, V>(tree: &mut RawTree<K, V, Self>, demoted: NodeId, promoted: NodeId);
}

// =============================================================================
// Height (AVL)
// =============================================================================

/// Height of a node: 0 for a leaf, -1 for an absent child.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Height(pub(crate) i32);

impl Height {
    pub(crate) const LEAF: Self = Self(0);
    pub(crate) const ABSENT: i32 = -1;
}

impl Balance for Height {
    fn rotated<K, V>(tree: &mut RawTree<K, V, Self>, demoted: NodeId, promoted: NodeId) {
        // The demoted node is now a child of the promoted one.
        tree.refresh_height(demoted);
        tree.refresh_height(promoted);
    }
}

impl<K, V> RawTree<K, V, Height> {
    #[inline]
    pub(crate) fn height(&self, node: Option<NodeId>) -> i32 {
        node.map_or(Height::ABSENT, |id| self.arena.tag(id).0)
    }

    /// Recomputes the stored height of `id` from its children.
    pub(crate) fn refresh_height(&mut self, id: NodeId) {
        let links = self.arena[id];
        let height = self.height(links.left).max(self.height(links.right)) + 1;
        *self.arena.tag_mut(id) = Height(height);
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance_factor(&self, id: NodeId) -> i32 {
        let links = self.arena[id];
        self.height(links.left) - self.height(links.right)
    }
}

// =============================================================================
// Color (Red-Black)
// =============================================================================

/// The color of a Red-Black Tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Balance for Color {
    fn rotated<K, V>(_tree: &mut RawTree<K, V, Self>, _demoted: NodeId, _promoted: NodeId) {
        // Colors are fixed by the fix-up case that requested the rotation.
    }
}

impl<K, V> RawTree<K, V, Color> {
    /// Color of an optional node; absent children count as black.
    #[inline]
    pub(crate) fn color(&self, node: Option<NodeId>) -> Color {
        node.map_or(Color::Black, |id| *self.arena.tag(id))
    }

    #[inline]
    pub(crate) fn is_red(&self, node: Option<NodeId>) -> bool {
        self.color(node) == Color::Red
    }

    /// Paints `node` if it exists.
    #[inline]
    pub(crate) fn paint(&mut self, node: Option<NodeId>, color: Color) {
        if let Some(id) = node {
            *self.arena.tag_mut(id) = color;
        }
    }
}
