//! Structural invariant checks.
//!
//! These walks are O(N) and exist for tests and debugging; no public
//! mutation depends on them. All walks use explicit stacks.

use super::arena::NodeId;
use super::balance::{Color, Height};
use super::error::InvariantViolation;
use super::raw::RawTree;

impl<K, V, B> RawTree<K, V, B> {
    /// In-order position of every node, indexed by slot.
    fn positions(&self) -> Vec<usize> {
        let mut positions = vec![usize::MAX; self.arena.len()];
        let mut stack: Vec<NodeId> = Vec::new();
        let mut current = self.root;
        let mut position = 0;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.arena[id].left;
            }
            if let Some(id) = stack.pop() {
                positions[id.index()] = position;
                position += 1;
                current = self.arena[id].right;
            }
        }
        positions
    }

    /// Reachable nodes with every node listed before its descendants.
    fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.length);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            let links = self.arena[id];
            stack.extend(links.right);
            stack.extend(links.left);
        }
        order
    }

    /// Checks parent back-references and the length counter.
    pub(crate) fn check_links(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err(InvariantViolation::ParentMismatch { position: 0 });
            }
        }
        let mut counted = 0;
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            counted += 1;
            if counted > self.arena.len() {
                // A cycle; report what the arena can actually hold.
                break;
            }
            let links = self.arena[id];
            for child in [links.left, links.right].into_iter().flatten() {
                if self.arena[child].parent != Some(id) {
                    let position = self.positions()[id.index()];
                    return Err(InvariantViolation::ParentMismatch { position });
                }
                stack.push(child);
            }
        }
        if counted != self.length || self.arena.len() != self.length {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.length,
                counted,
            });
        }
        Ok(())
    }

    /// Checks that keys strictly increase in traversal order.
    pub(crate) fn check_order(&self) -> Result<(), InvariantViolation>
    where
        K: Ord,
    {
        let mut previous: Option<&K> = None;
        for (position, (key, _)) in self.iter().enumerate() {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(InvariantViolation::OutOfOrder { position });
            }
            previous = Some(key);
        }
        Ok(())
    }
}

impl<K: Ord, V> RawTree<K, V, Height> {
    /// Checks links, order, stored heights and the AVL balance bound.
    pub(crate) fn validate_avl(&self) -> Result<(), InvariantViolation> {
        self.check_links()?;
        self.check_order()?;

        let positions = self.positions();
        let mut heights = vec![Height::ABSENT; self.arena.len()];
        let height_of =
            |heights: &[i32], node: Option<NodeId>| node.map_or(Height::ABSENT, |id| heights[id.index()]);

        for id in self.preorder().into_iter().rev() {
            let links = self.arena[id];
            let left = height_of(&heights, links.left);
            let right = height_of(&heights, links.right);
            let position = positions[id.index()];
            let height = left.max(right) + 1;
            if self.arena.tag(id).0 != height {
                return Err(InvariantViolation::StaleHeight { position });
            }
            let balance_factor = left - right;
            if balance_factor.abs() > 1 {
                return Err(InvariantViolation::Unbalanced {
                    position,
                    balance_factor,
                });
            }
            heights[id.index()] = height;
        }
        Ok(())
    }
}

impl<K: Ord, V> RawTree<K, V, Color> {
    /// Checks links, order, the black root, red-red freedom and equal
    /// black-heights.
    pub(crate) fn validate_red_black(&self) -> Result<(), InvariantViolation> {
        self.check_links()?;
        self.check_order()?;

        if self.is_red(self.root) {
            return Err(InvariantViolation::RedRoot);
        }

        let positions = self.positions();
        let mut black_heights = vec![0_usize; self.arena.len()];
        let black_height_of =
            |heights: &[usize], node: Option<NodeId>| node.map_or(1, |id| heights[id.index()]);

        for id in self.preorder().into_iter().rev() {
            let links = self.arena[id];
            let position = positions[id.index()];
            let red = self.is_red(Some(id));
            if red && (self.is_red(links.left) || self.is_red(links.right)) {
                return Err(InvariantViolation::RedChildOfRed { position });
            }
            let left = black_height_of(&black_heights, links.left);
            let right = black_height_of(&black_heights, links.right);
            if left != right {
                return Err(InvariantViolation::BlackHeightMismatch { position });
            }
            black_heights[id.index()] = left + usize::from(!red);
        }
        Ok(())
    }
}
