use log::trace;
use std::cmp::Ordering;

use crate::tree::{NodeId, WordTree};

impl WordTree {
    /// Restores the AVL balance at `id` after `inserted` was added somewhere
    /// below it. Returns the root of the subtree that `id` used to root.
    pub(super) fn rebalance(&mut self, id: NodeId, inserted: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance_factor(id);

        if balance > 1 {
            if let Some(left) = self.node(id).left {
                if self.cmp_nodes(inserted, left) == Ordering::Greater {
                    let pivot = self.rotate_left(left);
                    self.set_left(id, Some(pivot));
                }
                return self.rotate_right(id);
            }
        } else if balance < -1 {
            if let Some(right) = self.node(id).right {
                if self.cmp_nodes(inserted, right) == Ordering::Less {
                    let pivot = self.rotate_right(right);
                    self.set_right(id, Some(pivot));
                }
                return self.rotate_left(id);
            }
        }
        id
    }

    /// Rotates the subtree at `x` to the left and returns its new root,
    /// which is `x`'s former right child. Does nothing if `x` has no
    /// right child.
    ///
    /// ```text
    ///     x               y
    ///    / \             / \
    ///   a   y    =>     x   c
    ///      / \         / \
    ///     t2  c       a   t2
    /// ```
    pub(super) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let y = match self.node(x).right {
            Some(y) => y,
            None => return x,
        };
        trace!("rotating left at {}", self.node(x).word);
        let t2 = self.node(y).left;
        let parent = self.node(x).parent;

        self.node_mut(y).left = Some(x);
        self.node_mut(x).right = t2;

        self.node_mut(x).parent = Some(y);
        if let Some(t2) = t2 {
            self.node_mut(t2).parent = Some(x);
        }
        self.replace_child(parent, x, y);

        self.update_height(x);
        self.update_height(y);
        y
    }

    /// Mirror image of `rotate_left`.
    pub(super) fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let x = match self.node(y).left {
            Some(x) => x,
            None => return y,
        };
        trace!("rotating right at {}", self.node(y).word);
        let t2 = self.node(x).right;
        let parent = self.node(y).parent;

        self.node_mut(x).right = Some(y);
        self.node_mut(y).left = t2;

        self.node_mut(y).parent = Some(x);
        if let Some(t2) = t2 {
            self.node_mut(t2).parent = Some(y);
        }
        self.replace_child(parent, y, x);

        self.update_height(y);
        self.update_height(x);
        x
    }

    /// Makes `new` take `old`'s place under `parent`, or at the root of the
    /// tree if there is no parent.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        self.node_mut(new).parent = parent;
        match parent {
            Some(p) if self.node(p).left == Some(old) => self.node_mut(p).left = Some(new),
            Some(p) => self.node_mut(p).right = Some(new),
            None => self.root = Some(new),
        }
    }
}
