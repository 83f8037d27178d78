use std::iter::FusedIterator;

use crate::tree::{NodeId, NodeRef, WordTree};

impl WordTree {
    /// The node with the smallest word.
    pub fn first(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| self.node_ref(self.leftmost(id)))
    }

    /// The node with the greatest word.
    pub fn last(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| self.node_ref(self.rightmost(id)))
    }

    /// Iterates over the words in ascending order, ignoring case.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            next: self.root.map(|id| self.leftmost(id)),
        }
    }

    pub(super) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    pub(super) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    pub(super) fn successor_of(&self, mut id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        // Climb until we come up out of a left subtree.
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(id) {
                break;
            }
            id = p;
            parent = self.node(p).parent;
        }
        parent
    }

    pub(super) fn predecessor_of(&self, mut id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left != Some(id) {
                break;
            }
            id = p;
            parent = self.node(p).parent;
        }
        parent
    }
}

/// In-order iterator over the words of a `WordTree`.
///
/// It follows successor links, so it needs no stack and can be restarted
/// at any time by calling `WordTree::iter` again.
#[derive(Clone, Debug)]
pub struct Iter<'t> {
    tree: &'t WordTree,
    next: Option<NodeId>,
}

impl<'t> Iterator for Iter<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.successor_of(id);
        Some(self.tree.node(id).word.as_str())
    }
}

impl FusedIterator for Iter<'_> {}

impl<'t> IntoIterator for &'t WordTree {
    type Item = &'t str;
    type IntoIter = Iter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
