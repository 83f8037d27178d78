use std::cmp::Ordering;
use std::fmt;

mod check;
mod rotate;
mod traverse;

use crate::word::{fold, BoundedWord, WordError};

pub use crate::tree::check::Violation;
pub use crate::tree::traverse::Iter;

/// What to do when a word is inserted that is already in the tree
/// with different casing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CasePolicy {
    /// Keep the casing that was inserted first.
    #[default]
    KeepFirst,
    /// Replace the stored casing with the one inserted last.
    KeepLatest,
}

/// Index of a node in the tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    word: BoundedWord,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Back reference for walking up the tree. Only the children links
    /// express ownership.
    parent: Option<NodeId>,
    height: usize,
}

/// An AVL tree of words, ordered case-insensitively.
///
/// Nodes are kept in an arena and refer to each other by index. Every node
/// knows its parent, which is what makes successor and predecessor queries
/// possible without keeping a stack of the search path.
#[derive(Clone, Debug, Default)]
pub struct WordTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    policy: CasePolicy,
}

#[derive(Clone, Copy, Debug)]
enum Insertion {
    Added(NodeId),
    Existing,
}

/// The outcome of `WordTree::search`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Search<'t> {
    /// The node holding the word, if it is in the tree.
    pub found: Option<NodeRef<'t>>,
    /// The last node examined. This is the match if there was one,
    /// otherwise the node the word would have been attached to.
    /// It is only absent if the tree is empty.
    pub last_visited: Option<NodeRef<'t>>,
}

/// A borrowed handle on one node of a `WordTree`.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t WordTree,
    id: NodeId,
}

impl WordTree {
    pub fn new() -> Self {
        WordTree::default()
    }

    pub fn with_policy(policy: CasePolicy) -> Self {
        WordTree {
            policy,
            ..WordTree::default()
        }
    }

    pub fn policy(&self) -> CasePolicy {
        self.policy
    }

    /// Number of words in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the whole tree: 0 when empty, 1 for a single word.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| self.node_ref(id))
    }

    /// Inserts `word` and rebalances the tree.
    /// Returns false if the word (in any casing) was already present,
    /// in which case the tree's shape is unchanged.
    pub fn insert(&mut self, word: BoundedWord) -> bool {
        let (root, insertion) = self.insert_under(self.root, word);
        self.node_mut(root).parent = None;
        self.root = Some(root);
        matches!(insertion, Insertion::Added(_))
    }

    /// Validates `word` and inserts it.
    pub fn insert_str(&mut self, word: &str) -> Result<bool, WordError> {
        Ok(self.insert(BoundedWord::new(word)?))
    }

    /// Inserts `word` into the subtree rooted at `at`, and returns the
    /// new root of that subtree. The caller must reattach it.
    fn insert_under(&mut self, at: Option<NodeId>, word: BoundedWord) -> (NodeId, Insertion) {
        let id = match at {
            Some(id) => id,
            None => {
                let id = self.alloc(word);
                return (id, Insertion::Added(id));
            }
        };

        let insertion = match word.cmp_caseless(&self.node(id).word) {
            Ordering::Less => {
                let left = self.node(id).left;
                let (child, insertion) = self.insert_under(left, word);
                self.set_left(id, Some(child));
                insertion
            }
            Ordering::Greater => {
                let right = self.node(id).right;
                let (child, insertion) = self.insert_under(right, word);
                self.set_right(id, Some(child));
                insertion
            }
            Ordering::Equal => {
                if self.policy == CasePolicy::KeepLatest {
                    self.node_mut(id).word = word;
                }
                return (id, Insertion::Existing);
            }
        };

        match insertion {
            Insertion::Added(new) => (self.rebalance(id, new), insertion),
            Insertion::Existing => (id, insertion),
        }
    }

    fn alloc(&mut self, word: BoundedWord) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            word,
            left: None,
            right: None,
            parent: None,
            height: 1,
        });
        id
    }

    /// Looks up `word` ignoring case. Any length of query is accepted.
    pub fn search(&self, word: &str) -> Search<'_> {
        let key = fold(word);
        let mut current = self.root;
        let mut last_visited = None;
        while let Some(id) = current {
            last_visited = Some(id);
            let node = self.node(id);
            match key.as_str().cmp(node.word.key()) {
                Ordering::Equal => {
                    let found = Some(self.node_ref(id));
                    return Search {
                        found,
                        last_visited: found,
                    };
                }
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        Search {
            found: None,
            last_visited: last_visited.map(|id| self.node_ref(id)),
        }
    }

    pub fn get(&self, word: &str) -> Option<NodeRef<'_>> {
        self.search(word).found
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn height_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).height)
    }

    fn update_height(&mut self, id: NodeId) {
        let node = self.node(id);
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.node_mut(id).height = height;
    }

    /// Left height minus right height.
    fn balance_factor(&self, id: NodeId) -> isize {
        let node = self.node(id);
        self.height_of(node.left) as isize - self.height_of(node.right) as isize
    }

    fn cmp_nodes(&self, a: NodeId, b: NodeId) -> Ordering {
        self.node(a).word.cmp_caseless(&self.node(b).word)
    }

    fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.node_mut(id).left = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(id);
        }
    }

    fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.node_mut(id).right = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(id);
        }
    }
}

impl<'t> NodeRef<'t> {
    pub fn word(&self) -> &'t str {
        self.tree.node(self.id).word.as_str()
    }

    pub fn bounded_word(&self) -> &'t BoundedWord {
        &self.tree.node(self.id).word
    }

    /// Height of the subtree rooted here.
    pub fn height(&self) -> usize {
        self.tree.node(self.id).height
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.link(self.tree.node(self.id).parent)
    }

    pub fn left(&self) -> Option<NodeRef<'t>> {
        self.link(self.tree.node(self.id).left)
    }

    pub fn right(&self) -> Option<NodeRef<'t>> {
        self.link(self.tree.node(self.id).right)
    }

    /// The node with the next greater word, if any.
    pub fn successor(&self) -> Option<NodeRef<'t>> {
        self.link(self.tree.successor_of(self.id))
    }

    /// The node with the next smaller word, if any.
    pub fn predecessor(&self) -> Option<NodeRef<'t>> {
        self.link(self.tree.predecessor_of(self.id))
    }

    fn link(&self, id: Option<NodeId>) -> Option<NodeRef<'t>> {
        id.map(|id| self.tree.node_ref(id))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("word", &self.word())
            .field("height", &self.height())
            .finish()
    }
}

impl Extend<BoundedWord> for WordTree {
    fn extend<I: IntoIterator<Item = BoundedWord>>(&mut self, words: I) {
        for word in words {
            self.insert(word);
        }
    }
}

impl FromIterator<BoundedWord> for WordTree {
    fn from_iter<I: IntoIterator<Item = BoundedWord>>(words: I) -> Self {
        let mut tree = WordTree::new();
        tree.extend(words);
        tree
    }
}
