use itertools::Itertools;
use smallvec::SmallVec;
use std::cmp::Ordering;
use thiserror::Error;

use crate::tree::{NodeId, WordTree};

/// A broken tree invariant, as found by `WordTree::check_invariants`.
/// Normal use of the tree never produces these.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("root {0:?} has a parent")]
    RootHasParent(String),
    #[error("{child:?} does not point back to its parent {parent:?}")]
    BadParent { parent: String, child: String },
    #[error("{word:?} is on the wrong side of {ancestor:?}")]
    OutOfOrder { word: String, ancestor: String },
    #[error("{word:?} has cached height {cached} but its height is {actual}")]
    BadHeight {
        word: String,
        cached: usize,
        actual: usize,
    },
    #[error("{word:?} has balance factor {balance}")]
    Unbalanced { word: String, balance: isize },
    #[error("tree holds {len} words but {reached} can be reached from the root")]
    Unreachable { len: usize, reached: usize },
    #[error("in-order walk does not ascend after {0:?}")]
    BadWalk(String),
}

/// A node still to be checked, with the nearest ancestors that bound
/// its words from below and above.
#[derive(Clone, Copy)]
struct Pending {
    id: NodeId,
    lower: Option<NodeId>,
    upper: Option<NodeId>,
}

impl WordTree {
    /// Counts the nodes by walking the whole tree.
    pub fn count_nodes(&self) -> usize {
        self.count_under(self.root)
    }

    fn count_under(&self, at: Option<NodeId>) -> usize {
        match at {
            Some(id) => {
                let node = self.node(id);
                1 + self.count_under(node.left) + self.count_under(node.right)
            }
            None => 0,
        }
    }

    /// Returns true if no node's subtrees differ in height by more than 1.
    pub fn is_balanced(&self) -> bool {
        self.balanced_under(self.root)
    }

    fn balanced_under(&self, at: Option<NodeId>) -> bool {
        match at {
            Some(id) => {
                let node = self.node(id);
                self.balance_factor(id).abs() <= 1
                    && self.balanced_under(node.left)
                    && self.balanced_under(node.right)
            }
            None => true,
        }
    }

    /// Checks every invariant of the tree: word order, parent links,
    /// cached heights, the node count, and AVL balance.
    pub fn check_invariants(&self) -> Result<(), Violation> {
        self.check_structure()?;
        let mut stack: SmallVec<[NodeId; 64]> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let balance = self.balance_factor(id);
            if balance.abs() > 1 {
                return Err(Violation::Unbalanced {
                    word: self.word_of(id),
                    balance,
                });
            }
            let node = self.node(id);
            stack.extend(node.left.into_iter().chain(node.right));
        }
        Ok(())
    }

    /// Like `check_invariants` but without the balance check.
    pub(crate) fn check_structure(&self) -> Result<(), Violation> {
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err(Violation::RootHasParent(self.word_of(root)));
            }
        }

        let mut reached = 0;
        let mut stack: SmallVec<[Pending; 64]> = SmallVec::new();
        if let Some(id) = self.root {
            stack.push(Pending {
                id,
                lower: None,
                upper: None,
            });
        }
        while let Some(Pending { id, lower, upper }) = stack.pop() {
            reached += 1;
            let node = self.node(id);

            let bounds = [(lower, Ordering::Greater), (upper, Ordering::Less)];
            for (bound, expect) in bounds {
                match bound {
                    Some(bound) if self.cmp_nodes(id, bound) != expect => {
                        return Err(Violation::OutOfOrder {
                            word: self.word_of(id),
                            ancestor: self.word_of(bound),
                        });
                    }
                    _ => (),
                }
            }

            let actual = 1 + self.height_of(node.left).max(self.height_of(node.right));
            if node.height != actual {
                return Err(Violation::BadHeight {
                    word: self.word_of(id),
                    cached: node.height,
                    actual,
                });
            }

            for child in node.left.into_iter().chain(node.right) {
                if self.node(child).parent != Some(id) {
                    return Err(Violation::BadParent {
                        parent: self.word_of(id),
                        child: self.word_of(child),
                    });
                }
            }
            if let Some(left) = node.left {
                stack.push(Pending {
                    id: left,
                    lower,
                    upper: Some(id),
                });
            }
            if let Some(right) = node.right {
                stack.push(Pending {
                    id: right,
                    lower: Some(id),
                    upper,
                });
            }
        }
        if reached != self.len() {
            return Err(Violation::Unreachable {
                len: self.len(),
                reached,
            });
        }

        // The walk follows parent links, so this cross-checks them against
        // the child links verified above.
        let walk = self.root.map(|id| self.leftmost(id));
        let ids = std::iter::successors(walk, |&id| self.successor_of(id));
        let misordered = ids
            .tuple_windows()
            .find(|&(a, b)| self.cmp_nodes(a, b) != Ordering::Less);
        if let Some((a, _)) = misordered {
            return Err(Violation::BadWalk(self.word_of(a)));
        }
        Ok(())
    }

    fn word_of(&self, id: NodeId) -> String {
        self.node(id).word.to_string()
    }
}

#[cfg(test)]
mod test {
    use crate::tree::{Violation, WordTree};

    fn sample() -> WordTree {
        let mut tree = WordTree::new();
        for w in ["m", "f", "t", "c", "h", "p", "w"] {
            tree.insert_str(w).unwrap();
        }
        tree
    }

    #[test]
    fn test_counts() {
        let tree = sample();
        assert_eq!(7, tree.count_nodes());
        assert_eq!(3, tree.height());
        assert!(tree.is_balanced());
        assert_eq!(Ok(()), tree.check_invariants());
    }

    #[test]
    fn test_structure_without_balance() {
        let mut tree = sample();
        let m = tree.root.unwrap();
        let t = tree.rotate_left(m);
        assert_eq!("t", tree.root().unwrap().word());
        assert_eq!(Some(tree.leftmost(t)), tree.first().map(|n| n.id));
        assert_eq!(Ok(()), tree.check_structure());
        assert_eq!(
            Err(Violation::Unbalanced {
                word: "t".to_string(),
                balance: 2
            }),
            tree.check_invariants()
        );
        assert!(!tree.is_balanced());
    }

    #[test]
    fn test_detects_bad_parent() {
        let mut tree = sample();
        let c = tree.get("c").unwrap().id;
        let t = tree.get("t").unwrap().id;
        tree.node_mut(c).parent = Some(t);
        assert_eq!(
            Err(Violation::BadParent {
                parent: "f".to_string(),
                child: "c".to_string()
            }),
            tree.check_invariants()
        );
    }

    #[test]
    fn test_detects_bad_height() {
        let mut tree = sample();
        let m = tree.root.unwrap();
        tree.node_mut(m).height = 5;
        assert_eq!(
            Err(Violation::BadHeight {
                word: "m".to_string(),
                cached: 5,
                actual: 3
            }),
            tree.check_invariants()
        );
    }

    #[test]
    fn test_detects_disorder() {
        let mut tree = sample();
        let h = tree.get("h").unwrap().id;
        let p = tree.get("p").unwrap().id;
        let hword = tree.node(h).word.clone();
        let pword = tree.node(p).word.clone();
        tree.node_mut(h).word = pword;
        tree.node_mut(p).word = hword;
        assert!(matches!(
            tree.check_invariants(),
            Err(Violation::OutOfOrder { .. })
        ));
    }
}
