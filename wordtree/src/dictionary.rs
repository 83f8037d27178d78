use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::read_to_string;
use std::path::Path;

use crate::tree::{CasePolicy, NodeRef, WordTree};
use crate::word::{BoundedWord, MAX_WORD_LEN};
use crate::Speller;

/// A word list loaded into a `WordTree`.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    tree: WordTree,
    words_read: usize,
    skipped_lines: Vec<usize>,
}

/// The answer to a `Dictionary::lookup`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<'t> {
    Found(NodeRef<'t>),
    /// The word is not in the dictionary. The suggestions are only
    /// absent when the dictionary is empty.
    Missing(Option<Suggestions<'t>>),
}

/// Words next to a missing word in the dictionary's sorted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestions<'t> {
    /// Where the search for the missing word ended.
    pub closest: NodeRef<'t>,
    pub successor: Option<NodeRef<'t>>,
    pub predecessor: Option<NodeRef<'t>>,
}

impl<'t> Suggestions<'t> {
    pub fn around(closest: NodeRef<'t>) -> Self {
        Suggestions {
            closest,
            successor: closest.successor(),
            predecessor: closest.predecessor(),
        }
    }

    /// The suggested words, closest first, without repeats.
    pub fn words(&self) -> Vec<&'t str> {
        let mut words = vec![self.closest.word()];
        for node in [self.successor, self.predecessor].into_iter().flatten() {
            if !words.contains(&node.word()) {
                words.push(node.word());
            }
        }
        words
    }
}

impl Dictionary {
    pub fn new(policy: CasePolicy) -> Self {
        Dictionary {
            tree: WordTree::with_policy(policy),
            ..Dictionary::default()
        }
    }

    /// Loads a word list with one word per line.
    pub fn load(path: &Path, policy: CasePolicy) -> Result<Self> {
        let text = read_to_string(path)
            .with_context(|| format!("Could not read words from {}", path.display()))?;
        let dict = Self::from_text(&text, policy);
        debug!(
            "Loaded {} words ({} distinct) from {}, tree height {}",
            dict.words_read,
            dict.tree.len(),
            path.display(),
            dict.tree.height()
        );
        Ok(dict)
    }

    /// Builds a dictionary from word list text.
    /// The first whitespace-separated token on each line is the word;
    /// anything after it is ignored. Lines without a token are skipped.
    pub fn from_text(text: &str, policy: CasePolicy) -> Self {
        let mut dict = Dictionary::new(policy);
        for (idx, line) in text.lines().enumerate() {
            let line_nr = idx + 1;
            let token = match line.split_whitespace().next() {
                Some(token) => token,
                None => {
                    warn!("Skipping invalid line {}", line_nr);
                    dict.skipped_lines.push(line_nr);
                    continue;
                }
            };
            match BoundedWord::truncated(token) {
                Ok(word) => {
                    if word.as_str().len() < token.len() {
                        warn!("Line {}: word cut down to {} chars", line_nr, MAX_WORD_LEN);
                    }
                    dict.tree.insert(word);
                    dict.words_read += 1;
                }
                Err(err) => {
                    warn!("Skipping invalid line {}: {}", line_nr, err);
                    dict.skipped_lines.push(line_nr);
                }
            }
        }
        dict
    }

    pub fn tree(&self) -> &WordTree {
        &self.tree
    }

    /// How many lines supplied a word, counting repeats.
    pub fn words_read(&self) -> usize {
        self.words_read
    }

    /// 1-based numbers of the lines that did not supply a word.
    pub fn skipped_lines(&self) -> &[usize] {
        &self.skipped_lines
    }

    pub fn lookup(&self, word: &str) -> Lookup<'_> {
        let search = self.tree.search(word);
        match search.found {
            Some(node) => Lookup::Found(node),
            None => Lookup::Missing(search.last_visited.map(Suggestions::around)),
        }
    }
}

impl Speller for Dictionary {
    fn spellcheck(&self, word: &str) -> bool {
        self.tree.contains(word)
    }

    fn suggestions(&self, word: &str, max: usize) -> Vec<String> {
        match self.lookup(word) {
            Lookup::Found(_) | Lookup::Missing(None) => Vec::new(),
            Lookup::Missing(Some(suggs)) => suggs
                .words()
                .into_iter()
                .take(max)
                .map(str::to_string)
                .collect(),
        }
    }

    fn add_word(&mut self, word: &str) -> bool {
        match BoundedWord::new(word.trim()) {
            Ok(word) => {
                self.tree.insert(word);
                true
            }
            Err(_) => false,
        }
    }
}
