#![warn(missing_debug_implementations)]

pub mod dictionary;
pub mod tree;
pub mod word;

pub use crate::dictionary::{Dictionary, Lookup, Suggestions};
pub use crate::tree::{CasePolicy, NodeRef, Search, Violation, WordTree};
pub use crate::word::{BoundedWord, WordError, MAX_WORD_LEN};

pub trait Speller {
    /// Returns true if the word is in the dictionary, otherwise false.
    fn spellcheck(&self, word: &str) -> bool;

    /// Returns a list of possible corrections to a misspelled word.
    /// The list may be empty.
    fn suggestions(&self, word: &str, max: usize) -> Vec<String>;

    /// Accept `word` into the dictionary.
    /// Returns false if the word could not be accepted (for example
    /// if it is too long or contains whitespace), otherwise returns true.
    fn add_word(&mut self, word: &str) -> bool;
}
