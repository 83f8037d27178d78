use caseless::default_case_fold_str;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// The longest word, in chars, that the dictionary will hold.
pub const MAX_WORD_LEN: usize = 99;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word {0:?} contains whitespace")]
    Whitespace(String),
    #[error("word {word:?} is {len} chars long, the limit is {}", MAX_WORD_LEN)]
    TooLong { word: String, len: usize },
}

/// A dictionary word of at most `MAX_WORD_LEN` chars.
///
/// The text is stored as given, together with its case folded form.
/// All ordering between words is done on the folded form, so "Apple"
/// and "APPLE" are the same word as far as the tree is concerned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundedWord {
    text: String,
    key: String,
}

impl BoundedWord {
    /// Validates `text` and returns it as a word.
    /// Oversized text is rejected.
    pub fn new(text: &str) -> Result<Self, WordError> {
        Self::check_chars(text)?;
        let len = text.chars().count();
        if len > MAX_WORD_LEN {
            return Err(WordError::TooLong {
                word: text.to_string(),
                len,
            });
        }
        Ok(Self::from_checked(text))
    }

    /// Like `new`, but oversized text is cut down to its first
    /// `MAX_WORD_LEN` chars instead of being rejected.
    pub fn truncated(text: &str) -> Result<Self, WordError> {
        Self::check_chars(text)?;
        let text = match text.char_indices().nth(MAX_WORD_LEN) {
            Some((end, _)) => &text[..end],
            None => text,
        };
        Ok(Self::from_checked(text))
    }

    fn check_chars(text: &str) -> Result<(), WordError> {
        if text.is_empty() {
            Err(WordError::Empty)
        } else if text.chars().any(char::is_whitespace) {
            Err(WordError::Whitespace(text.to_string()))
        } else {
            Ok(())
        }
    }

    fn from_checked(text: &str) -> Self {
        BoundedWord {
            text: text.to_string(),
            key: fold(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The case folded form used for comparisons.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Compares the two words ignoring case.
    pub fn cmp_caseless(&self, other: &BoundedWord) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for BoundedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for BoundedWord {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl TryFrom<&str> for BoundedWord {
    type Error = WordError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        BoundedWord::new(text)
    }
}

/// Case folds `text` into the form that word keys are compared in.
pub(crate) fn fold(text: &str) -> String {
    default_case_fold_str(text)
}
