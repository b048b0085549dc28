use std::collections::BTreeSet;

use tracing::warn;

use crate::error::{Error, Result};

/// A word is valid when none of its characters is a control character
/// below U+0020.
#[inline]
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

/// Splits text on the ASCII space and drops empty pieces.
///
/// Only `' '` separates words. Tabs, newlines and other control characters
/// stay inside the word so that validation can reject them.
#[inline]
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// StopWords
/// Immutable set of validated words that are never indexed and never matched.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Builds the set from space separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_into_words(text))
    }

    /// Builds the set from any collection of words
    ///
    /// # Arguments
    /// * `words` - candidate stop words, empty strings are skipped
    ///
    /// # Errors
    /// * `Error::InvalidWord` - a word contains a control character
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                warn!(word, "rejected stop word");
                return Err(Error::InvalidWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_invalidate_a_word() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("well-groomed"));
        assert!(is_valid_word("кот"));
        assert!(is_valid_word(""));
        assert!(!is_valid_word("ca\u{12}t"));
        assert!(!is_valid_word("\u{0}"));
        assert!(!is_valid_word("tab\there"));
        // U+0020 itself is not a control character
        assert!(is_valid_word(" "));
    }

    #[test]
    fn split_drops_empty_pieces() {
        let words: Vec<&str> = split_into_words("  white cat   and  ").collect();
        assert_eq!(words, vec!["white", "cat", "and"]);
        assert_eq!(split_into_words("").count(), 0);
    }

    #[test]
    fn split_keeps_control_characters_inside_words() {
        let words: Vec<&str> = split_into_words("a\tb c").collect();
        assert_eq!(words, vec!["a\tb", "c"]);
    }

    #[test]
    fn stop_words_from_text_and_collection_agree() {
        let from_text = StopWords::from_text("in the  in").unwrap();
        let from_words = StopWords::from_words(["the", "in", ""]).unwrap();
        assert_eq!(from_text.len(), 2);
        assert_eq!(
            from_text.iter().collect::<Vec<_>>(),
            from_words.iter().collect::<Vec<_>>()
        );
        assert!(from_text.contains("in"));
        assert!(!from_text.contains("cat"));
    }

    #[test]
    fn invalid_stop_word_is_rejected() {
        let err = StopWords::from_words(vec!["in".to_string(), "th\u{1}e".to_string()]).unwrap_err();
        assert_eq!(err, Error::InvalidWord("th\u{1}e".to_string()));
    }
}
