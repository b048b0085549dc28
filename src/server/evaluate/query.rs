use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::server::text::{is_valid_word, split_into_words, StopWords};

/// Parsed search query.
/// Plus words must appear in a document for it to score; a single minus word
/// present in a document vetoes it.
/// Both sets are deduplicated, stop-word free and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub plus_words: IndexSet<String>,
    pub minus_words: IndexSet<String>,
}

/// One classified token of the raw query
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(text: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    if !is_valid_word(text) {
        return Err(Error::InvalidWord(text.to_string()));
    }
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) if rest.is_empty() || rest.starts_with('-') => {
            return Err(Error::InvalidMinusWord(text.to_string()));
        }
        Some(rest) => (rest, true),
        None => (text, false),
    };
    Ok(QueryWord {
        data,
        is_minus,
        is_stop: stop_words.contains(data),
    })
}

impl Query {
    /// Parses raw query text
    ///
    /// # Arguments
    /// * `text` - space separated words, minus words prefixed with `-`
    /// * `stop_words` - words silently dropped from both sets
    ///
    /// # Errors
    /// * `Error::InvalidWord` - a token contains a control character
    /// * `Error::InvalidMinusWord` - a bare `-` or a token starting with `--`
    pub fn parse(text: &str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for token in split_into_words(text) {
            let word = parse_query_word(token, stop_words)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        query.plus_words.sort_unstable();
        query.minus_words.sort_unstable();
        trace!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            "query parsed"
        );
        Ok(query)
    }

    /// No plus and no minus words.
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
