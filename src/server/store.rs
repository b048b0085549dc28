use std::collections::{btree_map, BTreeMap};
use std::iter::Copied;
use std::ops::Bound;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::server::document::{compute_average_rating, DocumentId, DocumentStatus, Rating};
use crate::server::policy::ExecutionPolicy;
use crate::server::text::{is_valid_word, split_into_words, StopWords};

/// Iterator over live ids, ascending.
pub type Ids<'a> = Copied<btree_map::Keys<'a, DocumentId, DocumentData>>;

/// Shared by every lookup miss of `word_frequencies`.
static EMPTY_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// Per-document metadata, immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentData {
    pub rating: Rating,
    pub status: DocumentStatus,
    /// word -> term frequency, values sum to 1
    pub word_frequencies: BTreeMap<String, f64>,
}

/// DocumentStore
/// Keeps the documents and the inverted index in step.
///
/// Internally, it holds:
/// - `documents`: id -> rating, status and the document's own term frequencies
/// - `word_to_document_freqs`: word -> (id -> term frequency), the same numbers
///   indexed the other way round
///
/// Every posting list only references live ids, and no posting list is left
/// empty after a removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    documents: BTreeMap<DocumentId, DocumentData>,
    word_to_document_freqs: BTreeMap<String, BTreeMap<DocumentId, f64>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a document
    ///
    /// # Arguments
    /// * `document_id` - non-negative id, not live yet
    /// * `text` - space separated words
    /// * `status` - status tag stored with the document
    /// * `ratings` - ratings to average
    /// * `stop_words` - words left out of the index
    ///
    /// # Errors
    /// * `Error::InvalidDocumentId` - negative or already live id
    /// * `Error::InvalidWord` - a content word contains a control character;
    ///   nothing is stored in that case
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
        stop_words: &StopWords,
    ) -> Result<()> {
        if document_id < 0 || self.documents.contains_key(&document_id) {
            warn!(document_id, "rejected document id");
            return Err(Error::InvalidDocumentId(document_id));
        }

        let words: Vec<&str> = split_into_words(text)
            .filter(|word| !stop_words.contains(word))
            .collect();
        // validate everything before the index is touched
        if let Some(word) = words.iter().find(|word| !is_valid_word(word)) {
            warn!(document_id, word, "rejected document word");
            return Err(Error::InvalidWord(word.to_string()));
        }

        let mut word_frequencies: BTreeMap<String, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in &words {
                *word_frequencies.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
            }
        }
        for (word, term_freq) in &word_frequencies {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(document_id, *term_freq);
        }

        debug!(
            document_id,
            words = words.len(),
            unique_words = word_frequencies.len(),
            "document added"
        );
        self.documents.insert(
            document_id,
            DocumentData {
                rating: compute_average_rating(ratings),
                status,
                word_frequencies,
            },
        );
        Ok(())
    }

    /// Drops a document and every posting that references it.
    /// Returns `false` when the id is not live.
    pub fn remove_document(&mut self, policy: ExecutionPolicy, document_id: DocumentId) -> bool {
        let Some(data) = self.documents.remove(&document_id) else {
            return false;
        };
        let words = &data.word_frequencies;

        match policy {
            ExecutionPolicy::Sequential => {
                for word in words.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                        postings.remove(&document_id);
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                if let (Some(first), Some(last)) = (words.keys().next(), words.keys().next_back()) {
                    // the document's words are sorted, so only this key range can hold them
                    let postings: Vec<&mut BTreeMap<DocumentId, f64>> = self
                        .word_to_document_freqs
                        .range_mut::<str, _>((Bound::Included(first.as_str()), Bound::Included(last.as_str())))
                        .filter(|(word, _)| words.contains_key(word.as_str()))
                        .map(|(_, postings)| postings)
                        .collect();
                    postings.into_par_iter().for_each(|postings| {
                        postings.remove(&document_id);
                    });
                }
            }
        }

        for word in words.keys() {
            if self
                .word_to_document_freqs
                .get(word)
                .is_some_and(|postings| postings.is_empty())
            {
                self.word_to_document_freqs.remove(word);
            }
        }

        debug!(document_id, words = words.len(), ?policy, "document removed");
        true
    }

    #[inline]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn contains(&self, document_id: DocumentId) -> bool {
        self.documents.contains_key(&document_id)
    }

    #[inline]
    pub fn document(&self, document_id: DocumentId) -> Option<&DocumentData> {
        self.documents.get(&document_id)
    }

    /// Live ids in ascending order
    pub fn ids(&self) -> Ids<'_> {
        self.documents.keys().copied()
    }

    /// Posting list of `word`, if any live document contains it.
    #[inline]
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.word_to_document_freqs.get(word)
    }

    /// Whether `word` occurs in the document.
    #[inline]
    pub fn contains_word(&self, word: &str, document_id: DocumentId) -> bool {
        self.postings(word)
            .is_some_and(|postings| postings.contains_key(&document_id))
    }

    /// Number of distinct indexed words.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    /// IDF of `word`: `ln(document_count / documents containing word)`.
    /// `None` when no live document contains the word.
    pub fn inverse_document_freq(&self, word: &str) -> Option<f64> {
        let postings = self.postings(word).filter(|postings| !postings.is_empty())?;
        Some((self.document_count() as f64 / postings.len() as f64).ln())
    }

    /// Term frequencies of a document; empty when the id is not live.
    pub fn word_frequencies(&self, document_id: DocumentId) -> &BTreeMap<String, f64> {
        self.documents
            .get(&document_id)
            .map_or(&EMPTY_FREQUENCIES, |data| &data.word_frequencies)
    }
}
