pub mod document;
pub mod duplicates;
pub mod evaluate;
pub mod policy;
pub mod process;
pub mod store;
pub mod text;

use std::collections::BTreeMap;

use crate::config::DEFAULT_SHARD_COUNT;
use crate::error::Result;

use self::document::{DocumentId, DocumentStatus};
use self::policy::ExecutionPolicy;
use self::store::{DocumentStore, Ids};
use self::text::StopWords;

/// SearchServer
/// Owns the stop words, the document store and the inverted index, and runs
/// every operation against them.
///
/// Writes take `&mut self` and reads take `&self`, so the borrow checker
/// enforces the single-writer discipline the index relies on. Reads can be
/// shared across threads freely.
#[derive(Debug, Clone)]
pub struct SearchServer {
    stop_words: StopWords,
    store: DocumentStore,
    /// shards of the relevance accumulator used by parallel scoring
    shard_count: usize,
}

impl SearchServer {
    /// Create a server from space separated stop words
    ///
    /// # Errors
    /// * `Error::InvalidWord` - a stop word contains a control character
    pub fn new(stop_words: &str) -> Result<Self> {
        Ok(Self::with_stop_words(StopWords::from_text(stop_words)?))
    }

    /// Create a server from a collection of stop words
    ///
    /// # Errors
    /// * `Error::InvalidWord` - a stop word contains a control character
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words(StopWords::from_words(stop_words)?))
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            store: DocumentStore::new(),
            shard_count: DEFAULT_SHARD_COUNT,
        }
    }

    /// Sets the shard count of the accumulator used by parallel scoring.
    /// Values below one are raised to one.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count.max(1);
        self
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    #[inline]
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Add a document
    ///
    /// # Arguments
    /// * `document_id` - non-negative id not used by a live document
    /// * `document` - space separated words
    /// * `status` - status tag
    /// * `ratings` - averaged with truncating division
    ///
    /// # Errors
    /// * `Error::InvalidDocumentId` - negative or live id
    /// * `Error::InvalidWord` - a word contains a control character; the
    ///   server is left unchanged
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.store
            .add_document(document_id, document, status, ratings, &self.stop_words)
    }

    /// Remove a document; an id that is not live is ignored.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        self.remove_document_with(ExecutionPolicy::Sequential, document_id);
    }

    /// Remove a document, clearing its postings with the given policy.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, document_id: DocumentId) {
        self.store.remove_document(policy, document_id);
    }

    /// Number of live documents
    #[inline]
    pub fn document_count(&self) -> usize {
        self.store.document_count()
    }

    /// word -> term frequency of a document.
    /// An id that is not live yields an empty map, not an error.
    pub fn word_frequencies(&self, document_id: DocumentId) -> &BTreeMap<String, f64> {
        self.store.word_frequencies(document_id)
    }

    /// Live id at `index` in ascending id order
    pub fn document_id_at(&self, index: usize) -> Option<DocumentId> {
        self.store.ids().nth(index)
    }

    /// Live ids in ascending order
    pub fn iter(&self) -> Ids<'_> {
        self.store.ids()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = Ids<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.ids()
    }
}
