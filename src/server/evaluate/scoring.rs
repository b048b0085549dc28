use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::error::{Error, Result};
use crate::server::document::{Document, DocumentId, DocumentStatus, Rating};
use crate::server::evaluate::query::Query;
use crate::server::policy::ExecutionPolicy;
use crate::server::SearchServer;
use crate::utils::datastruct::concurrent_map::ConcurrentMap;

/// Orders by relevance descending; relevances closer than
/// [`RELEVANCE_EPSILON`] count as a tie and the higher rating goes first.
///
/// A plain epsilon comparator is not a total order, so the rows are first
/// sorted on exact relevance and each run of neighbours closer than the
/// epsilon is then reordered by rating.
fn sort_by_relevance(documents: &mut [Document], policy: ExecutionPolicy) {
    let by_relevance = |lhs: &Document, rhs: &Document| rhs.relevance.total_cmp(&lhs.relevance);
    let by_rating = |lhs: &Document, rhs: &Document| rhs.rating.cmp(&lhs.rating);
    match policy {
        ExecutionPolicy::Sequential => documents.sort_by(by_relevance),
        ExecutionPolicy::Parallel => documents.par_sort_by(by_relevance),
    }

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && (documents[end - 1].relevance - documents[end].relevance).abs() < RELEVANCE_EPSILON
        {
            end += 1;
        }
        if end - start > 1 {
            documents[start..end].sort_by(by_rating);
        }
        start = end;
    }
}

/// Search implementations
impl SearchServer {
    /// Top documents with status `Actual`, scored sequentially
    ///
    /// # Arguments
    /// * `raw_query` - query text, minus words prefixed with `-`
    ///
    /// # Returns
    /// * `Vec<Document>` - at most [`MAX_RESULT_DOCUMENT_COUNT`] rows, best first
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status, scored sequentially
    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_with(ExecutionPolicy::Sequential, raw_query, status)
    }

    /// Top documents with the given status
    pub fn find_top_documents_by_status_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(policy, raw_query, move |_, document_status, _| document_status == status)
    }

    /// Top documents accepted by `predicate`
    ///
    /// # Arguments
    /// * `policy` - sequential or parallel scoring
    /// * `raw_query` - query text
    /// * `predicate` - filter over (id, status, rating), called from worker
    ///   threads under `ExecutionPolicy::Parallel`
    ///
    /// # Errors
    /// * `Error::InvalidWord` / `Error::InvalidMinusWord` - malformed query
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut matched = self.find_all_documents(policy, &query, &predicate);
        sort_by_relevance(&mut matched, policy);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Scores every document reached by a plus word and accepted by the
    /// predicate, then drops every document containing a minus word.
    /// Rows come out in ascending id order.
    pub fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync + ?Sized,
    {
        let relevance = match policy {
            ExecutionPolicy::Sequential => self.relevance_sequential(query, predicate),
            ExecutionPolicy::Parallel => self.relevance_parallel(query, predicate),
        };
        relevance
            .into_iter()
            .filter_map(|(document_id, relevance)| {
                self.store
                    .document(document_id)
                    .map(|data| Document::new(document_id, relevance, data.rating))
            })
            .collect()
    }

    fn relevance_sequential<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync + ?Sized,
    {
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let (Some(postings), Some(idf)) = (self.store.postings(word), self.store.inverse_document_freq(word)) else {
                continue;
            };
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.store.document(document_id) else {
                    continue;
                };
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.store.postings(word) {
                for document_id in postings.keys() {
                    document_to_relevance.remove(document_id);
                }
            }
        }
        document_to_relevance
    }

    fn relevance_parallel<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync + ?Sized,
    {
        let document_to_relevance: ConcurrentMap<DocumentId, f64> = ConcurrentMap::with_shard_count(self.shard_count);

        query.plus_words.par_iter().for_each(|word| {
            let (Some(postings), Some(idf)) = (self.store.postings(word), self.store.inverse_document_freq(word)) else {
                return;
            };
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.store.document(document_id) else {
                    continue;
                };
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.access(document_id) += term_freq * idf;
                }
            }
        });

        // every plus word has joined, so minus words veto the final sums
        query.minus_words.par_iter().for_each(|word| {
            if let Some(postings) = self.store.postings(word) {
                for &document_id in postings.keys() {
                    document_to_relevance.erase(document_id);
                }
            }
        });

        document_to_relevance.into_ordinary_map()
    }

    /// Plus words of the query found in the document, sequentially
    pub fn match_document(&self, raw_query: &str, document_id: DocumentId) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    /// Plus words of the query found in the document
    ///
    /// # Returns
    /// * `(Vec<String>, DocumentStatus)` - matched words in ascending order,
    ///   empty when any minus word is in the document, and the document status
    ///
    /// # Errors
    /// * `Error::DocumentNotFound` - the id is not live
    /// * `Error::InvalidWord` / `Error::InvalidMinusWord` - malformed query
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self
            .store
            .document(document_id)
            .map(|data| data.status)
            .ok_or(Error::DocumentNotFound(document_id))?;
        let query = Query::parse(raw_query, &self.stop_words)?;
        let in_document = |word: &String| self.store.contains_word(word, document_id);

        let vetoed = match policy {
            ExecutionPolicy::Sequential => query.minus_words.iter().any(in_document),
            ExecutionPolicy::Parallel => query.minus_words.par_iter().any(in_document),
        };
        if vetoed {
            return Ok((Vec::new(), status));
        }

        let matched_words: Vec<String> = match policy {
            ExecutionPolicy::Sequential => query.plus_words.iter().filter(|word| in_document(*word)).cloned().collect(),
            ExecutionPolicy::Parallel => query.plus_words.par_iter().filter(|word| in_document(*word)).cloned().collect(),
        };
        Ok((matched_words, status))
    }
}

/// Orders two rows the way search results are ordered.
/// Exposed for callers merging results of several searches.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}
