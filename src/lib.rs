/// This crate is an in-memory full-text search server ranking documents by TF-IDF.
pub mod config;
pub mod error;
pub mod server;
pub mod utils;

/// Search Server
/// The top-level struct of this crate, providing document indexing and search.
/// It stores documents together with a status tag and an average rating, and
/// answers queries of plus and minus words with the most relevant documents.
///
/// Internally, it holds:
/// - The stop word set
/// - Per-document term frequencies, rating and status
/// - An inverted index of word -> document -> term frequency
///
/// Mutation (`add_document`, `remove_document`) takes `&mut self`; queries take
/// `&self` and may run concurrently from many threads.
///
/// Each query operation has a `_with` variant taking an [`ExecutionPolicy`].
/// Both policies produce the same result set.
///
/// # Examples
/// ```
/// use search_server::{DocumentStatus, SearchServer};
///
/// let mut server = SearchServer::new("and with").unwrap();
/// server.add_document(1, "white cat and fashion collar", DocumentStatus::Actual, &[8, -3]).unwrap();
/// server.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
///
/// let found = server.find_top_documents("fluffy cat -collar").unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, 2);
/// ```
pub use server::SearchServer;

/// Search result
/// Holds the document id, the TF-IDF relevance for the query and the
/// average rating.
///
/// # Serialization
/// Supported.
pub use server::document::Document;

/// Document status tag
/// `Actual` is the default used by unfiltered searches.
pub use server::document::DocumentStatus;

pub use server::document::{DocumentId, Rating};

/// Execution Policy
/// Selects sequential or rayon-parallel execution for a single call.
pub use server::policy::ExecutionPolicy;

/// Error type of every fallible operation, and its `Result` alias.
pub use error::{Error, Result};

/// Parsed query
/// Deduplicated, sorted plus and minus words with stop words removed.
pub use server::evaluate::query::Query;

/// Stop word set
/// Words ignored both when indexing documents and when parsing queries.
pub use server::text::StopWords;

/// Comparator used to rank search results.
/// Relevance descending; relevances within `RELEVANCE_EPSILON` are ordered by
/// rating descending.
pub use server::evaluate::scoring::compare_documents;

/// Batch query helpers running every query on the rayon pool.
pub use server::process::{process_queries, process_queries_joined};

/// Removes documents whose word set repeats one with a lower id.
pub use server::duplicates::remove_duplicates;

/// Sharded Concurrent Map
/// An ordered map split into independently locked shards, used to accumulate
/// relevance from many threads at once.
pub use utils::datastruct::concurrent_map::ConcurrentMap;

pub use config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
