//! Tuning constants shared by the server and its components.

/// Upper bound on the number of rows returned by a single top-documents search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Two relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Shard count of the relevance accumulator used by parallel scoring.
pub const DEFAULT_SHARD_COUNT: usize = 8;
