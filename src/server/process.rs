//! Batch helpers that fan many queries out over the rayon pool.

use rayon::prelude::*;

use crate::error::Result;
use crate::server::document::Document;
use crate::server::SearchServer;

/// Runs `find_top_documents` for every query in parallel
///
/// # Arguments
/// * `server` - server to search
/// * `queries` - raw query texts
///
/// # Returns
/// * `Vec<Vec<Document>>` - one result list per query, in input order
///
/// # Errors
/// Fails when any query is malformed.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    crate::log_duration!(format!("process {} queries", queries.len()));
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// Like [`process_queries`], with the per-query lists concatenated in input order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    let results = process_queries(server, queries)?;
    let total: usize = results.par_iter().map(Vec::len).sum();
    let mut joined = Vec::with_capacity(total);
    for documents in results {
        joined.extend(documents);
    }
    Ok(joined)
}
