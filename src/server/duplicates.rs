use std::collections::BTreeSet;

use tracing::info;

use crate::server::document::DocumentId;
use crate::server::SearchServer;

/// Removes documents whose set of words equals that of a document with a
/// lower id. Word frequencies are ignored, only the sets are compared.
///
/// # Returns
/// * `Vec<DocumentId>` - removed ids, ascending
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    crate::log_duration!("remove duplicates");
    let duplicates: Vec<DocumentId> = {
        let mut seen: BTreeSet<Vec<&str>> = BTreeSet::new();
        server
            .iter()
            .filter(|&document_id| {
                let words = server
                    .word_frequencies(document_id)
                    .keys()
                    .map(String::as_str)
                    .collect();
                // ids ascend, so the first holder of a word set is the one kept
                !seen.insert(words)
            })
            .collect()
    };

    for &document_id in &duplicates {
        server.remove_document(document_id);
        info!(document_id, "found duplicate document");
    }
    duplicates
}
