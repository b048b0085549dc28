use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied document id. Negative values are rejected on insertion.
pub type DocumentId = i32;

/// Average of the ratings supplied with a document.
pub type Rating = i32;

/// Status tag fixed when a document is added.
///
/// `Removed` exists for callers that track their own soft deletes; the server
/// never assigns it and `remove_document` drops the record instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// One row of a search result
/// (Document ID, relevance, rating)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: Rating,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: Rating) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Integer average of the ratings, truncated toward zero.
/// An empty slice averages to 0.
pub(crate) fn compute_average_rating(ratings: &[i32]) -> Rating {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as Rating
}
