use thiserror::Error;

use crate::server::document::DocumentId;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type.
///
/// Every variant is a synchronous rejection of the offending call; the server
/// state is left exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Negative id, or an id that is already live.
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(DocumentId),

    /// A stop word, document word or query word contains a control character.
    #[error("Invalid word: {0:?}")]
    InvalidWord(String),

    /// A bare `-` or a word starting with `--`.
    #[error("Invalid minus word: {0:?}")]
    InvalidMinusWord(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(Error::InvalidDocumentId(-1).to_string(), "Invalid document id: -1");
        assert_eq!(Error::InvalidWord("a\u{12}b".into()).to_string(), "Invalid word: \"a\\u{12}b\"");
        assert_eq!(Error::InvalidMinusWord("--x".into()).to_string(), "Invalid minus word: \"--x\"");
        assert_eq!(Error::DocumentNotFound(7).to_string(), "Document not found: 7");
    }
}
