/// Error taxonomy for the reading client
///
/// Failures fall into two groups:
/// - I/O failures (`Network`, `Parse`, `Storage`) are caught at the component
///   boundary, logged, and degraded to a safe default (empty result list,
///   empty bookmark set, stop loading more).
/// - Contract failures (`MalformedBookReference`, `InvalidCapacity`) abort
///   the operation that hit them, since a wrong page count would corrupt
///   page-indexed bookmarks.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ReaderError>;

/// All failures the reading client can report
#[derive(Debug, Clone, Error)]
pub enum ReaderError {
    /// Catalog or content host unreachable, or a non-2xx status
    #[error("network request failed: {0}")]
    Network(String),

    /// Response body could not be decoded (malformed JSON or text)
    #[error("malformed response body: {0}")]
    Parse(String),

    /// No numeric book id could be extracted from the catalog entry
    #[error("no numeric book id in content reference {0:?}")]
    MalformedBookReference(String),

    /// The bookmark store could not be read or written
    #[error("bookmark storage unavailable: {0}")]
    Storage(String),

    /// Page capacity must be a positive number of characters
    #[error("page capacity must be positive")]
    InvalidCapacity,
}

impl From<reqwest::Error> for ReaderError {
    fn from(err: reqwest::Error) -> Self {
        // A body that arrived but failed to decode is a parse fault;
        // everything else (connect, timeout, status) is a network fault.
        if err.is_decode() {
            ReaderError::Parse(err.to_string())
        } else {
            ReaderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReaderError {
    fn from(err: serde_json::Error) -> Self {
        ReaderError::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for ReaderError {
    fn from(err: rusqlite::Error) -> Self {
        ReaderError::Storage(err.to_string())
    }
}
