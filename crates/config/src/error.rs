//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Every variant here is fatal: configuration problems abort the run before
/// any code is processed.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Config file or environment contained values that don't fit the schema
    #[display("invalid configuration")]
    Invalid,
    /// Secondary search enabled without an API key
    #[display("secondary search is enabled but no API key is configured (API_KEY)")]
    MissingApiKey,
    /// Secondary search enabled without a search-scope identifier
    #[display("secondary search is enabled but no search engine id is configured (CUSTOM_SEARCH_ID)")]
    MissingEngineId,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
