//! Lookup Error Types
//!
//! "Not found" is never an error here - clients return `Ok(None)` for empty
//! or unmatched responses. These kinds cover transport-level failures only.

use derive_more::{Display, Error};

/// A lookup error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// HTTP client could not be constructed
    #[display("http client construction failed")]
    Client,
    /// Connection failure, DNS failure, or timeout
    #[display("network error contacting {_0}")]
    Network(#[error(not(source))] String),
    /// Remote service answered with a non-success status
    #[display("unexpected HTTP status {_0}")]
    Status(#[error(not(source))] u16),
    /// Response body was not the JSON shape we expect
    #[display("malformed response body")]
    MalformedResponse,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(500..=599))
    }
}
