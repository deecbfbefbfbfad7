//! Cache Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// A load failure is expected to be downgraded to a warning by the caller;
/// the run proceeds with an empty cache. A flush failure must be surfaced to
/// the operator but never discards in-memory results.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Cache file exists but could not be read
    #[display("cache file not readable: {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
    /// Cache file contents are not a valid JSON record list
    #[display("cache file is corrupt: {}", _0.display())]
    Corrupt(#[error(not(source))] PathBuf),
    /// Cache file (or its parent directory) could not be written
    #[display("cache file not writable: {}", _0.display())]
    Unwritable(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unwritable(_))
    }
}
