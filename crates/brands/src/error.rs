//! Brand Registry Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A brand registry error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for brand registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Brand list file could not be read
    #[display("brand list not readable: {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
    /// Brand list file is not valid JSON or has the wrong shape
    #[display("brand list is not valid JSON: {}", _0.display())]
    Invalid(#[error(not(source))] PathBuf),
    /// Brand list parsed fine but contains no names
    #[display("brand list is empty: {}", _0.display())]
    Empty(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
