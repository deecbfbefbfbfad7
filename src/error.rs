//! Application Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories for the binary.
///
/// Anything that reaches `main` through these aborts the run; recoverable
/// conditions (cache unreadable, a single lookup failing) are handled and
/// logged where they happen instead.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Configuration failed to load or validate
    #[display("configuration error")]
    Config,
    /// Input file of codes could not be read
    #[display("input file not readable: {}", _0.display())]
    Input(#[error(not(source))] PathBuf),
    /// Input produced no codes at all
    #[display("no codes found!")]
    NoCodes,
    /// Operator-supplied brand list failed to load
    #[display("brand list failed to load")]
    Brands,
    /// Lookup client could not be constructed
    #[display("lookup client construction failed")]
    Client,
    /// An output file could not be written
    #[display("output not writable: {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Output(_))
    }
}
