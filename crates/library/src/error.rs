//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Discovering or reading sidecars failed; the child error says which.
    #[display("unable to scan catalog root")]
    Scan,
    /// The catalog could not be turned into JSON.
    #[display("unable to serialize catalog")]
    Serialize,
    /// The catalog document could not be written to disk.
    #[display("unable to write catalog to {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Write(_) => true,
            _ => false,
        }
    }
}
