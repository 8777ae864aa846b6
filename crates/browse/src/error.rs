//! Browser Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A browser error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for browser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why the catalog couldn't be loaded or presented.
///
/// Loading failures ([`Io`](Self::Io), [`Http`](Self::Http) and
/// [`MalformedCatalog`](Self::MalformedCatalog)) all leave the
/// [`Store`](crate::Store) empty and showing its error state.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The catalog document couldn't be read from disk.
    #[display("unable to read catalog from {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// Whoever fetched the catalog got a non-success status back.
    #[display("catalog request failed with HTTP status {_0}")]
    Http(#[error(not(source))] u16),
    /// The document isn't a JSON array of catalog entries.
    #[display("catalog document is malformed")]
    MalformedCatalog,
    /// An embedded template is missing or doesn't compile or render.
    #[display("unable to render template")]
    Template,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Http(status) => *status >= 500 || *status == 408 || *status == 429,
            Self::MalformedCatalog | Self::Template => false,
        }
    }
}
