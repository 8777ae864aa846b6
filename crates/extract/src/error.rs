//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Every one of them means "skip this sidecar": a single broken file never
/// invalidates the rest of a library.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The XML is too broken to build a document tree from.
    #[display("malformed XML: {_0}")]
    MalformedXml(#[error(not(source))] String),
    /// The document parsed, but it isn't an OPF package.
    #[display("invalid sidecar: root element is not an OPF package")]
    InvalidDocument,
    /// A required structural element could not be found in the document.
    #[display("missing required element: {_0}")]
    MissingField(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The sidecar is either valid or it isn't; re-reading won't change that.
        false
    }
}
