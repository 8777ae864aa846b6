//! Error types for the [`scan`](super) module.
//!
//! Only [`ErrorKind::Traversal`] is fatal to a build. Every other kind is
//! scoped to the single sidecar it was raised for.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A scan error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A directory of the tree could not be listed.
    #[display("unable to traverse {}: {source}", path.display())]
    Traversal { path: PathBuf, source: std::io::Error },
    /// A sidecar, or the title directory around it, could not be read.
    #[display("unable to read {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The sidecar was read but its metadata could not be extracted.
    #[display("unable to extract metadata")]
    Extract,
    /// A discovered path does not live under the catalog root.
    #[display("{} is outside the catalog root", _0.display())]
    OutsideRoot(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if the whole build must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Traversal { .. })
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Traversal { .. } | Self::Read(_))
    }
}
