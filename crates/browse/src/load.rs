//! Turning a catalog document into [`Entry`] values.
//!
//! Fetching the document is left to the caller; these functions only judge
//! what came back.

use crate::entry::Entry;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;

/// Parses a catalog document.
///
/// # Examples
///
/// ```rust
/// let entries = shelf_browse::load::parse(br#"[{"titulo": "Senhora", "capa": null}]"#).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].author(), shelf_extract::UNKNOWN_AUTHOR);
///
/// assert!(shelf_browse::load::parse(b"{\"titulo\": \"not an array\"}").is_err());
/// ```
pub fn parse(bytes: &[u8]) -> Result<Vec<Entry>> {
    serde_json::from_slice(bytes).or_raise(|| ErrorKind::MalformedCatalog)
}

/// Parses the body of a fetch for the catalog document, rejecting any
/// non-success status before looking at the body.
#[instrument(skip(body), fields(size = body.len()))]
pub fn parse_response(status: u16, body: &[u8]) -> Result<Vec<Entry>> {
    if !(200..300).contains(&status) {
        exn::bail!(ErrorKind::Http(status));
    }
    parse(body)
}

/// Reads and parses a catalog document from disk.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
    let entries = parse(&bytes)?;
    tracing::info!(count = entries.len(), "Catalog loaded");
    Ok(entries)
}
