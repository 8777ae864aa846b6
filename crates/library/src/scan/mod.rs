//! Sidecar discovery and per-sidecar record building.
//!
//! [`discover`] walks the catalog root depth-first and streams the path of
//! every metadata sidecar, never descending into the trash directory.
//! [`scan_file`] turns one sidecar into a [`Book`](shelf_extract::models::Book),
//! resolving the cover and book file that sit beside it.

mod assets;
pub mod error;
mod file;
mod stream;

pub use self::file::scan_file;
pub(crate) use self::file::scan_file_inner;
pub use self::stream::{discover, sidecars};
