use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::path::relative;
use crate::scan::assets;
use crate::scan::error::{ErrorKind, Result as ScanResult};
use exn::{OptionExt, ResultExt};
use shelf_config::Config;
use shelf_extract::extract;
use shelf_extract::models::Book;
use std::path::Path;
use tokio::fs;
use tracing::instrument;

/// Builds the catalog entry for one sidecar.
///
/// The sidecar's metadata is combined with what sits next to it on disk: the
/// cover image and the first book file in its title directory. The author
/// folder is the directory two levels above the sidecar, following the
/// `root/author/title/sidecar` layout. Every path in the returned [`Book`] is
/// relative to `root`, which is expected to be canonical (as are sidecar paths
/// produced by [`discover`](super::discover) from a canonical root).
///
/// A missing cover or book file is not an error; the corresponding field is
/// simply `None`.
pub async fn scan_file(root: &Path, sidecar: &Path, config: &Config) -> LibraryResult<Book> {
    scan_file_inner(root, sidecar, config).await.or_raise(|| LibraryErrorKind::Scan)
}

#[instrument(skip_all, fields(sidecar = %sidecar.display()))]
pub(crate) async fn scan_file_inner(root: &Path, sidecar: &Path, config: &Config) -> ScanResult<Book> {
    let bytes = fs::read(sidecar).await.or_raise(|| ErrorKind::Read(sidecar.to_path_buf()))?;
    let metadata = extract(&bytes, &config.identifier_scheme).or_raise(|| ErrorKind::Extract)?;

    let folder = sidecar.parent().ok_or_raise(|| ErrorKind::OutsideRoot(sidecar.to_path_buf()))?;
    let cover = match assets::cover(folder, config).await {
        Some(cover) => Some(relative(root, &cover)?),
        None => None,
    };
    let file = match assets::book_file(folder, config).await? {
        Some(file) => Some(relative(root, &file)?),
        None => None,
    };
    let author_folder = folder
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source_folder = relative(root, folder)?;

    Ok(Book::new(metadata, cover, file, author_folder, source_folder))
}
