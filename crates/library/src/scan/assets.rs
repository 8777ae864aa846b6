//! Companion files that sit beside a sidecar in its title directory.

use crate::scan::error::{ErrorKind, Result};
use exn::ResultExt;
use shelf_config::Config;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The cover image, if the directory has a regular file with exactly the
/// configured cover filename. A missing cover is not an error.
pub(crate) async fn cover(dir: &Path, config: &Config) -> Option<PathBuf> {
    let path = dir.join(&config.cover_filename);
    match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Some(path),
        _ => None,
    }
}

/// The first regular file, in directory-listing order, whose extension is one
/// of the configured book formats.
pub(crate) async fn book_file(dir: &Path, config: &Config) -> Result<Option<PathBuf>> {
    let unreadable = || ErrorKind::Read(dir.to_path_buf());
    let mut entries = fs::read_dir(dir).await.or_raise(unreadable)?;
    while let Some(entry) = entries.next_entry().await.or_raise(unreadable)? {
        let file_type = entry.file_type().await.or_raise(unreadable)?;
        if file_type.is_file() && config.is_book_file(&entry.file_name().to_string_lossy()) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as sync_fs;

    #[tokio::test]
    async fn test_cover_present() {
        let temp_dir = tempfile::tempdir().unwrap();
        sync_fs::write(temp_dir.path().join("cover.jpg"), b"jpeg").unwrap();
        let cover = cover(temp_dir.path(), &Config::default()).await;
        assert_eq!(cover, Some(temp_dir.path().join("cover.jpg")));
    }

    #[tokio::test]
    async fn test_cover_absent_or_not_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(cover(temp_dir.path(), &Config::default()).await, None);
        sync_fs::create_dir(temp_dir.path().join("cover.jpg")).unwrap();
        assert_eq!(cover(temp_dir.path(), &Config::default()).await, None);
    }

    #[tokio::test]
    async fn test_book_file_matches_extension_case_insensitively() {
        let temp_dir = tempfile::tempdir().unwrap();
        sync_fs::write(temp_dir.path().join("metadata.opf"), b"").unwrap();
        sync_fs::write(temp_dir.path().join("cover.jpg"), b"").unwrap();
        sync_fs::write(temp_dir.path().join("BOOK.PDF"), b"").unwrap();
        let found = book_file(temp_dir.path(), &Config::default()).await.unwrap();
        assert_eq!(found, Some(temp_dir.path().join("BOOK.PDF")));
    }

    #[tokio::test]
    async fn test_book_file_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        sync_fs::write(temp_dir.path().join("metadata.opf"), b"").unwrap();
        sync_fs::create_dir(temp_dir.path().join("not-a-book.epub")).unwrap();
        assert_eq!(book_file(temp_dir.path(), &Config::default()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_directory_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = book_file(&temp_dir.path().join("missing"), &Config::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Read(_)));
    }
}
