use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::scan::error::{ErrorKind, Result as ScanResult};
use async_stream::stream;
use exn::ResultExt;
use futures::{Stream, TryStreamExt};
use shelf_config::Config;
use std::path::{Path, PathBuf};
use tokio::fs::{self, DirEntry};

enum WalkEntry {
    Sidecar(PathBuf),
    Descend(PathBuf),
    Skip,
}

fn traversal_error(path: &Path, source: std::io::Error) -> exn::Exn<ErrorKind> {
    exn::Exn::from(ErrorKind::Traversal { path: path.to_path_buf(), source })
}

async fn process_entry(entry: DirEntry, config: &Config) -> ScanResult<WalkEntry> {
    let path = entry.path();
    // Does not follow symlinks: a link is neither a file nor a directory here.
    let file_type = entry.file_type().await.map_err(|e| traversal_error(&path, e))?;
    let name = entry.file_name();
    if file_type.is_dir() {
        if name == config.trash_dirname.as_str() {
            tracing::debug!(path = %path.display(), "Skipping trash directory");
            return Ok(WalkEntry::Skip);
        }
        return Ok(WalkEntry::Descend(path));
    }
    if file_type.is_file() && name == config.metadata_filename.as_str() {
        return Ok(WalkEntry::Sidecar(path));
    }
    Ok(WalkEntry::Skip)
}

/// Streams the path of every metadata sidecar under `root`, depth-first.
///
/// Paths are yielded in directory-listing order, which is not sorted. A
/// directory that can't be listed yields an [`ErrorKind::Traversal`] item;
/// the stream keeps going afterwards, but the build treats any such item as
/// fatal (see [`sidecars`]).
pub fn discover<'a>(root: &'a Path, config: &'a Config) -> impl Stream<Item = ScanResult<PathBuf>> + 'a {
    let mut stack = vec![root.to_path_buf()];
    stream! {
        'dirs: while let Some(current) = stack.pop() {
            let mut entries = match fs::read_dir(&current).await {
                Ok(entries) => entries,
                Err(e) => {
                    yield Err(traversal_error(&current, e));
                    continue 'dirs;
                },
            };
            'entries: loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break 'entries,
                    Err(e) => {
                        yield Err(traversal_error(&current, e));
                        continue 'dirs;
                    },
                };
                match process_entry(entry, config).await {
                    Ok(WalkEntry::Sidecar(path)) => yield Ok(path),
                    Ok(WalkEntry::Descend(dir)) => stack.push(dir),
                    Ok(WalkEntry::Skip) => {},
                    Err(e) => yield Err(e),
                }
            }
        }
    }
}

/// Collects every sidecar under `root`, failing on the first directory that
/// can't be listed so that a build never works from a partial tree.
///
/// The result is sorted by path, giving books with equal titles a stable
/// relative order across runs.
pub async fn sidecars(root: &Path, config: &Config) -> LibraryResult<Vec<PathBuf>> {
    sidecars_inner(root, config).await.or_raise(|| LibraryErrorKind::Scan)
}

pub(crate) async fn sidecars_inner(root: &Path, config: &Config) -> ScanResult<Vec<PathBuf>> {
    let mut found: Vec<PathBuf> = discover(root, config).try_collect().await?;
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as sync_fs;

    fn touch(path: &Path) {
        sync_fs::create_dir_all(path.parent().unwrap()).unwrap();
        sync_fs::write(path, b"").unwrap();
    }

    #[tokio::test]
    async fn test_finds_sidecars_at_any_depth() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("Author A/Title 1/metadata.opf"));
        touch(&root.join("Author A/Title 2/metadata.opf"));
        touch(&root.join("Author B/Series/Title 3/metadata.opf"));
        touch(&root.join("Author B/Title 4/book.epub"));
        let found = sidecars_inner(root, &Config::default()).await.unwrap();
        assert_eq!(
            found,
            vec![
                root.join("Author A/Title 1/metadata.opf"),
                root.join("Author A/Title 2/metadata.opf"),
                root.join("Author B/Series/Title 3/metadata.opf"),
            ]
        );
    }

    #[tokio::test]
    async fn test_skips_trash_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("Author/Title/metadata.opf"));
        touch(&root.join(".caltrash/Author/Title/metadata.opf"));
        touch(&root.join("Author/.caltrash/Old Title/metadata.opf"));
        let found = sidecars_inner(root, &Config::default()).await.unwrap();
        assert_eq!(found, vec![root.join("Author/Title/metadata.opf")]);
    }

    #[tokio::test]
    async fn test_filename_must_match_exactly() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("Author/Title/METADATA.OPF"));
        touch(&root.join("Author/Title/metadata.opf.bak"));
        assert!(sidecars_inner(root, &Config::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unlistable_root_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let err = sidecars_inner(&missing, &Config::default()).await.unwrap_err();
        assert!(err.is_fatal());
        assert!(sidecars(&missing, &Config::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_root_that_is_a_file_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("Livros");
        touch(&file);
        let err = sidecars_inner(&file, &Config::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Traversal { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unlistable_subdirectory_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("Author A/Title 1/metadata.opf"));
        touch(&root.join("Author B/Locked/Title 2/metadata.opf"));
        let locked = root.join("Author B/Locked");
        sync_fs::set_permissions(&locked, sync_fs::Permissions::from_mode(0o000)).unwrap();
        // Privileged users can list the directory regardless of its mode.
        if sync_fs::read_dir(&locked).is_ok() {
            sync_fs::set_permissions(&locked, sync_fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = sidecars_inner(root, &Config::default()).await.unwrap_err();
        sync_fs::set_permissions(&locked, sync_fs::Permissions::from_mode(0o755)).unwrap();
        assert!(err.is_fatal());
        assert!(matches!(&*err, ErrorKind::Traversal { path, .. } if path == &locked));
    }
}
