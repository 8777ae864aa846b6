use crate::catalog::Catalog;
use crate::error::{ErrorKind, Result};
use crate::scan::error::ErrorKind as ScanErrorKind;
use crate::scan::{scan_file_inner, sidecars};
use exn::ResultExt;
use shelf_config::Config;
use std::path::PathBuf;
use tokio::fs;
use tracing::instrument;

/// An assembled, not yet written, catalog.
#[derive(Debug)]
pub struct Build {
    /// Sidecars found under the root, including those that failed to process.
    pub discovered: usize,
    pub catalog: Catalog,
}

/// What a completed [`build`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub discovered: usize,
    pub cataloged: usize,
    pub output: PathBuf,
}

/// Discovers every sidecar under the configured root and turns each one into
/// a catalog entry, one at a time.
///
/// A sidecar that can't be read or extracted is logged and skipped; it never
/// stops the build. A directory that can't be listed does: discovery finishes
/// before any sidecar is processed, so there are no partial results.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub async fn build_catalog(config: &Config) -> Result<Build> {
    let root = fs::canonicalize(&config.root)
        .await
        .map_err(|source| ScanErrorKind::Traversal { path: config.root.clone(), source })
        .or_raise(|| ErrorKind::Scan)?;
    let sidecars = sidecars(&root, config).await?;
    let discovered = sidecars.len();
    tracing::info!(count = discovered, "Discovered metadata sidecars");

    let mut books = Vec::with_capacity(discovered);
    for (i, sidecar) in sidecars.iter().enumerate() {
        if reports_progress(i + 1, config.progress_every) {
            tracing::info!("Processing book {}/{}", i + 1, discovered);
        }
        match scan_file_inner(&root, sidecar, config).await {
            Ok(book) => books.push(book),
            Err(e) => tracing::warn!(path = %sidecar.display(), error = ?e, "Skipping sidecar"),
        }
    }

    let catalog = Catalog::new(books);
    tracing::info!(count = catalog.len(), skipped = discovered - catalog.len(), "Catalog assembled");
    Ok(Build { discovered, catalog })
}

/// Whether the one-based `position` is a multiple of `every`.
fn reports_progress(position: usize, every: usize) -> bool {
    position % every.max(1) == 0
}

/// Builds the catalog and writes it to the configured output path.
///
/// Nothing is written unless every directory under the root could be listed.
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = shelf_config::Config::default();
/// let summary = shelf_library::build(&config).await.map_err(|e| e.to_string())?;
/// println!("{} of {} books catalogued", summary.cataloged, summary.discovered);
/// # Ok(())
/// # }
/// ```
pub async fn build(config: &Config) -> Result<Summary> {
    let Build { discovered, catalog } = build_catalog(config).await?;
    catalog.write(&config.output).await?;
    Ok(Summary { discovered, cataloged: catalog.len(), output: config.output.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs as sync_fs;
    use std::path::Path;

    fn opf(title: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
        <dc:title>{title}</dc:title>
        <dc:creator>A</dc:creator>
    </metadata>
</package>"#
        )
    }

    fn sidecar(root: &Path, folder: &str, contents: &str) {
        let dir = root.join(folder);
        sync_fs::create_dir_all(&dir).unwrap();
        sync_fs::write(dir.join("metadata.opf"), contents).unwrap();
    }

    fn config(dir: &Path) -> Config {
        Config {
            root: dir.join("Livros"),
            output: dir.join("catalogo.json"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_titles_sorted_in_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config(temp_dir.path());
        sidecar(&config.root, "A/Zebra", &opf("Zebra"));
        sidecar(&config.root, "A/Apple", &opf("Apple"));

        let summary = build(&config).await.unwrap();
        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.cataloged, 2);

        let json = sync_fs::read_to_string(&summary.output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let titles: Vec<&str> = value.as_array().unwrap().iter().map(|b| b["titulo"].as_str().unwrap()).collect();
        assert_eq!(titles, ["Apple", "Zebra"]);
        assert_eq!(value[0]["caminhoPasta"], "A/Apple");
        assert_eq!(value[0]["pastaAutor"], "A");
    }

    #[tokio::test]
    async fn test_bad_sidecars_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config(temp_dir.path());
        sidecar(&config.root, "A/Good", &opf("Good"));
        sidecar(&config.root, "A/Broken", "<package><metadata>");
        sidecar(&config.root, "A/Html", "<html><metadata/></html>");

        let build = build_catalog(&config).await.unwrap();
        assert_eq!(build.discovered, 3);
        assert_eq!(build.catalog.len(), 1);
        assert_eq!(build.catalog.books()[0].title, "Good");
    }

    #[tokio::test]
    async fn test_trash_is_not_catalogued() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config(temp_dir.path());
        sidecar(&config.root, "A/Kept", &opf("Kept"));
        sidecar(&config.root, ".caltrash/A/Deleted", &opf("Deleted"));

        let build = build_catalog(&config).await.unwrap();
        assert_eq!(build.discovered, 1);
        assert_eq!(build.catalog.books()[0].title, "Kept");
    }

    #[tokio::test]
    async fn test_missing_root_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config(temp_dir.path());

        let err = build(&config).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Scan));
        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn test_empty_root_writes_empty_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config(temp_dir.path());
        sync_fs::create_dir_all(&config.root).unwrap();

        let summary = build(&config).await.unwrap();
        assert_eq!(summary.cataloged, 0);
        assert_eq!(sync_fs::read_to_string(&config.output).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_cover_resolves_under_root_beside_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config(temp_dir.path());
        sidecar(&config.root, "A/T", &opf("T"));
        sync_fs::write(config.root.join("A/T/cover.jpg"), b"jpg").unwrap();

        let summary = build(&config).await.unwrap();
        let json = sync_fs::read_to_string(&summary.output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let cover = value[0]["capa"].as_str().unwrap();
        assert_eq!(cover, "A/T/cover.jpg");
        let beside = summary.output.parent().unwrap();
        assert!(beside.join("Livros").join(cover).is_file());
    }

    #[rstest]
    #[case(1, 50, false)]
    #[case(49, 50, false)]
    #[case(50, 50, true)]
    #[case(51, 50, false)]
    #[case(100, 50, true)]
    #[case(1, 1, true)]
    #[case(3, 0, true)]
    fn test_progress_every_nth_sidecar(#[case] position: usize, #[case] every: usize, #[case] expected: bool) {
        assert_eq!(reports_progress(position, every), expected);
    }
}
