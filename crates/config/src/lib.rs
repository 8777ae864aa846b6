//! Conventions of the library layout being catalogued.
//!
//! The catalog builder is a fixed-convention tool: it takes no flags and reads
//! no environment variables. Every convention lives in [`Config`], whose
//! [`Default`] is the layout written by the library manager:
//!
//! ```text
//! Livros/                      <- root
//!   Author Name/               <- author folder
//!     Book Title (123)/        <- title folder
//!       metadata.opf           <- sidecar
//!       cover.jpg              <- optional cover
//!       Book Title.epub        <- optional book file
//!   .caltrash/                 <- skipped entirely
//! catalogo.json                <- output, beside the root
//! ```
//!
//! A `shelf.toml` in the working directory may override any of these for
//! libraries that don't follow the defaults.

pub mod error;

use crate::error::{ErrorKind, Result};
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog root: contains author folders, which contain title folders.
    pub root: PathBuf,
    /// Where the catalog document is written.
    pub output: PathBuf,
    /// Exact filename of the metadata sidecar in every title folder.
    pub metadata_filename: String,
    /// Exact filename of the cover image in a title folder.
    pub cover_filename: String,
    /// Directories with this name are never descended into.
    pub trash_dirname: String,
    /// Book file extensions, dot included, matched case-insensitively.
    pub formats: Vec<String>,
    /// `dc:identifier` scheme read as the catalog identifier.
    pub identifier_scheme: String,
    /// Emit a progress event every this many sidecars.
    pub progress_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Livros"),
            output: PathBuf::from("catalogo.json"),
            metadata_filename: "metadata.opf".to_string(),
            cover_filename: "cover.jpg".to_string(),
            trash_dirname: ".caltrash".to_string(),
            formats: vec![".pdf".to_string(), ".epub".to_string(), ".mobi".to_string()],
            identifier_scheme: "calibre".to_string(),
            progress_every: 50,
        }
    }
}

impl Config {
    /// Name of the optional override file, looked up in the working directory.
    pub const FILENAME: &'static str = "shelf.toml";

    /// Loads the defaults, merged with [`FILENAME`](Self::FILENAME) if it exists.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::FILENAME)
    }

    /// Loads the defaults, merged with the TOML file at `path` if it exists.
    /// A missing file is not an error; an unparsable one is.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading configuration overrides");
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ErrorKind::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason| Err(exn::Exn::from(ErrorKind::Invalid { field, reason }));
        if self.metadata_filename.trim().is_empty() {
            return invalid("metadata_filename", "must not be empty");
        }
        if self.cover_filename.trim().is_empty() {
            return invalid("cover_filename", "must not be empty");
        }
        if self.trash_dirname.trim().is_empty() {
            return invalid("trash_dirname", "must not be empty");
        }
        if self.formats.is_empty() {
            return invalid("formats", "at least one book format is required");
        }
        if self.formats.iter().any(|f| f.trim_start_matches('.').is_empty()) {
            return invalid("formats", "extensions must not be empty");
        }
        if self.progress_every == 0 {
            return invalid("progress_every", "must be at least 1");
        }
        Ok(())
    }

    /// Returns `true` if `filename` ends with one of the configured book
    /// formats, ignoring case.
    pub fn is_book_file(&self, filename: &str) -> bool {
        let filename = filename.to_lowercase();
        self.formats.iter().any(|format| {
            let format = format.trim().trim_start_matches('.').to_lowercase();
            filename.strip_suffix(format.as_str()).is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(temp_dir.path().join("shelf.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        fs::write(&path, "root = \"Books\"\nformats = [\".azw3\"]\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("Books"));
        assert_eq!(config.formats, vec![".azw3".to_string()]);
        // Untouched values keep their defaults.
        assert_eq!(config.metadata_filename, "metadata.opf");
        assert_eq!(config.trash_dirname, ".caltrash");
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        fs::write(&path, "root = [this is not toml").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("shelf.toml");
        fs::write(&path, "formats = []\n").unwrap();
        assert!(Config::load_from(&path).is_err());
        fs::write(&path, "progress_every = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
        fs::write(&path, "metadata_filename = \"\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[rstest]
    #[case("Dom Casmurro.epub", true)]
    #[case("Dom Casmurro.PDF", true)]
    #[case("book.mobi", true)]
    #[case("cover.jpg", false)]
    #[case("metadata.opf", false)]
    #[case("notepub", false)]
    #[case("archive.epub.zip", false)]
    fn test_is_book_file(#[case] filename: &str, #[case] expected: bool) {
        assert_eq!(Config::default().is_book_file(filename), expected);
    }
}
