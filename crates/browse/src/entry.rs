use serde::{Deserialize, Serialize};
use shelf_extract::models::Book;
use shelf_extract::{UNKNOWN_AUTHOR, UNKNOWN_TITLE};

/// One element of a loaded catalog document.
///
/// Documents may be hand-edited or written by older builders, so every key is
/// optional and unknown keys are ignored. Accessors apply the same fallbacks
/// the builder uses when a sidecar lacks a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "autor")]
    pub author: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "calibreId")]
    pub catalog_id: Option<String>,
    #[serde(rename = "capa")]
    pub cover: Option<String>,
    #[serde(rename = "arquivo")]
    pub file: Option<String>,
    #[serde(rename = "pastaAutor")]
    pub author_folder: Option<String>,
    #[serde(rename = "caminhoPasta")]
    pub source_folder: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Entry {
    /// The title, or [`UNKNOWN_TITLE`] when missing or empty.
    pub fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or(UNKNOWN_TITLE)
    }

    /// The author, or [`UNKNOWN_AUTHOR`] when missing or empty.
    pub fn author(&self) -> &str {
        non_empty(&self.author).unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn cover(&self) -> Option<&str> {
        non_empty(&self.cover)
    }
}

impl From<Book> for Entry {
    fn from(book: Book) -> Self {
        Self {
            title: Some(book.title),
            author: Some(book.author),
            description: Some(book.description),
            catalog_id: Some(book.catalog_id),
            cover: book.cover,
            file: book.file,
            author_folder: Some(book.author_folder),
            source_folder: Some(book.source_folder),
        }
    }
}
