use super::Metadata;

/// One entry of the catalog document: the sidecar's [`Metadata`] plus what
/// was found next to it on disk.
///
/// All paths are relative to the catalog root and always use `/` as their
/// separator, whatever the host filesystem uses.
///
/// With the `serde` feature enabled this serializes to the catalog document's
/// wire format, whose keys are fixed by the browser that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    #[cfg_attr(feature = "serde", serde(rename = "titulo"))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "autor"))]
    pub author: String,
    #[cfg_attr(feature = "serde", serde(rename = "descricao"))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(rename = "calibreId"))]
    pub catalog_id: String,
    /// Cover image, `None` when the directory has no cover file.
    #[cfg_attr(feature = "serde", serde(rename = "capa"))]
    pub cover: Option<String>,
    /// First file with a supported e-book extension.
    #[cfg_attr(feature = "serde", serde(rename = "arquivo"))]
    pub file: Option<String>,
    /// Name of the directory two levels above the sidecar (root/author/title/sidecar).
    #[cfg_attr(feature = "serde", serde(rename = "pastaAutor"))]
    pub author_folder: String,
    /// The title directory itself.
    #[cfg_attr(feature = "serde", serde(rename = "caminhoPasta"))]
    pub source_folder: String,
}

impl Book {
    pub fn new(
        metadata: Metadata,
        cover: Option<String>,
        file: Option<String>,
        author_folder: String,
        source_folder: String,
    ) -> Self {
        let Metadata { title, author, description, catalog_id } = metadata;
        Self {
            title,
            author,
            description,
            catalog_id,
            cover,
            file,
            author_folder,
            source_folder,
        }
    }
}

impl AsRef<Book> for Book {
    fn as_ref(&self) -> &Book {
        self
    }
}
