//! Main extraction logic for OPF metadata sidecars.

mod field;

pub use self::field::{Field, FieldValue};
use crate::consts;
use crate::error::{Error, ErrorKind, Result};
use crate::models::Metadata;
use crate::xml::Element;
use exn::OptionExt;
use std::str::FromStr;
use tracing::instrument;

/// A parsed OPF package, ready to have its fields read.
///
/// Construction validates the document structure (an OPF `package` root with
/// a `metadata` child), so field extraction itself can never fail: absent
/// fields resolve to their documented defaults instead.
#[derive(Debug)]
pub struct Extractor {
    metadata: Element,
    scheme: String,
}
impl Extractor {
    /// The identifier scheme written by the tool that manages the library.
    pub const DEFAULT_SCHEME: &'static str = "calibre";

    /// Parses raw sidecar bytes.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::MalformedXml`] when the bytes aren't well-formed XML,
    /// - [`ErrorKind::InvalidDocument`] when the root isn't an OPF `package`,
    /// - [`ErrorKind::MissingField`] when the package has no `metadata`.
    pub fn from_xml(xml: impl AsRef<[u8]>) -> Result<Self> {
        let package = Element::parse(xml.as_ref())?;
        Self::from_package(package)
    }

    fn from_package(package: Element) -> Result<Self> {
        if package.local_name() != consts::PACKAGE {
            exn::bail!(ErrorKind::InvalidDocument);
        }
        let metadata = package.child(consts::METADATA).ok_or_raise(|| ErrorKind::MissingField(consts::METADATA))?;
        Ok(Self {
            metadata: metadata.clone(),
            scheme: Self::DEFAULT_SCHEME.to_string(),
        })
    }

    /// Changes which `dc:identifier` scheme is read as the catalog identifier.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Resolves a single field, reporting whether the sidecar provided it or
    /// whether the default was used.
    pub fn field(&self, field: Field) -> FieldValue {
        field.resolve(&self.metadata, &self.scheme)
    }

    /// Resolves every field into [`Metadata`].
    #[instrument(skip(self), fields(scheme = %self.scheme))]
    pub fn metadata(&self) -> Metadata {
        let value = |field| self.field(field).into_string();
        Metadata {
            title: value(Field::Title),
            author: value(Field::Author),
            description: value(Field::Description),
            catalog_id: value(Field::CatalogId),
        }
    }
}
impl FromStr for Extractor {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_xml(s)
    }
}
impl From<&Extractor> for Metadata {
    fn from(extractor: &Extractor) -> Self {
        extractor.metadata()
    }
}

/// Parses sidecar bytes and extracts every field in one go.
///
/// # Examples
///
/// ```rust
/// use shelf_extract::{UNKNOWN_AUTHOR, extract};
/// let opf = r#"<?xml version="1.0"?>
///     <package xmlns="http://www.idpf.org/2007/opf" xmlns:dc="http://purl.org/dc/elements/1.1/">
///         <metadata>
///             <dc:title>Memórias Póstumas de Brás Cubas</dc:title>
///             <dc:identifier opf:scheme="calibre">812</dc:identifier>
///         </metadata>
///     </package>"#;
///
/// let metadata = extract(opf, "calibre").unwrap();
/// assert_eq!(metadata.title, "Memórias Póstumas de Brás Cubas");
/// assert_eq!(metadata.author, UNKNOWN_AUTHOR);
/// assert_eq!(metadata.catalog_id, "812");
/// ```
#[instrument(skip(xml), fields(xml_size = xml.as_ref().len()))]
pub fn extract(xml: impl AsRef<[u8]>, scheme: &str) -> Result<Metadata> {
    Ok(Extractor::from_xml(xml)?.with_scheme(scheme).metadata())
}
