/// Everything a single OPF sidecar says about a book.
///
/// Every field is always populated: absent values have already been replaced
/// by their documented defaults (see [`Field`](crate::Field)).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metadata {
    /// First `dc:title`
    pub title: String,
    /// Text payload of the first `dc:creator`
    pub author: String,
    /// First `dc:description`, usually HTML
    pub description: String,
    /// Text of the `dc:identifier` with the configured scheme
    pub catalog_id: String,
}
