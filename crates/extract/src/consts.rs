/// Title used when a sidecar has no usable `dc:title`.
pub const UNKNOWN_TITLE: &str = "unknown title";
/// Author used when a sidecar has no usable `dc:creator`.
pub const UNKNOWN_AUTHOR: &str = "unknown author";

pub(crate) const PACKAGE: &str = "package";
pub(crate) const METADATA: &str = "metadata";
pub(crate) const DC_TITLE: &str = "dc:title";
pub(crate) const DC_CREATOR: &str = "dc:creator";
pub(crate) const DC_DESCRIPTION: &str = "dc:description";
pub(crate) const DC_IDENTIFIER: &str = "dc:identifier";
// Matched on the local name, so both `opf:scheme` and a bare `scheme` count.
pub(crate) const SCHEME_ATTRIBUTE: &str = "scheme";
