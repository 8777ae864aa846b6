//! Catalog-relative paths.

use crate::scan::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Component, Path};

/// Expresses `path` relative to `root`, joining components with `/` whatever
/// the host separator is.
///
/// Fails with [`ErrorKind::OutsideRoot`] when `path` isn't under `root`, or
/// when a `..` component would climb back out of it.
pub(crate) fn relative(root: &Path, path: &Path) -> Result<String> {
    let outside = || ErrorKind::OutsideRoot(path.to_path_buf());
    let stripped = path.strip_prefix(root).or_raise(outside)?;
    let mut components: Vec<String> = Vec::new();
    for component in stripped.components() {
        match component {
            Component::Normal(s) => components.push(s.to_string_lossy().into_owned()),
            Component::CurDir => {},
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(outside());
                }
            },
            Component::RootDir | Component::Prefix(_) => exn::bail!(outside()),
        }
    }
    Ok(components.join("/"))
}
