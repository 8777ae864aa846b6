//! Page fragments embedded into the binary at compile time using
//! [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "../../assets/templates/"]
pub(crate) struct Templates;
impl Templates {
    /// Template source for an embedded file name, e.g. `"card.html"`.
    pub(crate) fn source(name: &str) -> Result<String> {
        let file = Self::get(name).ok_or_raise(|| ErrorKind::Template)?;
        String::from_utf8(file.data.into_owned()).or_raise(|| ErrorKind::Template)
    }
}
