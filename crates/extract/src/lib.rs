mod compare;
mod consts;
pub mod error;
mod extract;
pub mod models;
mod xml;

pub use crate::compare::locale_cmp;
pub use crate::consts::{UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use crate::extract::{Extractor, Field, FieldValue, extract};
