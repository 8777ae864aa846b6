//! The browsing side of a catalog document.
//!
//! A [`Store`] is created from the loaded document (see [`load`]) and from
//! then on owns it. User controls call its setters; views read the derived
//! list back. [`Renderer`] turns a store into HTML, and [`overlay`] describes
//! the image-zoom overlay as an element tree for the presentation layer to
//! mount.

mod entry;
pub mod error;
pub mod filter;
pub mod index;
pub mod load;
pub mod overlay;
pub mod present;
mod render;
mod store;

pub use crate::entry::Entry;
pub use crate::filter::{Filter, SortKey};
pub use crate::render::{BUILD_COMMAND, CATALOG_FILENAME, NO_RESULTS, Renderer};
pub use crate::store::{LoadState, Store};
