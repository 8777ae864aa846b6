//! Builds the catalog document from a library on disk.
//!
//! The pipeline is strictly sequential: [`scan::sidecars`] discovers every
//! metadata sidecar under the root, [`scan::scan_file`] turns each into a
//! [`Book`](shelf_extract::models::Book), and [`Catalog`] orders them by title
//! and writes the result as JSON. [`build`] runs all three.

mod build;
mod catalog;
pub mod error;
mod path;
pub mod scan;

pub use crate::build::{Build, Summary, build, build_catalog};
pub use crate::catalog::Catalog;
