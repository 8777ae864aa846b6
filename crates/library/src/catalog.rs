//! The catalog document: every book, ordered for reading.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use shelf_extract::models::Book;
use std::path::Path;
use tokio::fs;
use tracing::instrument;

/// Books sorted ascending by title, locale-aware.
///
/// The order is established on construction and can't be broken afterwards.
/// Sorting is stable, so books with identical titles keep the order they were
/// given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(mut books: Vec<Book>) -> Self {
        books.sort_by(Book::cmp_by_title);
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn into_books(self) -> Vec<Book> {
        self.books
    }

    /// Serializes to the catalog document: a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.books).or_raise(|| ErrorKind::Serialize)
    }

    /// Writes the catalog document to `path`, replacing whatever was there.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), books = self.len()))]
    pub async fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).await.or_raise(|| ErrorKind::Write(path.to_path_buf()))?;
        tracing::debug!("Catalog written");
        Ok(())
    }
}

impl FromIterator<Book> for Catalog {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;
    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
