//! The filter/sort engine.
//!
//! Deriving the displayed list is a pure function of the canonical list and a
//! [`Filter`]. It never mutates the list; it returns positions into it.

use crate::entry::Entry;
use shelf_extract::locale_cmp;
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Canonical order, as loaded.
    #[default]
    Unsorted,
    Title,
    Author,
}

impl FromStr for SortKey {
    type Err = Infallible;

    /// Anything unrecognised means "leave the order alone".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "titulo" | "title" => Self::Title,
            "autor" | "author" => Self::Author,
            _ => Self::Unsorted,
        })
    }
}

/// The three user controls, combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Free-text term, matched case-insensitively against title, author and
    /// description.
    pub term: String,
    /// Exact author to restrict to; `None` means every author.
    pub author: Option<String>,
    pub sort: SortKey,
}

impl Filter {
    pub fn matches(&self, entry: &Entry) -> bool {
        self.matches_term(entry) && self.matches_author(entry)
    }

    fn matches_term(&self, entry: &Entry) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let term = self.term.to_lowercase();
        [&entry.title, &entry.author, &entry.description]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|value| value.to_lowercase().contains(&term)))
    }

    fn matches_author(&self, entry: &Entry) -> bool {
        // Compared against the displayed author, so selecting the fallback
        // from the author index finds the entries that have no author.
        self.author.as_deref().is_none_or(|author| entry.author() == author)
    }

    /// Positions in `entries` of every match, in display order.
    ///
    /// Sorting is stable: entries that compare equal keep their canonical
    /// order.
    pub fn apply(&self, entries: &[Entry]) -> Vec<usize> {
        let mut positions: Vec<usize> =
            entries.iter().enumerate().filter(|(_, entry)| self.matches(entry)).map(|(i, _)| i).collect();
        let key: fn(&Entry) -> &str = match self.sort {
            SortKey::Unsorted => return positions,
            SortKey::Title => title_key,
            SortKey::Author => author_key,
        };
        positions.sort_by(|&a, &b| locale_cmp(key(&entries[a]), key(&entries[b])));
        positions
    }
}

// A missing field sorts as an empty string, not as its display fallback.
fn title_key(entry: &Entry) -> &str {
    entry.title.as_deref().unwrap_or_default()
}

fn author_key(entry: &Entry) -> &str {
    entry.author.as_deref().unwrap_or_default()
}
