//! Author index and headline statistics over the canonical list.

use crate::entry::Entry;
use std::collections::BTreeSet;

/// Every distinct author, with missing authors shown as the unknown-author
/// fallback, in ascending string order. This is the population of the author
/// filter.
pub fn authors(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(Entry::author).collect::<BTreeSet<_>>().into_iter().map(str::to_string).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub books: usize,
    /// Distinct non-empty author values; entries without an author don't count.
    pub authors: usize,
}

pub fn stats(entries: &[Entry]) -> Stats {
    let authors: BTreeSet<&str> = entries.iter().filter_map(|e| e.author.as_deref()).filter(|a| !a.is_empty()).collect();
    Stats { books: entries.len(), authors: authors.len() }
}
