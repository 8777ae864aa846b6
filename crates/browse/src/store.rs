use crate::entry::Entry;
use crate::error::Result;
use crate::filter::{Filter, SortKey};
use crate::index::{self, Stats};
use crate::overlay::{self, Dismiss, Node};
use crate::present::{Detail, Placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loaded,
    /// Loading failed; the canonical list is empty and stays empty.
    Failed(String),
}

/// Owns everything the browser shows: the canonical list as loaded, the
/// controls, the list they derive, and the zoom overlay.
///
/// The canonical list is only ever set once, on construction. Each control
/// change recomputes the displayed list from scratch.
#[derive(Debug)]
pub struct Store {
    entries: Vec<Entry>,
    displayed: Vec<usize>,
    filter: Filter,
    state: LoadState,
    overlay: Option<Node>,
    placeholder: Placeholder,
}

impl Store {
    /// Takes the outcome of loading the catalog. A failure leaves the store
    /// empty and in its error state; nothing is substituted for the catalog.
    ///
    /// ```rust
    /// use shelf_browse::{Store, load};
    /// let mut store = Store::load(load::parse(r#"[{"titulo": "Iracema", "autor": "José de Alencar"}]"#.as_bytes()));
    /// assert_eq!(store.count_label(), "1 book");
    /// store.set_search("senhora");
    /// assert_eq!(store.count_label(), "0 books");
    ///
    /// let failed = Store::load(load::parse(b"<html>"));
    /// assert!(failed.error().is_some());
    /// assert_eq!(failed.result_count(), 0);
    /// ```
    pub fn load(result: Result<Vec<Entry>>) -> Self {
        match result {
            Ok(entries) => Self::new(entries),
            Err(err) => {
                tracing::error!(error = ?err, "Unable to load catalog");
                let mut store = Self::new(Vec::new());
                store.state = LoadState::Failed((*err).to_string());
                store
            },
        }
    }

    pub fn new(entries: Vec<Entry>) -> Self {
        let mut store = Self {
            displayed: Vec::new(),
            entries,
            filter: Filter::default(),
            state: LoadState::Loaded,
            overlay: None,
            placeholder: Placeholder::default(),
        };
        store.recompute();
        store
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            LoadState::Loaded => None,
        }
    }

    /// The canonical list, in catalog order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    fn recompute(&mut self) {
        self.displayed = self.filter.apply(&self.entries);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.term = term.into();
        self.recompute();
    }

    /// `None` (or an empty name) selects every author.
    pub fn set_author(&mut self, author: Option<String>) {
        self.filter.author = author.filter(|a| !a.is_empty());
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.filter.sort = sort;
        self.recompute();
    }

    /// The entries to show, in order.
    pub fn displayed(&self) -> impl ExactSizeIterator<Item = &Entry> + '_ {
        self.displayed.iter().map(|&i| &self.entries[i])
    }

    pub fn result_count(&self) -> usize {
        self.displayed.len()
    }

    pub fn count_label(&self) -> String {
        match self.result_count() {
            1 => "1 book".to_string(),
            n => format!("{n} books"),
        }
    }

    pub fn authors(&self) -> Vec<String> {
        index::authors(&self.entries)
    }

    pub fn stats(&self) -> Stats {
        index::stats(&self.entries)
    }

    /// Detail view for the card at `index` in the displayed list. An index
    /// past the displayed list falls back to the same position in the
    /// canonical list.
    pub fn detail(&self, index: usize) -> Option<Detail> {
        let entry = match self.displayed.get(index) {
            Some(&i) => &self.entries[i],
            None => self.entries.get(index)?,
        };
        Some(Detail::new(entry, &self.placeholder))
    }

    /// Opens the zoom overlay, replacing any overlay already open.
    pub fn zoom(&mut self, image_url: &str, title: &str) -> &Node {
        self.overlay.insert(overlay::zoom(image_url, title))
    }

    pub fn overlay(&self) -> Option<&Node> {
        self.overlay.as_ref()
    }

    /// Closes the overlay. Returns `false` if none was open.
    pub fn dismiss(&mut self, _reason: Dismiss) -> bool {
        self.overlay.take().is_some()
    }

    /// Routes a key press; only the cancel key closes the overlay.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match Dismiss::from_key(key) {
            Some(reason) => self.dismiss(reason),
            None => false,
        }
    }
}
