//! HTML rendering of the book grid and its empty and error states.
//!
//! Fragments are [upon] templates embedded at compile time. Every value
//! interpolated from the catalog passes through the `escape` formatter, so a
//! title like `<script>` is displayed, never executed.

mod assets;

use crate::entry::Entry;
use crate::error::{ErrorKind, Result};
use crate::present::{PREVIEW_CHARS, Placeholder, clean_description, truncate};
use crate::render::assets::Templates;
use crate::store::Store;
use exn::ResultExt;
use std::borrow::Cow;
use tracing::instrument;
use upon::{Engine, Template};

/// File name of the catalog document, as mentioned by the error state.
pub const CATALOG_FILENAME: &str = "catalogo.json";
/// Command that generates the catalog document, as mentioned by the error state.
pub const BUILD_COMMAND: &str = "shelf";
/// Text of the empty state.
pub const NO_RESULTS: &str = "No books found with the selected filters.";

/// Escapes the characters that are significant in HTML text and attributes.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

pub struct Renderer {
    engine: Engine<'static>,
    card: Template<'static>,
    empty: Template<'static>,
    error: Template<'static>,
}

impl Renderer {
    /// Compiles every embedded fragment, so a broken template fails here
    /// rather than on first use.
    pub fn new() -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let compile = |name: &str| -> Result<Template<'static>> {
            engine.compile(Templates::source(name)?).or_raise(|| ErrorKind::Template)
        };
        let card = compile("card.html")?;
        let empty = compile("empty.html")?;
        let error = compile("error.html")?;
        Ok(Self { engine, card, empty, error })
    }

    /// One book card. `index` is the card's position in the displayed list,
    /// which is what [`Store::detail`] expects back.
    pub fn card(&self, entry: &Entry, index: usize, placeholder: &Placeholder) -> Result<String> {
        let title = entry.title();
        let preview = truncate(&clean_description(entry.description()), PREVIEW_CHARS);
        self.card
            .render(
                &self.engine,
                upon::value! {
                    index: index as u64,
                    title: title,
                    author: entry.author(),
                    preview: preview,
                    image_url: placeholder.image_url(entry.cover(), title),
                    placeholder_url: placeholder.url(title),
                },
            )
            .to_string()
            .or_raise(|| ErrorKind::Template)
    }

    /// Shown when a filter leaves nothing to display.
    pub fn empty(&self) -> Result<String> {
        self.empty
            .render(&self.engine, upon::value! { message: NO_RESULTS })
            .to_string()
            .or_raise(|| ErrorKind::Template)
    }

    /// Shown when the catalog failed to load.
    pub fn error(&self, message: &str) -> Result<String> {
        self.error
            .render(
                &self.engine,
                upon::value! {
                    message: message,
                    file: CATALOG_FILENAME,
                    command: BUILD_COMMAND,
                },
            )
            .to_string()
            .or_raise(|| ErrorKind::Template)
    }

    /// Whatever the grid should show for the store's current state.
    #[instrument(skip_all, fields(displayed = store.result_count()))]
    pub fn grid(&self, store: &Store) -> Result<String> {
        if let Some(message) = store.error() {
            return self.error(message);
        }
        if store.result_count() == 0 {
            return self.empty();
        }
        store
            .displayed()
            .enumerate()
            .map(|(index, entry)| self.card(entry, index, store.placeholder()))
            .collect::<Result<Vec<_>>>()
            .map(|cards| cards.concat())
    }
}

/// Custom [`upon`] extensions for HTML output.
mod addons {
    use super::escape;
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    fn escape_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", escape(s))?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Registers the `escape` formatter on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("escape", escape_formatter);
    }
}
