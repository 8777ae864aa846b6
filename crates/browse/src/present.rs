//! Text and image values shown for a book, independent of markup.

use crate::entry::Entry;
use regex::Regex;
use std::sync::LazyLock;

/// Shown when a book has no description, or one made only of markup.
pub const NO_DESCRIPTION: &str = "no description available";
/// Card previews show at most this many characters of the description.
pub const PREVIEW_CHARS: usize = 100;
/// Cover paths in the catalog are relative to the library root, while the
/// page is served from the directory holding the catalog, beside that root.
pub const COVER_BASE: &str = "Livros/";

// Infallible: the pattern is a literal.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Strips markup tags and collapses runs of whitespace into single spaces.
///
/// ```rust
/// use shelf_browse::present::{NO_DESCRIPTION, clean_description};
/// assert_eq!(clean_description(Some("<p>Um  romance\n de <b>Machado</b>.</p>")), "Um romance de Machado.");
/// assert_eq!(clean_description(None), NO_DESCRIPTION);
/// ```
pub fn clean_description(description: Option<&str>) -> String {
    let stripped = TAG.replace_all(description.unwrap_or_default(), "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    match cleaned.is_empty() {
        true => NO_DESCRIPTION.to_string(),
        false => cleaned,
    }
}

/// Cuts `text` to `limit` characters, marking the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Where a book's image comes from: its cover under `cover_base`, or a
/// generated stand-in derived only from the book's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Prefix joined to root-relative cover paths; empty leaves them as is.
    pub cover_base: String,
    pub base_url: String,
    pub size: u32,
    pub background: String,
    pub color: String,
    pub font_size: String,
}

impl Default for Placeholder {
    fn default() -> Self {
        Self {
            cover_base: COVER_BASE.to_string(),
            base_url: "https://ui-avatars.com/api/".to_string(),
            size: 400,
            background: "4B1E6D".to_string(),
            color: "fff".to_string(),
            font_size: "0.33".to_string(),
        }
    }
}

impl Placeholder {
    pub fn url(&self, title: &str) -> String {
        format!(
            "{}?name={}&size={}&background={}&color={}&font-size={}",
            self.base_url,
            urlencoding::encode(title),
            self.size,
            self.background,
            self.color,
            self.font_size,
        )
    }

    /// The cover path, joined to `cover_base`, when there is one; the
    /// placeholder otherwise.
    pub fn image_url(&self, cover: Option<&str>, title: &str) -> String {
        match cover {
            Some(cover) if !cover.is_empty() => match self.cover_base.as_str() {
                "" => cover.to_string(),
                base if base.ends_with('/') => format!("{base}{cover}"),
                base => format!("{base}/{cover}"),
            },
            _ => self.url(title),
        }
    }
}

/// Everything the detail view shows for one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub title: String,
    pub author: String,
    pub description: String,
    pub image_url: String,
}

impl Detail {
    pub fn new(entry: &Entry, placeholder: &Placeholder) -> Self {
        Self {
            title: entry.title().to_string(),
            author: entry.author().to_string(),
            description: clean_description(entry.description()),
            image_url: placeholder.image_url(entry.cover(), entry.title()),
        }
    }
}
