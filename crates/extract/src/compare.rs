//! Locale-aware string ordering.
//!
//! Catalogs are sorted for people, not for byte-wise comparison: "Érico"
//! belongs next to "Eduardo", not after "Zélia". Strings are compared in
//! successive levels, each only consulted when all previous levels tie:
//!
//! 1. base letters (canonically decomposed, combining marks removed, case-folded,
//!    and letters with no decomposition such as `ø` or `œ` folded to their base),
//! 2. accents (decomposed, case-folded),
//! 3. case (lowercase before uppercase),
//! 4. raw code points, so distinct strings never compare equal.

use crate::models::Book;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase letters that NFD leaves intact but readers file under a plain
/// Latin letter.
fn fold(c: char) -> Option<&'static str> {
    match c {
        'ø' => Some("o"),
        'œ' => Some("oe"),
        'æ' => Some("ae"),
        'ł' => Some("l"),
        'đ' | 'ð' => Some("d"),
        'ħ' => Some("h"),
        'ı' => Some("i"),
        'ß' => Some("ss"),
        'þ' => Some("th"),
        _ => None,
    }
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .flat_map(|c| {
            let folded = fold(c);
            folded.into_iter().flat_map(str::chars).chain(folded.is_none().then_some(c))
        })
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn letter_case(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).map(char::is_uppercase)
}

/// Compares two strings the way a reader expects them to be ordered.
///
/// ```rust
/// use shelf_extract::locale_cmp;
/// let mut titles = vec!["Zebra", "Ética", "apple", "Eva"];
/// titles.sort_by(|a, b| locale_cmp(a, b));
/// assert_eq!(titles, ["apple", "Ética", "Eva", "Zebra"]);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| letter_case(a).cmp(letter_case(b)))
        .then_with(|| a.cmp(b))
}

impl Book {
    /// Catalog order: by title, locale-aware.
    pub fn cmp_by_title(&self, other: &Self) -> Ordering {
        locale_cmp(&self.title, &other.title)
    }
}
