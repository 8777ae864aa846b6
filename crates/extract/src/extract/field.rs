//! Field table: how each [`Metadata`](crate::models::Metadata) field is read
//! from the sidecar, and what it falls back to.

use crate::consts;
use crate::xml::Element;

/// The fields a sidecar contributes to a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Description,
    CatalogId,
}

/// Outcome of resolving one [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The sidecar provided a value.
    Present(String),
    /// The sidecar had nothing usable; this is the documented default.
    Default(&'static str),
}
impl FieldValue {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Present(value) => value,
            Self::Default(value) => value,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Present(value) => value,
            Self::Default(value) => value.to_string(),
        }
    }
}

/// What a reader gets to look at: the `metadata` element, and which
/// identifier scheme counts as the catalog identifier.
struct Source<'a> {
    metadata: &'a Element,
    scheme: &'a str,
}

struct Rule {
    field: Field,
    read: fn(&Source<'_>) -> Option<String>,
    default: &'static str,
}

// Ordered by `Field` discriminant.
static RULES: [Rule; 4] = [
    Rule {
        field: Field::Title,
        read: title,
        default: consts::UNKNOWN_TITLE,
    },
    Rule {
        field: Field::Author,
        read: author,
        default: consts::UNKNOWN_AUTHOR,
    },
    Rule {
        field: Field::Description,
        read: description,
        default: "",
    },
    Rule {
        field: Field::CatalogId,
        read: catalog_id,
        default: "",
    },
];

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Author, Field::Description, Field::CatalogId];

    /// The value used when the sidecar doesn't provide one.
    pub fn default_value(self) -> &'static str {
        self.rule().default
    }

    pub(crate) fn resolve(self, metadata: &Element, scheme: &str) -> FieldValue {
        let rule = self.rule();
        match (rule.read)(&Source { metadata, scheme }) {
            Some(value) => FieldValue::Present(value),
            None => {
                tracing::trace!(field = ?rule.field, default = rule.default, "Field absent from sidecar; using default");
                FieldValue::Default(rule.default)
            },
        }
    }

    fn rule(self) -> &'static Rule {
        &RULES[self as usize]
    }
}

fn first_text(source: &Source<'_>, name: &str) -> Option<String> {
    source.metadata.children_named(name).next().and_then(Element::text).map(str::to_string)
}

fn title(source: &Source<'_>) -> Option<String> {
    first_text(source, consts::DC_TITLE)
}

/// `dc:creator` usually carries `opf:role`/`opf:file-as` attributes next to
/// its text; only the text payload is the author's display name.
fn author(source: &Source<'_>) -> Option<String> {
    first_text(source, consts::DC_CREATOR)
}

fn description(source: &Source<'_>) -> Option<String> {
    first_text(source, consts::DC_DESCRIPTION)
}

fn catalog_id(source: &Source<'_>) -> Option<String> {
    source
        .metadata
        .children_named(consts::DC_IDENTIFIER)
        .find(|identifier| identifier.attribute(consts::SCHEME_ATTRIBUTE) == Some(source.scheme))
        .and_then(Element::text)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn metadata(inner: &str) -> Element {
        Element::parse(format!("<metadata>{inner}</metadata>").as_bytes()).unwrap()
    }

    #[rstest]
    #[case(Field::Title, "<dc:title>Senhora</dc:title>", FieldValue::Present("Senhora".to_string()))]
    #[case(Field::Title, "<dc:title>  </dc:title>", FieldValue::Default("unknown title"))]
    #[case(Field::Title, "<title>Not Dublin Core</title>", FieldValue::Default("unknown title"))]
    #[case(Field::Title, "<dc:title>First</dc:title><dc:title>Second</dc:title>", FieldValue::Present("First".to_string()))]
    #[case(Field::Author, r#"<dc:creator opf:role="aut">José de Alencar</dc:creator>"#, FieldValue::Present("José de Alencar".to_string()))]
    #[case(Field::Author, "", FieldValue::Default("unknown author"))]
    #[case(Field::Description, "<dc:description>text</dc:description>", FieldValue::Present("text".to_string()))]
    #[case(Field::Description, "", FieldValue::Default(""))]
    #[case(Field::CatalogId, r#"<dc:identifier opf:scheme="calibre">7</dc:identifier>"#, FieldValue::Present("7".to_string()))]
    #[case(Field::CatalogId, r#"<dc:identifier scheme="calibre">8</dc:identifier>"#, FieldValue::Present("8".to_string()))]
    #[case(Field::CatalogId, r#"<dc:identifier opf:scheme="Calibre">9</dc:identifier>"#, FieldValue::Default(""))]
    #[case(Field::CatalogId, "<dc:identifier>10</dc:identifier>", FieldValue::Default(""))]
    fn test_resolve(#[case] field: Field, #[case] inner: &str, #[case] expected: FieldValue) {
        assert_eq!(field.resolve(&metadata(inner), "calibre"), expected);
    }

    #[test]
    fn test_every_field_has_a_rule() {
        for field in Field::ALL {
            assert_eq!(field.rule().field, field);
        }
    }

    #[test]
    fn test_default_values() {
        assert_eq!(Field::Title.default_value(), consts::UNKNOWN_TITLE);
        assert_eq!(Field::Author.default_value(), consts::UNKNOWN_AUTHOR);
        assert_eq!(Field::CatalogId.default_value(), "");
    }
}
