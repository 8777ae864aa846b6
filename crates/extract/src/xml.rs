//! A minimal owned element tree built on top of [`quick_xml`] events.
//!
//! OPF sidecars are tiny (a few kilobytes), so building the whole tree up
//! front keeps the field extractors simple lookups instead of a state machine
//! threaded through the event loop.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    /// Qualified name, prefix included (`dc:title`).
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    /// Concatenated character data of this element (not its descendants).
    pub(crate) text: String,
    pub(crate) children: Vec<Element>,
}

impl Element {
    /// Parses a complete document and returns its root element.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD before parsing.
    pub(crate) fn parse(xml: &[u8]) -> Result<Self> {
        let xml = String::from_utf8_lossy(xml);
        let mut reader = Reader::from_str(&xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        loop {
            let event = reader
                .read_event()
                .or_raise(|| ErrorKind::MalformedXml(format!("unreadable event near byte {}", reader.buffer_position())))?;
            match event {
                Event::Start(start) => stack.push(Self::open(&start)?),
                Event::Empty(start) => {
                    let element = Self::open(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_raise(|| ErrorKind::MalformedXml("closing tag without opening tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let text = text
                            .unescape()
                            .or_raise(|| ErrorKind::MalformedXml(format!("bad escape in <{}>", current.name)))?;
                        current.text.push_str(&text);
                    }
                },
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                },
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes.
                _ => {},
            }
        }
        if let Some(unclosed) = stack.last() {
            exn::bail!(ErrorKind::MalformedXml(format!("unclosed element <{}>", unclosed.name)));
        }
        root.ok_or_raise(|| ErrorKind::MalformedXml("document has no root element".to_string()))
    }

    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute =
                attribute.or_raise(|| ErrorKind::MalformedXml(format!("invalid attribute on <{name}>")))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .or_raise(|| ErrorKind::MalformedXml(format!("bad escape in attribute {key}")))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self { name, attributes, ..Self::default() })
    }

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => exn::bail!(ErrorKind::MalformedXml("more than one root element".to_string())),
        }
        Ok(())
    }

    /// The name without its namespace prefix.
    pub(crate) fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// First direct child with the given local name, whatever its prefix.
    pub(crate) fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    /// Direct children with the given qualified name, in document order.
    pub(crate) fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Value of the first attribute whose local name matches.
    pub(crate) fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| local(key) == local_name).map(|(_, value)| value.as_str())
    }

    /// Trimmed text payload, `None` when there's nothing but whitespace.
    pub(crate) fn text(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|t| !t.is_empty())
    }
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_nested_tree() {
        let root = Element::parse(b"<a x=\"1\"><b>one</b><c:d>two</c:d><e/></a>").unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.attribute("x"), Some("1"));
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.child("b").and_then(Element::text), Some("one"));
        assert_eq!(root.child("d").map(|d| d.name.as_str()), Some("c:d"));
        assert_eq!(root.child("e").and_then(Element::text), None);
    }

    #[test]
    fn test_unescapes_text_and_attributes() {
        let root = Element::parse(b"<a t=\"&quot;q&quot;\">Tom &amp; Jerry</a>").unwrap();
        assert_eq!(root.text(), Some("Tom & Jerry"));
        assert_eq!(root.attribute("t"), Some("\"q\""));
    }

    #[test]
    fn test_cdata_is_text() {
        let root = Element::parse(b"<a><![CDATA[<p>raw</p>]]></a>").unwrap();
        assert_eq!(root.text(), Some("<p>raw</p>"));
    }

    #[test]
    fn test_attribute_matches_local_name() {
        let root = Element::parse(b"<a opf:scheme=\"calibre\"/>").unwrap();
        assert_eq!(root.attribute("scheme"), Some("calibre"));
    }

    #[test]
    fn test_rejects_broken_documents() {
        assert!(Element::parse(b"").is_err());
        assert!(Element::parse(b"<a><b></a>").is_err());
        assert!(Element::parse(b"<a>").is_err());
        assert!(Element::parse(b"<a/><b/>").is_err());
        assert!(Element::parse(b"just some text").is_err());
    }
}
