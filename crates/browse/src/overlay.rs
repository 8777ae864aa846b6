//! The image-zoom overlay, as a plain element tree.
//!
//! Building the tree has no side effects. A presentation layer mounts it; the
//! [`Store`](crate::Store) decides when it goes away.

use crate::render::escape;
use std::fmt::Write;

/// Value of the `id` attribute on the overlay's root element.
pub const OVERLAY_ID: &str = "imageOverlay";
/// Attribute marking an element that dismisses the overlay when clicked.
pub const DISMISS_ATTRIBUTE: &str = "data-dismiss";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Div,
    Img,
    Button,
    Icon,
}

impl Kind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Img => "img",
            Self::Button => "button",
            Self::Icon => "i",
        }
    }

    fn is_void(self) -> bool {
        matches!(self, Self::Img)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: Kind,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: Kind) -> Self {
        Self { kind, attributes: Vec::new(), text: None, children: Vec::new() }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Depth-first search, this node included.
    pub fn find(&self, predicate: impl Fn(&Node) -> bool + Copy) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// Serializes the tree to HTML, escaping every attribute value and text.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, html: &mut String) {
        let tag = self.kind.tag();
        html.push('<');
        html.push_str(tag);
        for (name, value) in &self.attributes {
            // Infallible: writing to a String.
            let _ = write!(html, " {name}=\"{}\"", escape(value));
        }
        html.push('>');
        if self.kind.is_void() {
            return;
        }
        if let Some(text) = &self.text {
            html.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(html);
        }
        let _ = write!(html, "</{tag}>");
    }
}

/// What closed the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dismiss {
    Backdrop,
    CloseButton,
    Escape,
}

impl Dismiss {
    /// Only the cancel key dismisses; every other key is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        (key == "Escape").then_some(Self::Escape)
    }
}

/// Builds the full-screen overlay enlarging `image_url`:
///
/// ```text
/// div#imageOverlay [data-dismiss=backdrop]
/// └── div.image-overlay-container
///     ├── img [src, alt=title]
///     ├── button [data-dismiss=close] > i
///     └── div.image-overlay-title  "title"
/// ```
pub fn zoom(image_url: &str, title: &str) -> Node {
    let image = Node::new(Kind::Img)
        .with_attribute("class", "image-overlay-image")
        .with_attribute("src", image_url)
        .with_attribute("alt", title);
    let close = Node::new(Kind::Button)
        .with_attribute("type", "button")
        .with_attribute("class", "image-overlay-close")
        .with_attribute("aria-label", "Close")
        .with_attribute(DISMISS_ATTRIBUTE, "close")
        .with_child(Node::new(Kind::Icon).with_attribute("class", "bi bi-x-lg"));
    let caption = Node::new(Kind::Div).with_attribute("class", "image-overlay-title").with_text(title);
    let container = Node::new(Kind::Div)
        .with_attribute("class", "image-overlay-container")
        .with_child(image)
        .with_child(close)
        .with_child(caption);
    Node::new(Kind::Div)
        .with_attribute("id", OVERLAY_ID)
        .with_attribute("class", "image-overlay")
        .with_attribute(DISMISS_ATTRIBUTE, "backdrop")
        .with_child(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_tree() {
        let overlay = zoom("A/B/cover.jpg", "Iracema");
        assert_eq!(overlay.kind, Kind::Div);
        assert_eq!(overlay.attribute("id"), Some(OVERLAY_ID));
        assert_eq!(overlay.attribute(DISMISS_ATTRIBUTE), Some("backdrop"));

        let image = overlay.find(|n| n.kind == Kind::Img).unwrap();
        assert_eq!(image.attribute("src"), Some("A/B/cover.jpg"));
        assert_eq!(image.attribute("alt"), Some("Iracema"));

        let close = overlay.find(|n| n.kind == Kind::Button).unwrap();
        assert_eq!(close.attribute(DISMISS_ATTRIBUTE), Some("close"));

        let caption = overlay.find(|n| n.text.is_some()).unwrap();
        assert_eq!(caption.text.as_deref(), Some("Iracema"));
    }

    #[test]
    fn test_to_html_escapes() {
        let html = zoom("x.jpg?a=1&b=2", "<Tom & \"Jerry\">").to_html();
        assert!(html.starts_with(r#"<div id="imageOverlay" class="image-overlay" data-dismiss="backdrop">"#));
        assert!(html.contains(r#"src="x.jpg?a=1&amp;b=2""#));
        assert!(html.contains(r#"alt="&lt;Tom &amp; &quot;Jerry&quot;&gt;""#));
        assert!(html.contains(">&lt;Tom &amp; &quot;Jerry&quot;&gt;</div>"));
        assert!(!html.contains("</img>"));
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn test_only_escape_key_dismisses() {
        assert_eq!(Dismiss::from_key("Escape"), Some(Dismiss::Escape));
        assert_eq!(Dismiss::from_key("Enter"), None);
        assert_eq!(Dismiss::from_key("escape"), None);
    }
}
