//! Document tree model.
//!
//! The tree is produced once by the HTML front end (see [`crate::dom`]) and is
//! only read afterwards. Text contents and attribute values are kept in their
//! source form: entities are decoded by the text escaper, not here.

/// A node of the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// Character data.
    Text(String),
    /// An element with its attributes and children in reading order.
    Element(Element),
    /// An HTML comment.
    Comment(String),
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in reading order.
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Shorthand for a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Shorthand for an element node.
    #[must_use]
    pub fn element(
        tag_name: impl Into<String>,
        attributes: &[(&str, &str)],
        children: Vec<DocumentNode>,
    ) -> Self {
        Self::Element(Element {
            tag_name: tag_name.into(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            children,
        })
    }
}

impl Element {
    /// First value of the named attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Classifies the tag name.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_tag(&self.tag_name)
    }

    /// Whether the element has no children at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// The element kinds the transducers distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Division,
    Paragraph,
    Span,
    Superscript,
    Subscript,
    Anchor,
    ListItem,
    UnorderedList,
    OrderedList,
    Table,
    TableRow,
    TableCell,
    /// `h1` to `h6`.
    Heading(u8),
    LineBreak,
    Image,
    HorizontalRule,
    /// Anything else, carrying the tag name for diagnostics.
    Other(String),
}

impl ElementKind {
    /// Maps a lowercase tag name to its kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "div" => Self::Division,
            "p" => Self::Paragraph,
            "span" => Self::Span,
            "sup" => Self::Superscript,
            "sub" => Self::Subscript,
            "a" => Self::Anchor,
            "li" => Self::ListItem,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "table" => Self::Table,
            "tr" => Self::TableRow,
            "td" | "th" => Self::TableCell,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "br" => Self::LineBreak,
            "img" => Self::Image,
            "hr" => Self::HorizontalRule,
            other => Self::Other(other.to_string()),
        }
    }

    /// Run-level containers that carry formatting classes.
    #[must_use]
    pub fn is_formatting_container(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Span
                | Self::Superscript
                | Self::Subscript
                | Self::Anchor
                | Self::ListItem
                | Self::TableCell
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_returns_first_match() {
        let node = Element {
            tag_name: "a".to_string(),
            attributes: vec![
                ("href".to_string(), "#one".to_string()),
                ("href".to_string(), "#two".to_string()),
            ],
            children: Vec::new(),
        };
        assert_eq!(node.attr("href"), Some("#one"));
        assert_eq!(node.attr("id"), None);
    }

    #[test]
    fn from_tag_classifies_known_and_unknown_tags() {
        assert_eq!(ElementKind::from_tag("th"), ElementKind::TableCell);
        assert_eq!(ElementKind::from_tag("h3"), ElementKind::Heading(3));
        assert_eq!(
            ElementKind::from_tag("blockquote"),
            ElementKind::Other("blockquote".to_string())
        );
    }

    #[test]
    fn formatting_containers_exclude_structure() {
        assert!(ElementKind::Span.is_formatting_container());
        assert!(ElementKind::TableCell.is_formatting_container());
        assert!(!ElementKind::Division.is_formatting_container());
        assert!(!ElementKind::Heading(1).is_formatting_container());
    }
}
