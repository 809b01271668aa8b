//! HTML front end.
//!
//! Parses the exported web page with `dom_query` and lowers the parsed DOM into
//! the owned [`DocumentNode`] tree the converter walks. Only two pieces of the
//! page matter: the stylesheet in `<head>` and the children of `<body>`.
//!
//! `html5ever` decodes entities while parsing. The converter expects source
//! form text (decoding happens in [`crate::escape`]), so text and attribute
//! values are re-encoded on the way out.

pub use dom_query::Document;

use dom_query::NodeRef;

use crate::error::{Error, Result};
use crate::node::{DocumentNode, Element};

/// The parts of an exported page the converter consumes.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Raw text of every `<style>` element in the head, in document order.
    pub stylesheet: String,
    /// Children of `<body>` in reading order.
    pub body: Vec<DocumentNode>,
}

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parses a page and extracts its stylesheet and body.
pub fn load_page(html: &str) -> Result<ParsedPage> {
    let document = parse(html.trim());
    let stylesheet = stylesheet_text(&document);
    let body = body_children(&document)?;

    tracing::debug!(
        stylesheet_len = stylesheet.len(),
        body_nodes = body.len(),
        "loaded page"
    );

    Ok(ParsedPage { stylesheet, body })
}

/// Concatenated text of the `<style>` elements in `<head>`.
#[must_use]
pub fn stylesheet_text(document: &Document) -> String {
    document.select("head style").text().to_string()
}

/// Lowers the children of `<body>`.
pub fn body_children(document: &Document) -> Result<Vec<DocumentNode>> {
    let body = document.select("body");
    let Some(body_node) = body.nodes().first() else {
        return Err(Error::MalformedDocument("no <body> element".to_string()));
    };

    Ok(body_node.children().iter().map(lower).collect())
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Get all attributes as key-value pairs, values re-encoded to source form.
#[must_use]
pub fn source_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| {
            (
                attr.name.local.to_string(),
                htmlize::escape_attribute(attr.value.to_string()).into_owned(),
            )
        })
        .collect()
}

/// Converts a DOM node and its subtree into a [`DocumentNode`].
#[must_use]
pub fn lower(node: &NodeRef) -> DocumentNode {
    if node.is_element() {
        return DocumentNode::Element(Element {
            tag_name: tag_name(node).unwrap_or_default(),
            attributes: source_attributes(node),
            children: node.children().iter().map(lower).collect(),
        });
    }

    if node.is_text() {
        return DocumentNode::Text(htmlize::escape_text(node.text().to_string()).into_owned());
    }

    // Only comments are left below <body>; their content is never rendered.
    DocumentNode::Comment(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_page_splits_stylesheet_and_body() {
        let html = r#"<html><head><meta charset="utf-8"><style>.c1{font-weight:700}</style></head><body class="doc"><p class="c1"><span>Hi</span></p></body></html>"#;
        let page = load_page(html).expect("page should load");

        assert_eq!(page.stylesheet, ".c1{font-weight:700}");
        assert_eq!(page.body.len(), 1);
        match &page.body[0] {
            DocumentNode::Element(p) => {
                assert_eq!(p.tag_name, "p");
                assert_eq!(p.attr("class"), Some("c1"));
                assert_eq!(p.children.len(), 1);
            }
            other => panic!("expected <p>, got {other:?}"),
        }
    }

    #[test]
    fn text_is_kept_in_source_form() {
        let page = load_page("<html><body><p>a &amp; b &lt; c</p></body></html>")
            .expect("page should load");
        let DocumentNode::Element(p) = &page.body[0] else {
            panic!("expected element");
        };
        assert_eq!(p.children[0], DocumentNode::text("a &amp; b &lt; c"));
    }

    #[test]
    fn attributes_are_kept_in_source_form() {
        let page = load_page(
            r#"<html><body><p><a href="https://www.google.com/url?q=https://x.org&amp;sa=D">x</a></p></body></html>"#,
        )
        .expect("page should load");
        let DocumentNode::Element(p) = &page.body[0] else {
            panic!("expected element");
        };
        let DocumentNode::Element(a) = &p.children[0] else {
            panic!("expected anchor");
        };
        assert_eq!(
            a.attr("href"),
            Some("https://www.google.com/url?q=https://x.org&amp;sa=D")
        );
    }

    #[test]
    fn missing_stylesheet_is_empty() {
        let page = load_page("<p>x</p>").expect("page should load");
        assert!(page.stylesheet.is_empty());
        assert_eq!(page.body.len(), 1);
    }

    #[test]
    fn comments_lower_to_comment_nodes() {
        let page = load_page("<html><body><!-- note --><p>x</p></body></html>")
            .expect("page should load");
        assert!(matches!(page.body[0], DocumentNode::Comment(_)));
    }
}
