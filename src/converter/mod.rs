//! Tree-to-LaTeX conversion.
//!
//! # Module Structure
//!
//! - `state`: side-channel accumulator (titles, footnotes, bibliography)
//! - `inline`: run-level rendering and formatting wraps
//! - `block`: structural rendering, title and footnote payload detection
//! - `backpatch`: splices footnote payloads into their references
//! - `tidy`: whole-document citation and code-block post passes
//!
//! The walk is one depth-first traversal in two modes. Block mode handles
//! structure and may recurse into itself; inline mode renders runs and never
//! calls back into block mode. Footnote payloads found during the walk travel
//! up as [`Rendered::Deferred`] until the enclosing division files them in the
//! [`Accumulator`].

pub mod backpatch;
pub mod block;
pub mod inline;
pub mod state;
pub mod tidy;

pub use backpatch::backpatch;
pub use state::{normalize_bibtex, Accumulator, FootnoteTable, TitleKind, TitleState};
pub use tidy::{expand_block_snippets, tidy_citations};

use crate::error::{Error, Result};
use crate::node::DocumentNode;
use crate::options::DEFAULT_REFERENCE_WIDTH;
use crate::style::FormatSelectorSet;

/// Output of rendering one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Ordinary LaTeX text.
    Text(String),
    /// Footnote content for `key`, to be filed by the enclosing division.
    Deferred {
        key: String,
        payload: String,
    },
}

impl Rendered {
    /// Flattens to text. A deferred payload that reaches a place where it
    /// cannot be filed keeps its content and loses its key.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Deferred { key, payload } => {
                tracing::warn!(key, "footnote payload outside a division; rendering it inline");
                payload
            }
        }
    }
}

/// Renders nodes against one document's format selectors.
#[derive(Debug, Clone, Copy)]
pub struct Transducer<'a> {
    selectors: &'a FormatSelectorSet,
    reference_width: f64,
}

impl<'a> Transducer<'a> {
    #[must_use]
    pub fn new(selectors: &'a FormatSelectorSet) -> Self {
        Self {
            selectors,
            reference_width: DEFAULT_REFERENCE_WIDTH,
        }
    }

    /// Page width in CSS pixels that image widths are measured against.
    #[must_use]
    pub fn with_reference_width(mut self, reference_width: f64) -> Self {
        self.reference_width = reference_width;
        self
    }

    /// Renders the body's top-level nodes, one per line.
    ///
    /// The exporter writes every line of the document as its own block, so
    /// consecutive blocks stay in one LaTeX paragraph. A block that renders
    /// nothing, such as an empty paragraph, still takes its line and so ends
    /// the paragraph. Whitespace between tags and comments are not blocks.
    ///
    /// # Errors
    ///
    /// Any error raised by the walk, or [`Error::EmptyDocument`] if nothing
    /// was rendered.
    pub fn render_document(
        &self,
        body: &[DocumentNode],
        acc: &mut Accumulator,
    ) -> Result<String> {
        let mut lines = Vec::with_capacity(body.len());
        for node in body {
            match node {
                DocumentNode::Text(text) if text.trim().is_empty() => continue,
                DocumentNode::Comment(_) => continue,
                _ => {}
            }
            let line = self
                .render_block(node, acc)?
                .map(Rendered::into_text)
                .unwrap_or_default();
            lines.push(line);
        }

        if lines.iter().all(String::is_empty) {
            return Err(Error::EmptyDocument);
        }

        Ok(lines.join("\n"))
    }
}

/// Converted body plus what the walk collected alongside it.
#[derive(Debug)]
pub struct ConvertedBody {
    /// Body text after backpatching and the post passes.
    pub latex: String,
    pub accumulator: Accumulator,
}

/// Walks the body and runs the post passes in their fixed order:
/// backpatch, citation tidy, block snippet expansion.
pub fn convert_body(
    body: &[DocumentNode],
    selectors: &FormatSelectorSet,
    reference_width: f64,
) -> Result<ConvertedBody> {
    let transducer = Transducer::new(selectors).with_reference_width(reference_width);
    let mut accumulator = Accumulator::new();

    let raw = transducer.render_document(body, &mut accumulator)?;
    tracing::debug!(
        body_len = raw.len(),
        footnotes = accumulator.footnotes.len(),
        bibliography_entries = accumulator.bibliography_entries().len(),
        "walked document"
    );

    let patched = backpatch(&raw, &accumulator.footnotes);
    let tidied = tidy_citations(&patched);
    let latex = expand_block_snippets(&tidied);

    Ok(ConvertedBody { latex, accumulator })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;

    fn p(children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::element("p", &[], children)
    }

    #[test]
    fn consecutive_blocks_share_a_paragraph() {
        let selectors = FormatSelectorSet::default();
        let body = vec![
            p(vec![DocumentNode::text("One")]),
            p(vec![DocumentNode::text("Two")]),
        ];
        let converted = convert_body(&body, &selectors, 600.0).expect("converts");
        assert_eq!(converted.latex, "One\nTwo");
    }

    #[test]
    fn empty_paragraph_breaks_the_paragraph() {
        let selectors = FormatSelectorSet::default();
        let body = vec![
            p(vec![DocumentNode::text("One")]),
            p(vec![]),
            p(vec![DocumentNode::text("Two")]),
        ];
        let converted = convert_body(&body, &selectors, 600.0).expect("converts");
        assert_eq!(converted.latex, "One\n\nTwo");
    }

    #[test]
    fn whitespace_and_comments_between_blocks_take_no_line() {
        let selectors = FormatSelectorSet::default();
        let body = vec![
            p(vec![DocumentNode::text("One")]),
            DocumentNode::text("\n  "),
            DocumentNode::Comment(String::new()),
            p(vec![DocumentNode::text("Two")]),
        ];
        let converted = convert_body(&body, &selectors, 600.0).expect("converts");
        assert_eq!(converted.latex, "One\nTwo");
    }

    #[test]
    fn empty_body_is_an_error() {
        let selectors = FormatSelectorSet::default();
        let body = vec![p(vec![]), DocumentNode::Comment("x".into())];
        let err = convert_body(&body, &selectors, 600.0).expect_err("nothing to render");
        assert!(matches!(err, Error::EmptyDocument));
    }

    #[test]
    fn stray_deferred_payload_renders_inline() {
        let selectors = style::resolve("");
        let body = vec![p(vec![
            DocumentNode::element("a", &[("href", "#ftnt_ref1")], vec![DocumentNode::text("[1]")]),
            DocumentNode::element("span", &[], vec![DocumentNode::text(" Loose note")]),
        ])];
        let converted = convert_body(&body, &selectors, 600.0).expect("converts");
        assert_eq!(converted.latex, " Loose note");
        assert!(converted.accumulator.footnotes.is_empty());
    }
}
