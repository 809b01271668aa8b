//! Block rendering.
//!
//! Handles document structure: divisions, lists, tables, page breaks,
//! headings and the title/subtitle paragraphs. Divisions are also where
//! footnote bodies are recognised and filed into the [`Accumulator`].

use super::inline::text_fragment;
use super::{Accumulator, Rendered, TitleKind, Transducer};
use crate::error::{Error, Result};
use crate::escape::escape;
use crate::node::{DocumentNode, Element, ElementKind};
use crate::patterns::{PAGE_BREAK_STYLE, SUBTITLE_SELECTOR, TITLE_SELECTOR};
use crate::selector;

/// Sectioning commands for `h1` to `h4`.
const SECTIONING: [&str; 4] = ["section", "subsection", "subsubsection", "subsubsubsection"];

impl Transducer<'_> {
    /// Renders a node in block mode.
    ///
    /// # Errors
    ///
    /// Everything [`Transducer::render_inline`] raises, plus
    /// [`Error::DuplicateTitle`] and [`Error::UnsupportedMarkup`] for block
    /// tags without a LaTeX counterpart.
    pub fn render_block(
        &self,
        node: &DocumentNode,
        acc: &mut Accumulator,
    ) -> Result<Option<Rendered>> {
        let element = match node {
            DocumentNode::Text(content) if content.trim().is_empty() => return Ok(None),
            DocumentNode::Text(content) => return Ok(text_fragment(escape(content))),
            DocumentNode::Comment(_) => return Ok(None),
            DocumentNode::Element(element) => element,
        };

        let kind = element.kind();

        if kind == ElementKind::HorizontalRule {
            return Ok(is_page_break(element).then(|| Rendered::Text("\\pagebreak".to_string())));
        }

        if element.is_empty() {
            return Ok(None);
        }

        match kind {
            ElementKind::Division if !is_title_wrapper(element)? => self.render_division(element, acc),
            ElementKind::UnorderedList => self.render_list(element, "itemize"),
            ElementKind::OrderedList => self.render_list(element, "enumerate"),
            ElementKind::Table => self.render_table(element),
            ElementKind::Paragraph if !is_title_wrapper(element)? => {
                self.render_inline(node)
            }
            _ => self.render_heading_or_title(element, acc),
        }
    }

    /// Joins the children with blank lines, or files them as a footnote body
    /// when the division opens with a footnote target anchor.
    fn render_division(&self, element: &Element, acc: &mut Accumulator) -> Result<Option<Rendered>> {
        let mut key: Option<String> = None;
        let mut parts: Vec<String> = Vec::new();

        for child in &element.children {
            match self.render_block(child, acc)? {
                None => {}
                Some(Rendered::Text(text)) => parts.push(text),
                Some(Rendered::Deferred { key: k, payload }) => {
                    if key.is_none() && parts.is_empty() {
                        key = Some(k);
                        parts.push(payload);
                    } else {
                        tracing::warn!(key = %k, "second footnote anchor in one division; rendering it inline");
                        if !payload.is_empty() {
                            parts.push(payload);
                        }
                    }
                }
            }
        }

        let content = parts.join("\n\n");

        if let Some(key) = key {
            acc.record_payload(&key, content.trim());
            return Ok(None);
        }

        Ok(text_fragment(content))
    }

    /// `itemize` or `enumerate` with one `\item` per rendered child.
    fn render_list(&self, element: &Element, environment: &str) -> Result<Option<Rendered>> {
        let mut items = Vec::new();
        for child in element.children.iter().filter(|c| !is_blank_text(c)) {
            if let Some(item) = self.render_inline(child)? {
                items.push(format!("  \\item {}", item.into_text()));
            }
        }

        Ok(Some(Rendered::Text(format!(
            "\\begin{{{environment}}}\n{}\n\\end{{{environment}}}",
            items.join("\n")
        ))))
    }

    /// A ruled `tabular`, one `l` column per cell of the first row.
    ///
    /// The first element child is the row container the parser inserts
    /// (`tbody`).
    fn render_table(&self, element: &Element) -> Result<Option<Rendered>> {
        let Some(row_container) = child_elements(element).next() else {
            return Err(Error::UnsupportedMarkup {
                tag: element.tag_name.clone(),
                content: Some("first child is not a row container".to_string()),
            });
        };

        let rows: Vec<&Element> = child_elements(row_container).collect();
        let columns = rows.first().map_or(0, |row| child_elements(row).count());

        let mut latex = String::from("\\begin{adjustbox}{center}\\begin{tabular}{ |");
        latex.push_str(&"l|".repeat(columns));
        latex.push_str(" }\n  \\hline\n");

        for row in rows {
            let mut cells = Vec::new();
            for cell in &row.children {
                if !matches!(cell, DocumentNode::Element(_)) {
                    continue;
                }
                let rendered = self.render_inline(cell)?;
                cells.push(rendered.map(Rendered::into_text).unwrap_or_default());
            }

            latex.push_str("  ");
            latex.push_str(&cells.join(" & "));
            latex.push_str(" \\\\\n  \\hline\n");
        }

        latex.push_str("\\end{tabular}\\end{adjustbox}\\\\");
        Ok(Some(Rendered::Text(latex)))
    }

    /// Title, subtitle, or a heading. Anything else is unsupported here.
    fn render_heading_or_title(
        &self,
        element: &Element,
        acc: &mut Accumulator,
    ) -> Result<Option<Rendered>> {
        let Some(rendered) = self.render_inline_children(&element.children)? else {
            return Ok(None);
        };
        let content = rendered.into_text();
        if content.is_empty() {
            return Ok(None);
        }

        if selector::matches(element, &[TITLE_SELECTOR])? {
            acc.titles.set(TitleKind::Title, content)?;
            return Ok(None);
        }
        if selector::matches(element, &[SUBTITLE_SELECTOR])? {
            acc.titles.set(TitleKind::Subtitle, content)?;
            return Ok(None);
        }

        match element.kind() {
            ElementKind::Heading(level @ 1..=4) => {
                let command = SECTIONING[usize::from(level - 1)];
                let mut latex = format!("\\{command}{{{content}}}");
                if let Some(id) = element.attr("id") {
                    latex.push_str(&format!("\\label{{id:{id}}}"));
                }
                Ok(Some(Rendered::Text(latex)))
            }
            _ => Err(Error::UnsupportedMarkup {
                tag: element.tag_name.clone(),
                content: Some(content),
            }),
        }
    }
}

fn is_title_wrapper(element: &Element) -> Result<bool> {
    selector::matches(element, &[TITLE_SELECTOR, SUBTITLE_SELECTOR])
}

fn is_page_break(element: &Element) -> bool {
    element
        .attr("style")
        .is_some_and(|style| style.contains(PAGE_BREAK_STYLE))
}

/// Whitespace between tags, kept by the parser but meaningless in block mode.
fn is_blank_text(node: &DocumentNode) -> bool {
    matches!(node, DocumentNode::Text(text) if text.trim().is_empty())
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|child| match child {
        DocumentNode::Element(e) => Some(e),
        _ => None,
    })
}
