//! Inline rendering.
//!
//! Renders run-level nodes: text, line breaks, images, links, footnote
//! anchors and the formatting containers (`p`, `span`, `sup`, `sub`, `a`,
//! `li`, `td`). Formatting comes exclusively from the classes resolved out of
//! the stylesheet.

use url::Url;

use super::{Rendered, Transducer};
use crate::error::{Error, Result};
use crate::escape::escape;
use crate::node::{DocumentNode, Element, ElementKind};
use crate::patterns::{
    FOOTNOTE_REF_PREFIX, FOOTNOTE_TARGET_PREFIX, GOOGLE_REDIRECT_PREFIX, PIXEL_WIDTH,
};
use crate::selector;

/// Line break inside a paragraph.
pub const LINE_BREAK: &str = "\\\\~";

impl Transducer<'_> {
    /// Renders a node in inline mode.
    ///
    /// Returns `Ok(None)` when there is nothing to render (comments, empty
    /// text, childless elements), so callers can drop the node without
    /// emitting a separator for it.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedMarkup`] for tags outside the inline vocabulary,
    /// [`Error::MissingAttribute`] for an image without `src`,
    /// [`Error::UnsupportedSelector`] for a malformed stylesheet selector.
    pub fn render_inline(&self, node: &DocumentNode) -> Result<Option<Rendered>> {
        let element = match node {
            DocumentNode::Text(content) => return Ok(text_fragment(escape(content))),
            DocumentNode::Comment(_) => return Ok(None),
            DocumentNode::Element(element) => element,
        };

        let kind = element.kind();
        match kind {
            ElementKind::LineBreak => return Ok(Some(Rendered::Text(LINE_BREAK.to_string()))),
            ElementKind::Image => return self.render_image(element).map(|s| Some(Rendered::Text(s))),
            _ => {}
        }

        if element.is_empty() {
            return Ok(None);
        }

        let Some(children) = self.render_inline_children(&element.children)? else {
            return Ok(None);
        };

        if kind == ElementKind::Anchor {
            if let Some(rendered) = self.render_anchor(element, &children) {
                return Ok(Some(rendered));
            }
        }

        if kind.is_formatting_container() {
            return self.apply_formatting(element, children).map(Some);
        }

        Err(Error::UnsupportedMarkup {
            tag: element.tag_name.clone(),
            content: None,
        })
    }

    /// Concatenates the inline rendering of `children`.
    ///
    /// A deferred payload keeps its key only when it opens the run; the
    /// children after it become its payload.
    pub fn render_inline_children(&self, children: &[DocumentNode]) -> Result<Option<Rendered>> {
        let mut key: Option<String> = None;
        let mut text = String::new();

        for child in children {
            match self.render_inline(child)? {
                None => {}
                Some(Rendered::Text(t)) => text.push_str(&t),
                Some(Rendered::Deferred { key: k, payload }) => {
                    if key.is_none() && text.is_empty() {
                        key = Some(k);
                    } else {
                        tracing::warn!(key = %k, "footnote anchor inside running text; dropping its marker");
                    }
                    text.push_str(&payload);
                }
            }
        }

        Ok(match key {
            Some(key) => Some(Rendered::Deferred { key, payload: text }),
            None => text_fragment(text),
        })
    }

    /// Footnote references, footnote targets and hyperlinks.
    ///
    /// Returns `None` for an anchor without any of those, which then renders
    /// like any other formatting container.
    fn render_anchor(&self, element: &Element, children: &Rendered) -> Option<Rendered> {
        if let Some(key) = element
            .attr("id")
            .and_then(|id| id.strip_prefix(FOOTNOTE_REF_PREFIX))
        {
            return Some(Rendered::Text(format!("\\cite{{{key}}}")));
        }

        let href = element.attr("href")?;

        if let Some(key) = href.strip_prefix(FOOTNOTE_TARGET_PREFIX) {
            // The anchor's own text is the footnote number; only the key matters.
            return Some(Rendered::Deferred {
                key: key.to_string(),
                payload: String::new(),
            });
        }

        let label = match children {
            Rendered::Text(text) | Rendered::Deferred { payload: text, .. } => text,
        };

        if let Some(anchor) = href.strip_prefix('#') {
            return Some(Rendered::Text(format!("\\hyperref[id:{anchor}]{{{label}}}")));
        }

        let target = unwrap_redirect(href).unwrap_or_else(|| href.to_string());
        Some(Rendered::Text(format!("\\href{{{}}}{{{label}}}", escape(&target))))
    }

    /// Figure environment for an `<img>`.
    fn render_image(&self, element: &Element) -> Result<String> {
        let src = element.attr("src").ok_or_else(|| Error::MissingAttribute {
            tag: element.tag_name.clone(),
            attribute: "src",
        })?;
        let src = htmlize::unescape_attribute(src);

        let width = element
            .attr("style")
            .and_then(|style| self.width_fraction(style))
            .unwrap_or_else(|| "1".to_string());

        let mut latex = String::from("\\begin{figure}[h!]\n  \\centering\n");
        latex.push_str(&format!(
            "  \\includegraphics[width={width}\\linewidth]{{{src}}}\n"
        ));

        if let Some(alt) = element.attr("alt").filter(|alt| !alt.is_empty()) {
            latex.push_str(&format!("  \\caption{{{}}}\n", escape(alt)));
        }

        if let Some(title) = element.attr("title").filter(|title| !title.is_empty()) {
            latex.push_str(&format!("  \\label{{figure:{title}}}\n"));
        }

        latex.push_str("\\end{figure}");
        Ok(latex)
    }

    /// Image width as a fraction of the line width, from a `width:<n>px`
    /// declaration. Clamped to 1 and formatted with three decimals.
    fn width_fraction(&self, style: &str) -> Option<String> {
        let start = style.find("width:")? + "width:".len();
        let value = style[start..].split(';').next().unwrap_or_default().trim();
        let pixels: f64 = PIXEL_WIDTH.captures(value)?.get(1)?.as_str().parse().ok()?;

        Some(format!("{:.3}", (pixels / self.reference_width).min(1.0)))
    }

    /// Applies every matching formatting wrap, innermost first, in the fixed
    /// order bold, italic, underline, superscript, subscript, center, right.
    fn apply_formatting(&self, element: &Element, rendered: Rendered) -> Result<Rendered> {
        match rendered {
            Rendered::Text(text) => Ok(Rendered::Text(self.wrap(element, text)?)),
            Rendered::Deferred { key, payload } if payload.is_empty() => {
                Ok(Rendered::Deferred { key, payload })
            }
            Rendered::Deferred { key, payload } => Ok(Rendered::Deferred {
                key,
                payload: self.wrap(element, payload)?,
            }),
        }
    }

    fn wrap(&self, element: &Element, mut text: String) -> Result<String> {
        let s = self.selectors;
        let wraps: [(&[String], &str, &str); 7] = [
            (s.bold.as_slice(), "\\textbf{", "}"),
            (s.italic.as_slice(), "\\textit{", "}"),
            (s.underlined.as_slice(), "\\underline{", "}"),
            (s.superscript.as_slice(), "\\textsuperscript{", "}"),
            (s.subscript.as_slice(), "\\textsubscript{", "}"),
            (s.center.as_slice(), "{\\centering ", " \\par}"),
            (s.right.as_slice(), "{\\raggedleft ", " \\par}"),
        ];

        for (selectors, open, close) in wraps {
            if selector::matches(element, selectors)? {
                text = format!("{open}{text}{close}");
            }
        }

        Ok(text)
    }
}

/// `None` for empty text so blank runs never reach a join.
pub(crate) fn text_fragment(text: String) -> Option<Rendered> {
    if text.is_empty() {
        None
    } else {
        Some(Rendered::Text(text))
    }
}

/// The destination of a Google redirect link (`https://www.google.com/url?q=...`).
#[must_use]
pub fn unwrap_redirect(href: &str) -> Option<String> {
    if !href.starts_with(GOOGLE_REDIRECT_PREFIX) {
        return None;
    }

    let url = Url::parse(&htmlize::unescape_attribute(href)).ok()?;
    url.query_pairs()
        .find(|(name, _)| name == "q")
        .map(|(_, value)| value.into_owned())
}
