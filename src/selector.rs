//! Selector matching.
//!
//! The exported stylesheet only ever styles elements through single class
//! selectors (`.c4`) or bare tag names (`h3`), so that is all we match.

use crate::error::{Error, Result};
use crate::node::Element;

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `.name`
    Class(String),
    /// `h3`
    Tag(String),
}

impl Selector {
    /// Parses a selector string.
    ///
    /// Class selectors start with `.`; tag selectors start with a lowercase
    /// ASCII letter. Anything else is an [`Error::UnsupportedSelector`].
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some(class) = raw.strip_prefix('.') {
            return Ok(Self::Class(class.to_string()));
        }

        if raw.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Ok(Self::Tag(raw.to_string()));
        }

        Err(Error::UnsupportedSelector(raw.to_string()))
    }

    /// Whether this selector matches the element.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Class(class) => has_class(element, class),
            Self::Tag(tag) => *tag == element.tag_name,
        }
    }
}

/// Whether `class` is one of the whitespace-separated tokens of the element's
/// `class` attribute.
#[must_use]
pub fn has_class(element: &Element, class: &str) -> bool {
    element
        .attr("class")
        .is_some_and(|value| value.split_whitespace().any(|token| token == class))
}

/// Returns whether any of the given selectors match the element.
///
/// Selectors are parsed lazily, so an unsupported one is only reported if it
/// is reached before a match.
pub fn matches<S: AsRef<str>>(element: &Element, selectors: &[S]) -> Result<bool> {
    for raw in selectors {
        if Selector::parse(raw.as_ref())?.matches(element) {
            return Ok(true);
        }
    }
    Ok(false)
}
