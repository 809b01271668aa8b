//! Conversion state.
//!
//! This module provides `Accumulator`, the side channel the block walk writes
//! into: title and subtitle, footnote payloads awaiting backpatching, and the
//! bibliography entries. One accumulator lives for exactly one conversion and
//! is passed by `&mut` through the recursive walk.

use regex::Captures;

use crate::error::{Error, Result};
use crate::patterns::{BIBTEX_ENTRY_HEAD, BLANK_LINE};

/// Which of the two title fields is being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    Title,
    Subtitle,
}

/// Title and subtitle, each settable at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleState {
    title: Option<String>,
    subtitle: Option<String>,
}

impl TitleState {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Records a title field.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateTitle`] if the field already holds a value.
    pub fn set(&mut self, kind: TitleKind, value: String) -> Result<()> {
        let slot = match kind {
            TitleKind::Title => &mut self.title,
            TitleKind::Subtitle => &mut self.subtitle,
        };

        if let Some(existing) = slot {
            return Err(Error::DuplicateTitle {
                kind,
                existing: existing.clone(),
                new: value,
            });
        }

        *slot = Some(value);
        Ok(())
    }
}

/// Footnote payloads keyed by reference key, in first-insertion order.
///
/// A key recorded twice keeps its position but takes the later payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootnoteTable {
    entries: Vec<(String, String)>,
}

impl FootnoteTable {
    /// Inserts or overwrites a payload. Returns the replaced payload, if any.
    pub fn insert(&mut self, key: String, payload: String) -> Option<String> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, payload));
        }
        self.entries.push((key, payload));
        None
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, payload)| payload.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FootnoteTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (key, payload) in iter {
            table.insert(key.into(), payload.into());
        }
        table
    }
}

/// Everything the block walk collects besides the body text.
#[derive(Debug, Default)]
pub struct Accumulator {
    pub titles: TitleState,
    pub footnotes: FootnoteTable,
    bibliography: Vec<String>,
}

impl Accumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a footnote payload found in a division.
    ///
    /// Payloads that start with `@` are BibTeX entries: they are normalised and
    /// go to the bibliography. Everything else waits in the footnote table for
    /// the backpatcher.
    pub fn record_payload(&mut self, key: &str, payload: &str) {
        if payload.starts_with('@') {
            self.bibliography.push(normalize_bibtex(key, payload));
            return;
        }

        if self
            .footnotes
            .insert(key.to_string(), payload.to_string())
            .is_some()
        {
            tracing::warn!(key, "footnote key defined twice; keeping the later payload");
        }
    }

    /// Entries collected so far.
    #[must_use]
    pub fn bibliography_entries(&self) -> &[String] {
        &self.bibliography
    }

    /// All entries joined by blank lines, or `None` when nothing was collected.
    #[must_use]
    pub fn bibliography(&self) -> Option<String> {
        if self.bibliography.is_empty() {
            None
        } else {
            Some(self.bibliography.join("\n\n"))
        }
    }
}

/// Cleans an escaped BibTeX payload and gives the entry the reference key.
///
/// Braces are unescaped, the entry's own key is replaced with `key`, blank
/// lines are dropped and surrounding whitespace is trimmed.
#[must_use]
pub fn normalize_bibtex(key: &str, payload: &str) -> String {
    let unescaped = payload.replace("\\{", "{").replace("\\}", "}");
    let rekeyed = BIBTEX_ENTRY_HEAD.replace(&unescaped, |caps: &Captures<'_>| {
        format!("@{}{{{key},", &caps[1])
    });
    BLANK_LINE.replace_all(&rekeyed, "").trim().to_string()
}
