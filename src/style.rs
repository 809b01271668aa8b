//! Style resolution.
//!
//! Google Docs exports one flat, minified stylesheet where every formatting
//! choice becomes a small class rule such as `.c4{font-weight:700}`. Instead of
//! parsing CSS we look for the declarations we care about and recover the
//! selector of the rule each one sits in.
//!
//! The scan is purely textual: for each occurrence of a declaration, the
//! selector is whatever follows the last `}` before the last `{` that precedes
//! it. A declaration outside any rule yields a meaningless selector string;
//! that is accepted, since the exporter never produces one.

use serde::Serialize;

/// Declarations that map to a LaTeX formatting wrap.
pub const BOLD: &str = "font-weight:700";
pub const ITALIC: &str = "font-style:italic";
pub const UNDERLINE: &str = "text-decoration:underline";
pub const SUPERSCRIPT: &str = "vertical-align:super";
pub const SUBSCRIPT: &str = "vertical-align:sub";
pub const CENTER: &str = "text-align:center";
pub const RIGHT: &str = "text-align:right";

/// Selectors carrying each tracked formatting property.
///
/// Built once per document by [`resolve`]; never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatSelectorSet {
    pub bold: Vec<String>,
    pub italic: Vec<String>,
    pub underlined: Vec<String>,
    pub superscript: Vec<String>,
    pub subscript: Vec<String>,
    pub center: Vec<String>,
    pub right: Vec<String>,
}

/// Builds the [`FormatSelectorSet`] for a stylesheet.
#[must_use]
pub fn resolve(stylesheet: &str) -> FormatSelectorSet {
    let set = FormatSelectorSet {
        bold: selectors_with(stylesheet, BOLD),
        italic: selectors_with(stylesheet, ITALIC),
        underlined: selectors_with(stylesheet, UNDERLINE),
        superscript: selectors_with(stylesheet, SUPERSCRIPT),
        subscript: selectors_with(stylesheet, SUBSCRIPT),
        center: selectors_with(stylesheet, CENTER),
        right: selectors_with(stylesheet, RIGHT),
    };

    tracing::debug!(
        bold = set.bold.len(),
        italic = set.italic.len(),
        underlined = set.underlined.len(),
        superscript = set.superscript.len(),
        subscript = set.subscript.len(),
        center = set.center.len(),
        right = set.right.len(),
        "resolved format selectors"
    );

    set
}

/// One selector per occurrence of `declaration`, in stylesheet order.
#[must_use]
pub fn selectors_with(stylesheet: &str, declaration: &str) -> Vec<String> {
    stylesheet
        .match_indices(declaration)
        .map(|(at, _)| rule_selector(&stylesheet[..at]))
        .collect()
}

/// Selector text of the rule that is open at the end of `before`.
fn rule_selector(before: &str) -> String {
    let head = before.rfind('{').map_or("", |open| &before[..open]);
    let selector = head.rfind('}').map_or(head, |close| &head[close + 1..]);
    selector.to_string()
}
