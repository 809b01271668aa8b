//! Compiled regex patterns and fixed markers used by the converter.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Export Conventions
// =============================================================================

/// `id` prefix of the in-text footnote reference anchor.
pub const FOOTNOTE_REF_PREFIX: &str = "ftnt_";

/// `href` prefix of the anchor that opens a footnote body.
pub const FOOTNOTE_TARGET_PREFIX: &str = "#ftnt_";

/// Google wraps external links in this redirect; the target is in `q`.
pub const GOOGLE_REDIRECT_PREFIX: &str = "https://www.google.com/url?";

/// Style declaration that marks a page-break rule.
pub const PAGE_BREAK_STYLE: &str = "page-break-before:always";

/// Classes Google assigns to the title and subtitle paragraphs.
pub const TITLE_SELECTOR: &str = ".title";
pub const SUBTITLE_SELECTOR: &str = ".subtitle";

/// Emitted by the text escaper for each triple-backtick fence and expanded by
/// the block snippet pass once the whole document is known.
pub const BLOCK_SNIPPET_MARKER: &str = "\\blocksnippet{";

// =============================================================================
// Text Escaping Patterns
// =============================================================================

/// Triple-backtick fence with an optional language tag.
pub static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([a-zA-Z]*)").expect("CODE_FENCE regex"));

/// Language tag at the start of a block snippet.
pub static SNIPPET_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]*").expect("SNIPPET_LANGUAGE regex"));

/// Pixel width inside an inline `style` attribute value.
pub static PIXEL_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*)px$").expect("PIXEL_WIDTH regex"));

// =============================================================================
// Citation Patterns
// =============================================================================

/// Two or more directly adjacent citations.
pub static CITATION_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\cite\{[^}]*\}){2,}").expect("CITATION_RUN regex"));

/// A single citation, capturing its keys.
pub static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\cite\{([^}]*)\}").expect("CITATION regex"));

/// A citation that is the only content of a parenthesis pair.
pub static PARENTHESIZED_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\\cite\{([^}]*)\}\)").expect("PARENTHESIZED_CITATION regex")
});

/// A space directly in front of a citation or parenthetical citation.
pub static SPACED_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" (\\(?:cite|citep)\{[^}]*\})").expect("SPACED_CITATION regex")
});

// =============================================================================
// Bibliography Patterns
// =============================================================================

/// Entry type and key of a BibTeX entry: `@article{key,`.
pub static BIBTEX_ENTRY_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([a-zA-Z]+?)\s*\{\s*[^,]+\s*,").expect("BIBTEX_ENTRY_HEAD regex")
});

/// Lines holding nothing but spaces or tabs.
pub static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\n").expect("BLANK_LINE regex"));
