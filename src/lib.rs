//! # gdoc2latex
//!
//! Converts a Google Docs "Web page (.html)" export into a LaTeX document and
//! a companion BibTeX database.
//!
//! Formatting is recovered from the class rules of the exported stylesheet,
//! footnotes become `\footnote{}` or, when their body is a BibTeX entry,
//! `\cite{}` against the generated bibliography.
//!
//! ## Quick Start
//!
//! ```rust
//! use gdoc2latex::convert;
//!
//! let html = r#"<html><head><style>.c2{font-weight:700}</style></head>
//! <body><p class="c1">Hello <span class="c2">world</span></p></body></html>"#;
//!
//! let conversion = convert(html)?;
//! assert!(conversion.latex.contains(r"Hello \textbf{world}"));
//! assert!(conversion.bibtex.is_none());
//! # Ok::<(), gdoc2latex::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`dom::load_page`] parses the page and lowers `<body>` to [`DocumentNode`]s.
//! 2. [`style::resolve`] maps formatting declarations to their selectors.
//! 3. [`converter::convert_body`] walks the tree, then backpatches footnotes,
//!    tidies citations and expands code snippets.
//! 4. [`assemble::assemble`] adds the title, templates and bibliography command.

mod error;
mod patterns;

/// Document assembly (title command, templates, bibliography command).
pub mod assemble;

/// Tree walk and whole-document post passes.
pub mod converter;

/// HTML parsing and lowering to the document tree.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// LaTeX text escaping.
pub mod escape;

/// Filesystem front end: path policy, templates, image copying.
pub mod files;

/// Owned document tree.
pub mod node;

/// Conversion options and bundled templates.
pub mod options;

/// Conversion output.
pub mod result;

/// Class and tag selector matching.
pub mod selector;

/// Stylesheet scanning for formatting selectors.
pub mod style;

// Public API - re-exports
pub use error::{Error, Result};
pub use node::{DocumentNode, Element};
pub use options::Options;
pub use result::Conversion;

/// Converts an exported page using the bundled templates.
///
/// # Example
///
/// ```rust
/// use gdoc2latex::convert;
///
/// let html = r#"<html><head></head><body><h1 id="h.1">Intro</h1></body></html>"#;
/// let conversion = convert(html)?;
/// assert!(conversion.latex.contains(r"\section{Intro}\label{id:h.1}"));
/// # Ok::<(), gdoc2latex::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn convert(html: &str) -> Result<Conversion> {
    convert_with_options(html, &Options::default())
}

/// Converts an exported page with custom options.
///
/// # Example
///
/// ```rust
/// use gdoc2latex::{convert_with_options, Options};
///
/// let options = Options {
///     template_start: "\\documentclass{article}".to_string(),
///     template_end: "\\end{document}".to_string(),
///     output_file: "paper.tex".to_string(),
///     ..Options::default()
/// };
/// let html = "<html><body><p>Text</p></body></html>";
/// let conversion = convert_with_options(html, &options)?;
/// assert!(conversion.latex.contains(r"\bibliography{paper}"));
/// # Ok::<(), gdoc2latex::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn convert_with_options(html: &str, options: &Options) -> Result<Conversion> {
    let page = dom::load_page(html)?;
    convert_tree(&page.stylesheet, &page.body, options)
}

/// Converts raw page bytes, detecting the character encoding first.
///
/// The encoding comes from a byte order mark or a `<meta>` charset
/// declaration and defaults to UTF-8. Malformed sequences are replaced with
/// U+FFFD rather than failing.
///
/// # Example
///
/// ```rust
/// use gdoc2latex::{convert_bytes, Options};
///
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body><p>Caf\xE9</p></body></html>";
/// let conversion = convert_bytes(html, &Options::default())?;
/// assert!(conversion.latex.contains("Café"));
/// # Ok::<(), gdoc2latex::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn convert_bytes(html: &[u8], options: &Options) -> Result<Conversion> {
    let html_str = encoding::transcode_to_utf8(html);
    convert_with_options(&html_str, options)
}

/// Converts an already parsed document: stylesheet text plus body nodes.
///
/// Text and attribute values in `body` are expected in source form, with
/// HTML entities not yet decoded.
#[allow(clippy::missing_errors_doc)]
pub fn convert_tree(stylesheet: &str, body: &[DocumentNode], options: &Options) -> Result<Conversion> {
    let selectors = style::resolve(stylesheet);
    let converted = converter::convert_body(body, &selectors, options.reference_width)?;

    Ok(assemble::assemble(
        &converted.accumulator.titles,
        &converted.latex,
        converted.accumulator.bibliography(),
        &options.template_start,
        &options.template_end,
        options.output_base_name(),
    ))
}
