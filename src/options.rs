//! Configuration options for conversion.
//!
//! The `Options` struct carries the LaTeX templates wrapped around the body
//! and the few knobs that change how the body itself is rendered.

/// Bundled preamble, placed between the title command and the body.
pub const DEFAULT_TEMPLATE_START: &str = include_str!("../templates/start.tex");

/// Bundled closing template, placed after the bibliography command.
pub const DEFAULT_TEMPLATE_END: &str = include_str!("../templates/end.tex");

/// Default output file name; its base name names the bibliography.
pub const DEFAULT_OUTPUT_FILE: &str = "index.tex";

/// Page width in CSS pixels of a Google Docs export at 100% zoom.
pub const DEFAULT_REFERENCE_WIDTH: f64 = 600.0;

/// Configuration options for conversion.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the bundled templates.
///
/// # Example
///
/// ```rust
/// use gdoc2latex::Options;
///
/// // Use defaults
/// let options = Options::default();
/// assert_eq!(options.output_base_name(), "index");
///
/// // Customize specific fields
/// let options = Options {
///     output_file: "paper.tex".to_string(),
///     template_end: "\\end{document}\n".to_string(),
///     ..Options::default()
/// };
/// assert_eq!(options.output_base_name(), "paper");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// LaTeX placed after the title command and before the body.
    ///
    /// Default: the bundled `templates/start.tex`
    pub template_start: String,

    /// LaTeX placed after the bibliography command.
    ///
    /// Default: the bundled `templates/end.tex`
    pub template_end: String,

    /// Name of the `.tex` file the output is written to.
    ///
    /// Only the base name is used, as the argument of `\bibliography{}`, so
    /// the `.bib` file written next to it is found by `bibtex`.
    ///
    /// Default: `"index.tex"`
    pub output_file: String,

    /// Width in CSS pixels that corresponds to `\linewidth`.
    ///
    /// Image widths are divided by this value and clamped to 1.
    ///
    /// Default: `600.0`
    pub reference_width: f64,
}

impl Options {
    /// File name of [`Options::output_file`] without directories and without
    /// its `.tex` extension.
    #[must_use]
    pub fn output_base_name(&self) -> &str {
        let file_name = self
            .output_file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.output_file);
        file_name.strip_suffix(".tex").unwrap_or(file_name)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            template_start: DEFAULT_TEMPLATE_START.to_string(),
            template_end: DEFAULT_TEMPLATE_END.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            reference_width: DEFAULT_REFERENCE_WIDTH,
        }
    }
}
