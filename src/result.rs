//! Conversion output.

use serde::{Deserialize, Serialize};

/// The LaTeX document and its companion BibTeX database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Complete LaTeX source: title, preamble, body, bibliography command
    /// and closing template.
    pub latex: String,

    /// Bibliography entries separated by blank lines.
    ///
    /// `None` when the document carried no BibTeX footnotes; callers then
    /// write no `.bib` file at all.
    pub bibtex: Option<String>,
}
