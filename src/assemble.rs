//! Document assembly.
//!
//! Wraps the converted body in the title command, the templates and the
//! bibliography command.

use crate::converter::TitleState;
use crate::result::Conversion;

/// Opens the document body and typesets the title block.
pub const DOCUMENT_OPEN: &str = "\\begin{document}\n\n\\maketitle\n";

/// Title used when the document has neither a title nor a subtitle.
pub const PLACEHOLDER_TITLE: &str = "Document Title";

/// The `\title{}` command for the captured title fields.
///
/// With both fields the title is set large above the subtitle; with one of
/// them that one becomes a bold title.
///
/// # Examples
///
/// ```
/// use gdoc2latex::assemble::title_command;
/// use gdoc2latex::converter::{TitleKind, TitleState};
///
/// let mut titles = TitleState::default();
/// assert_eq!(title_command(&titles), r"\title{\textbf{Document Title}}");
///
/// titles.set(TitleKind::Subtitle, "Notes".into()).unwrap();
/// assert_eq!(title_command(&titles), r"\title{\textbf{Notes}}");
/// ```
#[must_use]
pub fn title_command(titles: &TitleState) -> String {
    match (titles.title(), titles.subtitle()) {
        (Some(title), Some(subtitle)) => {
            format!("\\title{{%\n  \\Huge{{{title}}}\n  \\\\\n  \\Large{{{subtitle}}}\n}}")
        }
        (Some(only), None) | (None, Some(only)) => format!("\\title{{\\textbf{{{only}}}}}"),
        (None, None) => format!("\\title{{\\textbf{{{PLACEHOLDER_TITLE}}}}}"),
    }
}

/// Concatenates the final LaTeX document.
///
/// Layout: title command, template start, document open, body,
/// `\bibliography{<output_base_name>}`, template end. `bibliography` is passed
/// through unchanged as the companion BibTeX text.
#[must_use]
pub fn assemble(
    titles: &TitleState,
    body: &str,
    bibliography: Option<String>,
    template_start: &str,
    template_end: &str,
    output_base_name: &str,
) -> Conversion {
    let title = title_command(titles);

    let mut latex = String::with_capacity(
        title.len() + template_start.len() + body.len() + template_end.len() + 96,
    );
    latex.push_str(&title);
    latex.push('\n');
    latex.push_str(template_start);
    latex.push('\n');
    latex.push_str(DOCUMENT_OPEN);
    latex.push_str(body);
    latex.push_str("\n\n\\bibliography{");
    latex.push_str(output_base_name);
    latex.push_str("}\n\n");
    latex.push_str(template_end);

    Conversion {
        latex,
        bibtex: bibliography,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::TitleKind;

    fn titles(title: Option<&str>, subtitle: Option<&str>) -> TitleState {
        let mut state = TitleState::default();
        if let Some(t) = title {
            state.set(TitleKind::Title, t.to_string()).expect("title");
        }
        if let Some(s) = subtitle {
            state.set(TitleKind::Subtitle, s.to_string()).expect("subtitle");
        }
        state
    }

    #[test]
    fn title_command_covers_all_four_cases() {
        assert_eq!(
            title_command(&titles(Some("Main"), Some("Sub"))),
            "\\title{%\n  \\Huge{Main}\n  \\\\\n  \\Large{Sub}\n}"
        );
        assert_eq!(title_command(&titles(Some("Main"), None)), r"\title{\textbf{Main}}");
        assert_eq!(title_command(&titles(None, Some("Sub"))), r"\title{\textbf{Sub}}");
        assert_eq!(
            title_command(&titles(None, None)),
            r"\title{\textbf{Document Title}}"
        );
    }

    #[test]
    fn assembles_in_fixed_order() {
        let conversion = assemble(
            &titles(Some("T"), None),
            "Body",
            None,
            "START",
            "END",
            "paper",
        );
        assert_eq!(
            conversion.latex,
            "\\title{\\textbf{T}}\nSTART\n\\begin{document}\n\n\\maketitle\nBody\n\n\\bibliography{paper}\n\nEND"
        );
        assert_eq!(conversion.bibtex, None);
    }

    #[test]
    fn bibliography_is_passed_through() {
        let conversion = assemble(
            &TitleState::default(),
            "x",
            Some("@book{a, title={A}}".into()),
            "",
            "",
            "index",
        );
        assert_eq!(conversion.bibtex.as_deref(), Some("@book{a, title={A}}"));
    }
}
