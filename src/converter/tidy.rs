//! Whole-document post passes.
//!
//! Both passes work on the finished body text. They run after backpatching,
//! so only citations that resolve against the bibliography are left for
//! [`tidy_citations`] to see.

use regex::Captures;

use crate::patterns::{
    BLOCK_SNIPPET_MARKER, CITATION, CITATION_RUN, PARENTHESIZED_CITATION, SNIPPET_LANGUAGE,
    SPACED_CITATION,
};

/// Merges, parenthesizes and ties citations.
///
/// 1. Adjacent `\cite{a}\cite{b}` become `\cite{a,b}`.
/// 2. `(\cite{a})` becomes `\citep{a}`.
/// 3. A space before `\cite` or `\citep` becomes `~`.
///
/// # Examples
///
/// ```
/// use gdoc2latex::converter::tidy_citations;
///
/// assert_eq!(
///     tidy_citations(r"as shown (\cite{a}\cite{b})"),
///     r"as shown~\citep{a,b}"
/// );
/// ```
#[must_use]
pub fn tidy_citations(body: &str) -> String {
    let merged = CITATION_RUN.replace_all(body, |caps: &Captures<'_>| {
        let keys: Vec<&str> = CITATION
            .captures_iter(&caps[0])
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        format!("\\cite{{{}}}", keys.join(","))
    });
    let parenthesized = PARENTHESIZED_CITATION.replace_all(&merged, "\\citep{${1}}");
    SPACED_CITATION.replace_all(&parenthesized, "~${1}").into_owned()
}

/// Expands `\blocksnippet{lang}` markers into `minted` environments.
///
/// The text between two markers is the snippet body. `math` snippets use the
/// `text` lexer with escape-inside and math-escape options so formulas
/// typeset inside them; an unnamed language also falls back to `text`. An unterminated snippet still gets
/// its opening line so the mismatch is visible in the LaTeX log.
#[must_use]
pub fn expand_block_snippets(body: &str) -> String {
    if !body.contains(BLOCK_SNIPPET_MARKER) {
        return body.to_string();
    }

    let mut result = String::with_capacity(body.len() + 128);
    for (i, segment) in body.split(BLOCK_SNIPPET_MARKER).enumerate() {
        let (language, rest) = split_language(segment);

        if i % 2 == 0 {
            if i == 0 {
                result.push_str(segment);
            } else {
                // A language tag on the closing fence is dropped.
                result.push_str("\\end{minted}");
                result.push_str(rest);
            }
            continue;
        }

        result.push_str("\\begin{minted}[breaklines");
        if language == "math" {
            result.push_str(",escapeinside=||,mathescape=true");
        }
        result.push_str("]{");
        result.push_str(match language {
            "" | "math" => "text",
            lexer => lexer,
        });
        result.push('}');
        result.push_str(rest);
    }

    result
}

/// Splits `lang}rest` at the marker's closing brace.
fn split_language(segment: &str) -> (&str, &str) {
    let language = SNIPPET_LANGUAGE.find(segment).map_or("", |m| m.as_str());
    let tail = &segment[language.len()..];
    (language, tail.strip_prefix('}').unwrap_or(tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_adjacent_citations() {
        assert_eq!(
            tidy_citations(r"x\cite{a}\cite{b}\cite{c}."),
            r"x\cite{a,b,c}."
        );
    }

    #[test]
    fn separated_citations_are_not_merged() {
        assert_eq!(
            tidy_citations(r"x\cite{a}, y\cite{b}"),
            r"x\cite{a}, y\cite{b}"
        );
    }

    #[test]
    fn parenthesized_citation_becomes_citep() {
        assert_eq!(tidy_citations(r"word(\cite{a})"), r"word\citep{a}");
    }

    #[test]
    fn space_before_citation_becomes_tie() {
        assert_eq!(tidy_citations(r"word \cite{a}"), r"word~\cite{a}");
        assert_eq!(tidy_citations(r"word (\cite{a})"), r"word~\citep{a}");
    }

    #[test]
    fn tidy_is_idempotent() {
        let input = r"a \cite{x}\cite{y} b (\cite{z}) c\cite{w}";
        let once = tidy_citations(input);
        assert_eq!(tidy_citations(&once), once);
    }

    #[test]
    fn footnotes_are_untouched() {
        assert_eq!(tidy_citations(r"a \footnote{b}"), r"a \footnote{b}");
    }

    #[test]
    fn expands_named_snippet() {
        let body = "\\blocksnippet{python}\nprint(1)\n\\blocksnippet{}";
        assert_eq!(
            expand_block_snippets(body),
            "\\begin{minted}[breaklines]{python}\nprint(1)\n\\end{minted}"
        );
    }

    #[test]
    fn unnamed_snippet_defaults_to_text() {
        let body = "a\\blocksnippet{}x\\blocksnippet{}b";
        assert_eq!(
            expand_block_snippets(body),
            "a\\begin{minted}[breaklines]{text}x\\end{minted}b"
        );
    }

    #[test]
    fn math_snippet_enables_escapes() {
        let body = "\\blocksnippet{math}|$x$|\\blocksnippet{}";
        assert_eq!(
            expand_block_snippets(body),
            "\\begin{minted}[breaklines,escapeinside=||,mathescape=true]{text}|$x$|\\end{minted}"
        );
    }

    #[test]
    fn closing_fence_language_is_dropped() {
        let body = "\\blocksnippet{rust}fn f() {}\\blocksnippet{rust} after";
        assert_eq!(
            expand_block_snippets(body),
            "\\begin{minted}[breaklines]{rust}fn f() {}\\end{minted} after"
        );
    }

    #[test]
    fn body_without_markers_is_unchanged() {
        assert_eq!(expand_block_snippets("plain"), "plain");
    }
}
