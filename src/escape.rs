//! Text escaping.
//!
//! Converts the raw character data of one text leaf into LaTeX. The steps run
//! in a fixed order and are not idempotent: call [`escape`] exactly once per
//! leaf.

use crate::patterns::CODE_FENCE;

/// Escape a raw text leaf for LaTeX.
///
/// 1. HTML entities are decoded and non-breaking spaces become plain spaces.
/// 2. LaTeX special characters are escaped and the supported Unicode symbols
///    are replaced by their inline math form.
/// 3. Triple-backtick fences become `\blocksnippet{lang}` markers, expanded
///    later by [`crate::converter::expand_block_snippets`].
/// 4. Remaining backtick pairs become `\mintinline{text}{|...|}`.
///
/// # Examples
///
/// ```
/// use gdoc2latex::escape::escape;
///
/// assert_eq!(escape("50% &amp; more"), r"50\% \& more");
/// assert_eq!(escape("α"), r"$\alpha$");
/// assert_eq!(escape("run `ls`"), r"run \mintinline{text}{|ls|}");
/// ```
#[must_use]
pub fn escape(raw: &str) -> String {
    let decoded = htmlize::unescape(raw);
    let escaped = escape_characters(&decoded);
    let fenced = CODE_FENCE.replace_all(&escaped, "\\blocksnippet{$1}");
    inline_code(&fenced)
}

/// Escapes reserved characters and substitutes math symbols, one character at
/// a time. No replacement contains a character handled by another arm.
#[must_use]
pub fn escape_characters(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);

    for ch in text.chars() {
        match ch {
            '\u{00A0}' => result.push(' '),
            '\\' => result.push_str("\\textbackslash "),
            '~' => result.push_str("\\textasciitilde "),
            '^' => result.push_str("\\textasciicircum "),
            '&' | '%' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(ch);
            }
            _ => match math_symbol(ch) {
                Some(symbol) => {
                    result.push('$');
                    result.push_str(symbol);
                    result.push('$');
                }
                None => result.push(ch),
            },
        }
    }

    result
}

/// Inline math command for the symbols the exporter leaves as Unicode.
#[must_use]
pub fn math_symbol(ch: char) -> Option<&'static str> {
    let symbol = match ch {
        'α' => "\\alpha",
        'β' => "\\beta",
        'γ' => "\\gamma",
        'δ' => "\\delta",
        'ε' => "\\epsilon",
        'ζ' => "\\zeta",
        'η' => "\\eta",
        'θ' => "\\theta",
        'ι' => "\\iota",
        'κ' => "\\kappa",
        'λ' => "\\lambda",
        'μ' => "\\mu",
        'ν' => "\\nu",
        'ξ' => "\\xi",
        'ο' => "o",
        'π' => "\\pi",
        'ρ' => "\\rho",
        'σ' => "\\sigma",
        'ς' => "\\varsigma",
        'τ' => "\\tau",
        'υ' => "\\upsilon",
        'φ' => "\\phi",
        'χ' => "\\chi",
        'ψ' => "\\psi",
        'ω' => "\\omega",
        '⌊' => "\\lfloor",
        '⌋' => "\\rfloor",
        '⌈' => "\\lceil",
        '⌉' => "\\rceil",
        '∀' => "\\forall",
        '∃' => "\\exists",
        '∞' => "\\infty",
        '∅' => "\\varnothing",
        '∩' => "\\cap",
        '∪' => "\\cup",
        '⊂' => "\\subset",
        '⊆' => "\\subseteq",
        '⊃' => "\\supset",
        '⊇' => "\\supseteq",
        '⊥' => "\\bot",
        '⊤' => "\\top",
        _ => return None,
    };
    Some(symbol)
}

/// Every odd backtick-delimited segment becomes inline code.
fn inline_code(text: &str) -> String {
    if !text.contains('`') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + 32);
    for (i, segment) in text.split('`').enumerate() {
        if i % 2 == 0 {
            result.push_str(segment);
        } else {
            result.push_str("\\mintinline{text}{|");
            result.push_str(segment);
            result.push_str("|}");
        }
    }
    result
}
