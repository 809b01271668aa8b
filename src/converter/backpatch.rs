//! Footnote backpatching.
//!
//! References are rendered as `\cite{key}` during the walk because the
//! footnote body usually appears later in the document. Once the walk is done
//! every reference whose key has a payload becomes `\footnote{payload}`.
//! References without a payload stay citations and resolve against the
//! bibliography.

use super::FootnoteTable;

/// Replaces every `\cite{key}` that has a footnote payload.
#[must_use]
pub fn backpatch(body: &str, footnotes: &FootnoteTable) -> String {
    let mut result = body.to_string();

    for (key, payload) in footnotes.iter() {
        let reference = format!("\\cite{{{key}}}");
        if !result.contains(&reference) {
            tracing::debug!(key, "footnote payload without a reference");
            continue;
        }
        result = result.replace(&reference, &format!("\\footnote{{{payload}}}"));
    }

    result
}
