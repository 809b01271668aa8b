//! Error types for gdoc2latex.
//!
//! Every error is fatal: a conversion either produces its full output or
//! nothing at all.

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An element the transducers do not know how to render.
    #[error("Unsupported tag {tag}{}", format_content(.content))]
    UnsupportedMarkup {
        /// Offending tag name.
        tag: String,
        /// Rendered children, when they were available at the point of failure.
        content: Option<String>,
    },

    /// An element lacks an attribute it cannot be rendered without.
    #[error("{tag} without {attribute} attribute")]
    MissingAttribute {
        /// Tag name of the element.
        tag: String,
        /// Name of the missing attribute.
        attribute: &'static str,
    },

    /// The title or the subtitle was defined twice. The message is the same
    /// for both fields.
    #[error("Duplicate titles defined: {existing} {new}")]
    DuplicateTitle {
        /// Which field was set twice.
        kind: crate::converter::TitleKind,
        /// Value recorded first.
        existing: String,
        /// Value of the rejected second definition.
        new: String,
    },

    /// A selector that is neither class- nor tag-shaped.
    #[error("Unsupported selector {0}")]
    UnsupportedSelector(String),

    /// The walk produced no body text.
    #[error("Missing latex: the document body rendered to nothing")]
    EmptyDocument,

    /// The input is not shaped like a web-page export.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A filesystem policy check failed (wrong extension, refusing to overwrite, ...).
    #[error("{0}")]
    InvalidPath(String),

    /// Reading or writing files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_content(content: &Option<String>) -> String {
    match content {
        Some(content) => format!(" with content:\n\t{content}"),
        None => String::new(),
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
