//! Character encoding detection and transcoding.
//!
//! Google serves its web-page export as UTF-8 and says so in a
//! `<meta content="text/html; charset=UTF-8" http-equiv="content-type">`
//! tag. Files re-saved by other tools may carry a different declaration or a
//! byte order mark, so raw bytes are decoded before parsing.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `charset=` inside any `<meta>` tag, in either attribute order.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("META_CHARSET regex")
});

/// Declarations must appear within the first kilobyte.
const SNIFF_LIMIT: usize = 1024;

/// Detects the encoding of an HTML byte stream.
///
/// A byte order mark wins, then the first `<meta>` charset declaration in the
/// first kilobyte. Unknown or missing labels fall back to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn declared_charset(head: &str) -> Option<&str> {
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Decodes HTML bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD; a leading BOM is stripped.
///
/// # Examples
///
/// ```
/// use gdoc2latex::encoding::transcode_to_utf8;
///
/// let html = b"<html><body><p>Caf\xE9</p></body></html>";
/// assert!(transcode_to_utf8(html).contains("Caf\u{FFFD}"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);

    if had_errors {
        tracing::warn!(encoding = used.name(), "input contained malformed byte sequences");
    }

    decoded.into_owned()
}
