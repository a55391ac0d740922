//! Character encoding handling for fetched portal pages.
//!
//! The portal serves legacy pages in a handful of encodings; this module
//! detects the declared charset and converts fetched bytes to UTF-8 before
//! parsing, replacing invalid characters instead of failing.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Matches a `charset=` declaration inside a meta tag, covering both the
/// `<meta charset="...">` and `Content-Type` forms.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("META_CHARSET regex")
});

/// Detect the declared character encoding of an HTML page.
///
/// Only the first 1024 bytes are examined; pages without a recognizable
/// declaration default to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);
    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Transcode fetched HTML bytes to a UTF-8 string.
///
/// Invalid sequences become the Unicode replacement character rather than
/// an error.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
