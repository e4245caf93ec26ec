//! Character encoding detection and transcoding.
//!
//! Pages in a site tree come from many generators, so nothing is assumed:
//! a declared `<meta>` charset wins, then a statistical guess, then UTF-8.
//! Decoding and encoding never fail; bad sequences become replacement
//! characters and unmappable characters become numeric references.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::patterns::{META_CHARSET, META_CONTENT_TYPE};

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the encoding declared in a `<meta>` tag, if any.
///
/// Only the first 1024 bytes are examined.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    extract_charset(&head_str)
        .or_else(|| extract_content_type_charset(&head_str))
        .and_then(|charset| Encoding::for_label(charset.as_bytes()))
}

/// Detect character encoding from HTML bytes.
///
/// Order:
/// 1. `<meta charset="...">` / `http-equiv` declaration
/// 2. `chardetng` guess over the whole buffer (valid UTF-8 stays UTF-8)
/// 3. UTF-8
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some(encoding) = declared_encoding(html) {
        return encoding;
    }

    if std::str::from_utf8(html).is_ok() {
        return UTF_8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(html, true);
    let guess = detector.guess(None, true);
    log::debug!("No charset declared, guessed {}", guess.name());
    guess
}

/// Extract charset from `<meta charset="...">` tag.
fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract charset from `<meta http-equiv="Content-Type" content="...; charset=...">` tag.
fn extract_content_type_charset(html: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode bytes with a known encoding, replacing malformed sequences.
#[must_use]
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _encoding_used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::debug!("Malformed {} sequences replaced while decoding", encoding.name());
    }
    decoded.into_owned()
}

/// Detect the encoding and decode in one step.
///
/// # Examples
///
/// ```
/// use rs_pbnkit::encoding::transcode_to_utf8;
///
/// let (text, encoding) = transcode_to_utf8(b"<html><body>Caf\xE9</body></html>");
/// assert!(text.contains("Caf"));
/// assert_ne!(encoding, encoding_rs::UTF_8);
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> (String, &'static Encoding) {
    let encoding = detect_encoding(html);
    (decode(html, encoding), encoding)
}

/// Encode text for writing back in the given encoding.
///
/// Characters the target encoding cannot represent are written as HTML
/// numeric character references.
#[must_use]
pub fn encode<'a>(text: &'a str, encoding: &'static Encoding) -> Cow<'a, [u8]> {
    let (bytes, _encoding_used, _unmappable) = encoding.encode(text);
    bytes
}

/// Rewrite charset declarations to UTF-8.
///
/// Both `<meta charset=..>` and the `http-equiv="Content-Type"` form are
/// rewritten; everything else is left untouched.
#[must_use]
pub fn force_utf8_charset(html: &str) -> String {
    let html = META_CHARSET.replace_all(html, r#"<meta charset="UTF-8">"#);
    META_CONTENT_TYPE
        .replace_all(
            &html,
            r#"<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">"#,
        )
        .into_owned()
}
