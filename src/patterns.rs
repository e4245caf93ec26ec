//! Compiled regex patterns for raw-document surgery.
//!
//! The `<head>` span, the DOCTYPE and the head metadata are handled as text,
//! never through the parsed tree, so these patterns are what keeps them
//! byte-identical. All patterns are compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Document Envelope
// =============================================================================

/// Leading DOCTYPE declaration. Anchored at the very start of the input.
pub static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A<!DOCTYPE[^>]*>").expect("DOCTYPE regex"));

/// Raw `<head ...>...</head>` span, shortest match.
pub static HEAD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head(?:\s[^>]*)?>.*?</head>").expect("HEAD_SPAN regex"));

/// Opening `<head ...>` tag.
pub static HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("HEAD_OPEN regex"));

/// Any carriage-return line ending.
pub static LINE_ENDINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?").expect("LINE_ENDINGS regex"));

// =============================================================================
// Head Metadata
// =============================================================================

/// `<title>` element with its content in group 2.
pub static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<title[^>]*>)(.*?)(</title>)").expect("TITLE regex")
});

/// `<meta charset=...>` declaration.
pub static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+charset=["']?[^"'>\s]+["']?\s*/?>"#).expect("META_CHARSET regex")
});

/// `<meta http-equiv="Content-Type" content="...">` declaration.
pub static META_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+http-equiv=["']?Content-Type["']?\s+content=["']?[^"']+["']?\s*/?>"#)
        .expect("META_CONTENT_TYPE regex")
});

/// First JSON-LD script block; groups: open tag, body, close tag.
pub static JSON_LD_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(<script[^>]*type=["']application/ld\+json["'][^>]*>)(.*?)(</script>)"#)
        .expect("JSON_LD_SCRIPT regex")
});

// =============================================================================
// Text
// =============================================================================

/// Normalize `\r\n` and lone `\r` to `\n`.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    LINE_ENDINGS.replace_all(text, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctype_only_matches_at_start() {
        assert!(DOCTYPE.is_match("<!doctype html><html></html>"));
        assert!(!DOCTYPE.is_match("\n<!DOCTYPE html>"));
    }

    #[test]
    fn head_span_is_shortest_and_multiline() {
        let html = "<HEAD lang=\"en\">\n<title>x</title>\n</HEAD><body><head></head></body>";
        let m = HEAD_SPAN.find(html).map(|m| m.as_str());
        assert_eq!(m, Some("<HEAD lang=\"en\">\n<title>x</title>\n</HEAD>"));
    }

    #[test]
    fn line_endings_normalized() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
