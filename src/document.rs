//! Raw document envelope and parsed body.
//!
//! A page is kept in two forms at once: the original text, from which the
//! DOCTYPE and the `<head>` span are cut verbatim, and a lenient parse of the
//! whole document whose `<body>` is the only part ever mutated and
//! serialized back.

use dom_query::{Document, Selection};

use crate::error::{Error, Result};
use crate::patterns::{normalize_line_endings, DOCTYPE, HEAD_SPAN};

/// DOCTYPE emitted when the input has none.
pub const DEFAULT_DOCTYPE: &str = "<!DOCTYPE html>";

/// Head emitted by the content engine when the input has none.
pub const EMPTY_HEAD: &str = "<head></head>";

/// One parsed page: verbatim envelope plus mutable body tree.
pub struct ParsedPage {
    doctype: String,
    head_raw: Option<String>,
    document: Document,
}

impl ParsedPage {
    /// Parse a full HTML document.
    ///
    /// Malformed markup is tolerated; the only failure is input that yields
    /// no `<body>` at all after parsing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_pbnkit::document::ParsedPage;
    ///
    /// let page = ParsedPage::parse("<!doctype html><html><head><title>T</title></head><body><p>x</p></body></html>")?;
    /// assert_eq!(page.doctype(), "<!doctype html>");
    /// assert_eq!(page.head_raw(), Some("<head><title>T</title></head>"));
    /// # Ok::<(), rs_pbnkit::Error>(())
    /// ```
    pub fn parse(raw_html: &str) -> Result<Self> {
        let doctype = extract_doctype(raw_html);
        let head_raw = extract_head(raw_html).map(str::to_string);
        let document = Document::from(raw_html);

        if !document.select("body").exists() {
            return Err(Error::ParseError("document has no body".to_string()));
        }

        Ok(Self {
            doctype,
            head_raw,
            document,
        })
    }

    /// The DOCTYPE declaration as written, or the HTML5 default.
    #[must_use]
    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    /// The original `<head>...</head>` span, byte for byte.
    #[must_use]
    pub fn head_raw(&self) -> Option<&str> {
        self.head_raw.as_deref()
    }

    /// The parsed document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body(&self) -> Selection<'_> {
        self.document.select("body")
    }

    /// Serialized `<body>` element, including its own tag.
    #[must_use]
    pub fn body_html(&self) -> String {
        self.body().html().to_string()
    }

    /// Reassemble `{doctype}\n<html>\n{head}\n{body}\n</html>`.
    ///
    /// The head is the verbatim span from the input (or [`EMPTY_HEAD`]).
    /// Line endings are normalized to `\n`.
    #[must_use]
    pub fn assemble(&self) -> String {
        let head = self.head_raw.as_deref().unwrap_or(EMPTY_HEAD);
        assemble(&self.doctype, head, &self.body_html())
    }
}

/// Build a full document from its parts, normalizing line endings.
#[must_use]
pub fn assemble(doctype: &str, head: &str, body: &str) -> String {
    normalize_line_endings(&format!("{doctype}\n<html>\n{head}\n{body}\n</html>"))
}

/// DOCTYPE at the start of the input, or [`DEFAULT_DOCTYPE`].
#[must_use]
pub fn extract_doctype(raw_html: &str) -> String {
    DOCTYPE
        .find(raw_html)
        .map_or_else(|| DEFAULT_DOCTYPE.to_string(), |m| m.as_str().to_string())
}

/// First `<head ...>...</head>` span of the raw text.
#[must_use]
pub fn extract_head(raw_html: &str) -> Option<&str> {
    HEAD_SPAN.find(raw_html).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<!DOCTYPE html>\r\n<html>\r\n<head>\r\n  <meta name=\"description\" content=\"d\"/>\r\n  <link rel=\"stylesheet\" href=\"/s.css\"/>\r\n</head>\r\n<body class=\"single-post\"><p>x</p></body></html>";

    #[test]
    fn head_is_kept_verbatim() {
        let page = ParsedPage::parse(PAGE).expect("parse");
        let head = page.head_raw().expect("head");

        assert!(head.starts_with("<head>\r\n  <meta name=\"description\" content=\"d\"/>"));
        assert!(head.ends_with("</head>"));
    }

    #[test]
    fn missing_doctype_defaults() {
        let page = ParsedPage::parse("<html><body><p>x</p></body></html>").expect("parse");
        assert_eq!(page.doctype(), DEFAULT_DOCTYPE);
        assert_eq!(page.head_raw(), None);
    }

    #[test]
    fn assemble_uses_empty_head_stub_and_normalizes() {
        let page = ParsedPage::parse("<p>a\r\nb</p>").expect("parse");
        let out = page.assemble();

        assert!(out.starts_with("<!DOCTYPE html>\n<html>\n<head></head>\n<body>"));
        assert!(out.ends_with("</body>\n</html>"));
        assert!(!out.contains('\r'));
    }

    #[test]
    fn malformed_markup_is_tolerated() {
        let page = ParsedPage::parse("<div><p>unclosed <b>bold<div>more").expect("parse");
        assert!(page.body().text().contains("more"));
    }
}
