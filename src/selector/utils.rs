//! Utility functions for selector pattern matching
//!
//! Indicator lists and the attribute/tag helpers the locator, splicer and
//! inserter share. Theme furniture is recognised by lowercase substrings of
//! `class + " " + id`, the same way on every path.

use dom_query::Selection;

use crate::dom;

// === Indicator Lists ===

/// Theme furniture that content replacement never removes.
pub const PRESERVE_INDICATORS: &[&str] = &[
    "share", "social", "author", "meta", "date", "category",
    "tags", "tag", "navigation", "breadcrumb", "related",
    "comment", "comments", "ads", "advertisement", "banner",
    "widget", "sidebar", "menu", "nav", "footer", "header",
    "signup", "subscribe", "newsletter", "cta",
    "rating", "review", "schema", "structured-data",
];

/// Extra furniture kept inside category listings.
pub const CATEGORY_PRESERVE_INDICATORS: &[&str] = &[
    "pagination", "paging", "page-numbers", "nav-links",
    "pre-title", "term-badges", "term-description",
    "archive-description", "category-description",
];

/// Listing entries removed from category listings.
pub const LISTING_ITEM_INDICATORS: &[&str] = &[
    "listing-item", "post-item", "type-post", "hentry",
    "jeg_post", "td_module", "elementor-post",
];

/// A content container carrying any of these is rejected.
pub const BAD_CONTAINER_INDICATORS: &[&str] =
    &["sidebar", "menu", "footer", "header", "comment", "nav"];

/// Tags that are always theme furniture.
pub const PRESERVE_TAGS: &[&str] = &["aside", "nav", "footer", "header", "form"];

// === String Utilities ===

/// Check whether `haystack` contains any of the indicators.
#[inline]
#[must_use]
pub fn contains_any(haystack: &str, indicators: &[&str]) -> bool {
    indicators.iter().any(|ind| haystack.contains(ind))
}

// === Element Attribute Helpers ===

/// Get any attribute (empty string if missing)
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Check whether the element's lowercase `class id` carries an indicator.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::selector::utils;
/// use rs_pbnkit::dom;
///
/// let doc = dom::parse(r#"<div class="Share-Buttons">x</div>"#);
/// let div = doc.select("div");
///
/// assert!(utils::has_indicator(&div, utils::PRESERVE_INDICATORS));
/// assert!(!utils::has_indicator(&div, utils::LISTING_ITEM_INDICATORS));
/// ```
#[must_use]
pub fn has_indicator(sel: &Selection, indicators: &[&str]) -> bool {
    contains_any(&dom::class_id_lower(sel), indicators)
}

// === Element Type Checks ===

/// Check if element is one of the specified tags
#[inline]
#[must_use]
pub fn is_one_of_tags(sel: &Selection, tags: &[&str]) -> bool {
    let t = tag(sel);
    tags.contains(&t.as_str())
}

/// Theme element that content replacement must leave in place.
#[must_use]
pub fn is_preserve_element(sel: &Selection) -> bool {
    has_indicator(sel, PRESERVE_INDICATORS) || is_one_of_tags(sel, PRESERVE_TAGS)
}

// === Paragraph Statistics ===

/// Number of `<p>` descendants.
#[inline]
#[must_use]
pub fn paragraph_count(sel: &Selection) -> usize {
    dom::count(sel, "p")
}

/// Combined character count of all `<p>` descendants' text.
#[must_use]
pub fn paragraph_text_len(sel: &Selection) -> usize {
    dom::query_all(sel, "p")
        .iter()
        .map(|p| p.text().chars().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any() {
        assert!(contains_any("entry-content share-buttons", &["share"]));
        assert!(!contains_any("entry-content", &["share", "nav"]));
        assert!(!contains_any("anything", &[]));
    }

    #[test]
    fn test_attr_returns_value_or_empty() {
        let doc = dom::parse(r#"<div data-role="article">text</div>"#);
        let div = doc.select("div");

        assert_eq!(attr(&div, "data-role"), "article");
        assert_eq!(attr(&div, "nonexistent"), "");
    }

    #[test]
    fn test_tag_returns_lowercase_tag_name() {
        let doc = dom::parse("<ARTICLE>content</ARTICLE>");
        assert_eq!(tag(&doc.select("article")), "article");
    }

    #[test]
    fn test_preserve_by_id() {
        let doc = dom::parse(r#"<div id="newsletter-box">x</div>"#);
        assert!(is_preserve_element(&doc.select("div")));
    }

    #[test]
    fn test_preserve_by_tag() {
        let doc = dom::parse("<div><aside>x</aside><p>y</p></div>");
        assert!(is_preserve_element(&doc.select("aside")));
        assert!(!is_preserve_element(&doc.select("p")));
    }

    #[test]
    fn test_paragraph_stats() {
        let doc = dom::parse("<div><p>abc</p><section><p>de</p></section></div>");
        let div = doc.select("div");

        assert_eq!(paragraph_count(&div), 2);
        assert_eq!(paragraph_text_len(&div), 5);
    }

    #[test]
    fn test_is_one_of_tags() {
        let doc = dom::parse("<article>content</article>");
        let article = doc.select("article");

        assert!(is_one_of_tags(&article, &["article", "div", "section"]));
        assert!(!is_one_of_tags(&article, &["div", "span", "p"]));
        assert!(!is_one_of_tags(&article, &[]));
    }
}
