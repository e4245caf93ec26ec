//! Heading selector rules
//!
//! Where the page's main `<h1>` lives for posts and for archive pages.
//! Both tables end in a bare `h1`, so any page with a heading finds one.

use dom_query::Selection;

use crate::selector::{first_accepted, Probe};

/// Post/page title probes in priority order.
pub static HEADER_PROBES: &[Probe] = &[
    // Elementor theme builder
    Probe::css("div[class*='elementor-widget-theme-post-title'] h1", "elementor"),
    Probe::css("div[class*='elementor-widget-page-title'] h1", "elementor"),
    Probe::css("[data-widget_type='theme-post-title.default'] h1", "elementor"),
    // Theme title areas
    Probe::css("section[class*='page-title'] h1", "theme"),
    Probe::css("div[class*='page-header'] h1", "theme"),
    Probe::css("header[class*='entry-header'] h1", "theme"),
    Probe::css("div[class*='entry-header'] h1", "theme"),
    Probe::css("div[class*='post-header'] h1", "theme"),
    // Elementor heading widget
    Probe::css("h1[class*='elementor-heading-title']", "elementor"),
    Probe::css("div[class*='elementor-widget-heading'] h1", "elementor"),
    // WordPress
    Probe::css("h1[class*='entry-title']", "wordpress"),
    Probe::css("h1[class*='post-title']", "wordpress"),
    Probe::css("h1[class*='page-title']", "wordpress"),
    Probe::css("h1[id='post_title']", "wordpress"),
    Probe::css("h1", "generic"),
];

/// Archive/category title probes in priority order.
pub static CATEGORY_HEADER_PROBES: &[Probe] = &[
    // Publisher
    Probe::css("section[class*='archive-title'] h1", "publisher"),
    Probe::css("section[class*='category-title'] h1", "publisher"),
    Probe::css("div[class*='archive-title'] h1", "publisher"),
    Probe::css("div[class*='category-title'] h1", "publisher"),
    // Heading classes
    Probe::css("h1[class*='page-heading']", "theme"),
    Probe::css("h1[class*='page-title']", "theme"),
    Probe::css("h1[class*='archive-title']", "theme"),
    Probe::css("h1[class*='category-title']", "theme"),
    Probe::css("h1[class*='term-title']", "theme"),
    // JNews
    Probe::css("div[class*='jeg_cat_header'] h1", "jnews"),
    Probe::css("div[class*='jeg_archive_header'] h1", "jnews"),
    // Archive headers
    Probe::css("header[class*='page-header'] h1", "wordpress"),
    Probe::css("header[class*='archive-header'] h1", "wordpress"),
    Probe::css("div[class*='page-header'] h1", "wordpress"),
    // Elementor
    Probe::css("div[class*='elementor-widget-archive-title'] h1", "elementor"),
    Probe::css("h1[class*='elementor-heading-title']", "elementor"),
    Probe::css("h1", "generic"),
];

/// Main heading of a post or page.
#[must_use]
pub fn find_h1<'a>(root: &Selection<'a>) -> Option<Selection<'a>> {
    first_accepted(root, HEADER_PROBES, |_| true).map(|located| located.element)
}

/// Main heading of a category or archive page.
///
/// Falls back to [`find_h1`] when no archive-specific heading exists.
#[must_use]
pub fn find_category_h1<'a>(root: &Selection<'a>) -> Option<Selection<'a>> {
    first_accepted(root, CATEGORY_HEADER_PROBES, |_| true)
        .map(|located| located.element)
        .or_else(|| find_h1(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn entry_header_beats_earlier_bare_h1() {
        let doc = dom::parse(
            r#"<h1 id="logo">Site</h1><header class="entry-header"><h1 id="title">Post</h1></header>"#,
        );
        let h1 = find_h1(&doc.select("body")).expect("h1");
        assert_eq!(dom::id(&h1).as_deref(), Some("title"));
    }

    #[test]
    fn category_heading_prefers_archive_title() {
        let doc = dom::parse(
            r#"<h1 id="logo">Site</h1><div class="archive-title"><h1 id="cat">Health</h1></div>"#,
        );
        let h1 = find_category_h1(&doc.select("body")).expect("h1");
        assert_eq!(dom::id(&h1).as_deref(), Some("cat"));
    }

    #[test]
    fn no_heading() {
        let doc = dom::parse("<h2>only h2</h2>");
        assert!(find_h1(&doc.select("body")).is_none());
        assert!(find_category_h1(&doc.select("body")).is_none());
    }
}
