//! Page type detection.
//!
//! WordPress writes the template it rendered into `<body class>`, which is
//! the most reliable signal. Exported or cached pages sometimes lose those
//! classes, so a few structural probes follow.

use std::fmt;

use dom_query::Selection;
use serde::Serialize;

use crate::dom;
use crate::selector::utils::contains_any;

/// Classification result for one parsed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageType {
    /// Single blog post.
    Post,
    /// Static page.
    Page,
    /// Category archive.
    Category,
    /// Any other archive (tag, author, date, search, post type).
    Archive,
    /// Nothing matched. Processed like a post.
    Unknown,
}

impl PageType {
    /// Category and archive pages are spliced through the listing path.
    #[must_use]
    pub const fn is_listing(self) -> bool {
        matches!(self, Self::Category | Self::Archive)
    }

    /// Upper-case name, as printed in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Page => "PAGE",
            Self::Category => "CATEGORY",
            Self::Archive => "ARCHIVE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ARCHIVE_BODY_INDICATORS: &[&str] = &[
    "category", "archive", "tag", "tax-", "taxonomy-",
    "author", "date", "search-results", "post-type-archive",
];

const POST_BODY_INDICATORS: &[&str] = &["single-post", "single-format", "postid-"];

// "page " keeps the trailing space so "page-numbers" and friends do not match.
const PAGE_BODY_INDICATORS: &[&str] = &["page-template", "page-id-", "page "];

const ARCHIVE_STRUCTURE: &str = "section[class*='archive-title'], \
    section[class*='category-title'], \
    div[class*='archive-title'], \
    h1[class*='page-heading'], \
    div[class*='listing-grid'], \
    div[class*='jeg_posts']";

const LISTING_ARTICLES: &str = "article[class*='listing-item'], article[class*='type-post']";

const POST_BODY_DIVS: &str = "div[class*='entry-content'], div[class*='post-content']";

/// Classify a page from its `<body>` element.
///
/// Pure: the tree is only read, so repeated calls agree.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::{classify, dom, PageType};
///
/// let doc = dom::parse(r#"<html><body class="archive category category-health"></body></html>"#);
/// assert_eq!(classify::classify(&doc.select("body")), PageType::Category);
/// ```
#[must_use]
pub fn classify(body: &Selection) -> PageType {
    let page_type = classify_inner(body);
    log::debug!("Detected page type {page_type}");
    page_type
}

fn classify_inner(body: &Selection) -> PageType {
    if !body.exists() {
        return PageType::Unknown;
    }

    let body_classes = dom::class_name(body).unwrap_or_default().to_lowercase();

    if contains_any(&body_classes, ARCHIVE_BODY_INDICATORS) {
        return if body_classes.contains("category") {
            PageType::Category
        } else {
            PageType::Archive
        };
    }
    if contains_any(&body_classes, POST_BODY_INDICATORS) {
        return PageType::Post;
    }
    if contains_any(&body_classes, PAGE_BODY_INDICATORS) {
        return PageType::Page;
    }

    if body.select(ARCHIVE_STRUCTURE).exists() {
        return PageType::Category;
    }
    if dom::count(body, LISTING_ARTICLES) >= 2 {
        return PageType::Category;
    }
    let has_post_article = dom::query_all(body, "article")
        .iter()
        .any(|article| article.select(POST_BODY_DIVS).exists());
    if has_post_article {
        return PageType::Post;
    }

    log::warn!("Could not determine page type, processing as a post");
    PageType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_html(html: &str) -> PageType {
        let doc = dom::parse(html);
        classify(&doc.select("body"))
    }

    #[test]
    fn body_class_category() {
        assert_eq!(
            classify_html(r#"<body class="archive category category-health"></body>"#),
            PageType::Category
        );
    }

    #[test]
    fn body_class_archive_without_category() {
        assert_eq!(
            classify_html(r#"<body class="archive tag tag-pills"></body>"#),
            PageType::Archive
        );
    }

    #[test]
    fn body_class_post() {
        assert_eq!(
            classify_html(r#"<body class="post-template-default single-post postid-12"></body>"#),
            PageType::Post
        );
    }

    #[test]
    fn body_class_page_needs_trailing_space() {
        assert_eq!(
            classify_html(r#"<body class="page page-id-4"></body>"#),
            PageType::Page
        );
        assert_eq!(classify_html(r#"<body class="page"></body>"#), PageType::Unknown);
    }

    #[test]
    fn structure_archive_header() {
        assert_eq!(
            classify_html(r#"<body><div class="jeg_posts"></div></body>"#),
            PageType::Category
        );
    }

    #[test]
    fn structure_listing_articles() {
        assert_eq!(
            classify_html(
                r#"<body><article class="type-post">a</article><article class="type-post">b</article></body>"#
            ),
            PageType::Category
        );
    }

    #[test]
    fn structure_single_article() {
        assert_eq!(
            classify_html(r#"<body><article><div class="entry-content"><p>x</p></div></article></body>"#),
            PageType::Post
        );
    }

    #[test]
    fn unknown_and_idempotent() {
        let doc = dom::parse("<body><div>plain</div></body>");
        let body = doc.select("body");
        assert_eq!(classify(&body), PageType::Unknown);
        assert_eq!(classify(&body), classify(&body));
    }

    #[test]
    fn listing_types() {
        assert!(PageType::Category.is_listing());
        assert!(PageType::Archive.is_listing());
        assert!(!PageType::Unknown.is_listing());
        assert_eq!(PageType::Post.to_string(), "POST");
    }
}
