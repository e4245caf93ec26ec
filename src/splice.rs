//! Content replacement engine.
//!
//! Swaps the article body (or the post listing) of a rendered WordPress page
//! for new content while leaving the theme around it alone. The `<head>` is
//! never parsed for output: it is cut from the raw text and emitted verbatim.
//!
//! ## Post and page path
//!
//! 1. Take the first top-level `<h1>` of the fragment as the new title.
//! 2. Rewrite the text of the template's own heading, or put the new heading
//!    in front of the new nodes when the template has none.
//! 3. Pick the inner text wrapper of the content container, if there is one.
//! 4. Drop everything in it except theme furniture and headings.
//! 5. Append the new nodes, then demote extra `<h1>`s.
//!
//! ## Category and archive path
//!
//! Listing entries are removed from the listing container, pagination and
//! descriptions stay, and the new content goes into a single
//! `div.category-content-replaced` placed first in the listing.

use std::path::Path;

use dom_query::{Document, Selection};

use crate::classify::{self, PageType};
use crate::document::ParsedPage;
use crate::encoding::{self, force_utf8_charset};
use crate::error::{Error, Result};
use crate::options::{OutputEncoding, SpliceOptions};
use crate::result::StructureReport;
use crate::selector::content::find_content_container;
use crate::selector::heading::{find_category_h1, find_h1};
use crate::selector::listing::find_listing_container;
use crate::selector::utils::{
    has_indicator, is_preserve_element, paragraph_count, CATEGORY_PRESERVE_INDICATORS,
    LISTING_ITEM_INDICATORS, PRESERVE_INDICATORS,
};
use crate::{dom, etree};

/// Class of the wrapper inserted into category listings.
pub const CATEGORY_WRAPPER_CLASS: &str = "category-content-replaced entry-content";

/// Characters of heading text kept in a [`StructureReport`].
const H1_REPORT_CHARS: usize = 100;

/// New content split into its title and the remaining markup.
struct Fragment {
    h1: Option<FragmentHeading>,
    rest_html: String,
}

/// The fragment's title heading, kept whole for insertion.
struct FragmentHeading {
    text: String,
    outer_html: String,
}

impl Fragment {
    /// Parse a bare fragment inside a throwaway `<div>`.
    ///
    /// The first top-level `<h1>` is taken out; when its text is non-empty
    /// it becomes the title, and the element itself, attributes and inline
    /// markup included, is kept for pages whose template has no heading.
    /// Whatever is left, bare text included, is kept as serialized markup
    /// for insertion into the page tree.
    fn parse(fragment_html: &str) -> Self {
        let doc = Document::from(format!("<div>{fragment_html}</div>").as_str());
        let wrapper = doc.select("body > div").first();

        let mut heading = None;
        if let Some(h1) = dom::element_children(&wrapper)
            .into_iter()
            .find(|child| dom::is_tag(child, "h1"))
        {
            let text = dom::text_content(&h1).to_string();
            if !text.is_empty() {
                heading = Some(FragmentHeading {
                    text,
                    outer_html: dom::outer_html(&h1).to_string(),
                });
            }
            dom::remove(&h1);
        }

        Self {
            h1: heading,
            rest_html: dom::inner_html(&wrapper).to_string(),
        }
    }

    fn has_rest(&self) -> bool {
        !self.rest_html.trim().is_empty()
    }
}

/// One-shot content engine over a single parsed page.
///
/// The engine keeps no state between pages: build one per document.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::splice::ContentEngine;
///
/// let html = r#"<!DOCTYPE html><html><head><title>T</title></head>
/// <body class="single-post"><div class="entry-content">
/// <h1 class="entry-title">Old</h1><p>one</p><p>two</p></div></body></html>"#;
///
/// let engine = ContentEngine::new(html)?;
/// let out = engine.replace_content("<h1>New</h1><p>Fresh</p>")?;
///
/// assert!(out.contains("<head><title>T</title></head>"));
/// assert!(out.contains(">New</h1>"));
/// assert!(!out.contains("<p>one</p>"));
/// # Ok::<(), rs_pbnkit::Error>(())
/// ```
pub struct ContentEngine {
    page: ParsedPage,
    page_type: PageType,
    options: SpliceOptions,
}

impl ContentEngine {
    /// Parse a page with default options.
    pub fn new(raw_html: &str) -> Result<Self> {
        Self::with_options(raw_html, SpliceOptions::default())
    }

    /// Parse a page and classify it.
    pub fn with_options(raw_html: &str, options: SpliceOptions) -> Result<Self> {
        let page = ParsedPage::parse(raw_html)?;
        let page_type = classify::classify(&page.body());
        Ok(Self {
            page,
            page_type,
            options,
        })
    }

    /// Detected page type.
    #[must_use]
    pub const fn page_type(&self) -> PageType {
        self.page_type
    }

    /// The parsed page.
    #[must_use]
    pub const fn page(&self) -> &ParsedPage {
        &self.page
    }

    /// Replace the page content, choosing the path by page type.
    ///
    /// Category and archive pages go through the listing path; posts, pages
    /// and unknown pages through the article path.
    pub fn replace_content(self, fragment_html: &str) -> Result<String> {
        if self.page_type.is_listing() {
            log::info!("Replacing listing content ({})", self.page_type);
            self.replace_category_content(fragment_html)
        } else {
            log::info!("Replacing article content ({})", self.page_type);
            self.replace_post_content(fragment_html)
        }
    }

    /// Replace the article body of a post or page.
    pub fn replace_post_content(self, fragment_html: &str) -> Result<String> {
        let body = self.page.body();
        let container = find_content_container(&body)
            .ok_or(Error::ContainerNotFound {
                page_type: self.page_type,
                strategy: "content",
            })?
            .element;

        let fragment = Fragment::parse(fragment_html);

        let mut new_h1 = None;
        if let Some(heading) = &fragment.h1 {
            match find_h1(&body) {
                Some(h1) => replace_h1_text(&h1, &heading.text),
                None => new_h1 = Some(heading.outer_html.as_str()),
            }
        }

        let target = find_wrapper(&container, self.options.wrapper_paragraph_ratio)
            .unwrap_or(container);
        clear_container(&target);

        if let Some(h1_html) = new_h1 {
            dom::append_html(&target, h1_html);
        }
        if fragment.has_rest() {
            dom::append_html(&target, &fragment.rest_html);
        }

        ensure_single_h1(&body);
        Ok(self.page.assemble())
    }

    /// Replace the post listing of a category or archive page.
    pub fn replace_category_content(self, fragment_html: &str) -> Result<String> {
        let body = self.page.body();
        let listing = find_listing_container(&body)
            .ok_or(Error::ContainerNotFound {
                page_type: self.page_type,
                strategy: "listing",
            })?
            .element;

        let fragment = Fragment::parse(fragment_html);

        if let Some(heading) = &fragment.h1 {
            match find_category_h1(&body) {
                Some(h1) => replace_h1_text(&h1, &heading.text),
                None => dom::before_html(&listing, &heading.outer_html),
            }
        }

        clear_listing_container(&listing);

        if let Some(wrapper) = dom::new_element(&listing, "div") {
            dom::set_attribute(&wrapper, "class", CATEGORY_WRAPPER_CLASS);
            etree::prepend(&listing, &wrapper);
            if fragment.has_rest() {
                dom::append_html(&wrapper, &fragment.rest_html);
            }
        }

        ensure_single_h1(&body);
        Ok(self.page.assemble())
    }

    /// Describe what the engine would operate on, without mutating.
    #[must_use]
    pub fn analyze(&self) -> StructureReport {
        let body = self.page.body();
        let listing = self.page_type.is_listing();

        let (container, h1) = if listing {
            (
                find_listing_container(&body).map(|l| l.element),
                find_category_h1(&body),
            )
        } else {
            (
                find_content_container(&body).map(|l| l.element),
                find_h1(&body),
            )
        };

        let articles_count = match (&container, listing) {
            (Some(c), true) => dom::count(c, "article"),
            _ => 0,
        };

        StructureReport {
            page_type: self.page_type,
            container_found: container.is_some(),
            container_selector: container.as_ref().map(selector_label),
            h1_found: h1.is_some(),
            h1_text: h1
                .as_ref()
                .map(|h| dom::text_content(h).chars().take(H1_REPORT_CHARS).collect()),
            head_preserved: self.page.head_raw().is_some(),
            articles_count,
        }
    }
}

/// Replace the page content of a raw document in one call.
pub fn replace_content(raw_html: &str, fragment_html: &str) -> Result<String> {
    ContentEngine::new(raw_html)?.replace_content(fragment_html)
}

/// Analyze a raw document in one call.
pub fn analyze(raw_html: &str) -> Result<StructureReport> {
    Ok(ContentEngine::new(raw_html)?.analyze())
}

/// Splice a fragment into an HTML file in place.
///
/// The file is decoded with its detected encoding and written back either in
/// that encoding or as UTF-8 with rewritten charset declarations, depending
/// on `options.output_encoding`. Returns the detected page type.
pub fn replace_file(path: &Path, fragment_html: &str, options: &SpliceOptions) -> Result<PageType> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let (raw_html, detected) = encoding::transcode_to_utf8(&bytes);

    let engine = ContentEngine::with_options(&raw_html, options.clone())?;
    let page_type = engine.page_type();
    let output = engine.replace_content(fragment_html)?;

    let out_bytes = match options.output_encoding {
        OutputEncoding::Preserve => encoding::encode(&output, detected).into_owned(),
        OutputEncoding::ForceUtf8 => force_utf8_charset(&output).into_bytes(),
    };
    std::fs::write(path, out_bytes).map_err(|e| Error::io(path, e))?;

    log::info!("Replaced content of {} ({page_type})", path.display());
    Ok(page_type)
}

/// Rewrite a heading's text in place, keeping its element and attributes.
///
/// If the heading wraps its text in a `<span>` or `<a>`, the first such
/// descendant receives the text and loses its children; otherwise the
/// heading itself does.
pub fn replace_h1_text(h1: &Selection, new_text: &str) {
    let inner = dom::query_all(h1, "span, a").into_iter().next();
    let target = inner.as_ref().unwrap_or(h1);
    etree::replace_children_with_text(target, new_text);
    log::debug!(
        "Heading replaced with: {}",
        new_text.chars().take(50).collect::<String>()
    );
}

/// Demote every `<h1>` after the first to `<h2>`.
pub fn ensure_single_h1(body: &Selection) {
    for h1 in dom::query_all(body, "h1").iter().skip(1) {
        dom::rename(h1, "h2");
        log::debug!("Extra h1 demoted to h2");
    }
}

/// Child `<div>` of `container` holding at least `ratio` of its paragraphs.
///
/// Only considered when the container has two or more paragraphs; theme
/// furniture never qualifies.
#[must_use]
pub fn find_wrapper<'a>(container: &Selection<'a>, ratio: f64) -> Option<Selection<'a>> {
    let all_p = paragraph_count(container);
    if all_p < 2 {
        return None;
    }
    let needed = all_p as f64 * ratio;

    dom::element_children(container).into_iter().find(|child| {
        dom::is_tag(child, "div")
            && !is_preserve_element(child)
            && paragraph_count(child) as f64 >= needed
    })
}

/// Remove everything from `target` except theme furniture and `<h1>`s.
fn clear_container(target: &Selection) {
    let mut removed = 0;
    for child in dom::element_children(target) {
        if is_preserve_element(&child) || dom::is_tag(&child, "h1") {
            continue;
        }
        dom::remove(&child);
        removed += 1;
    }
    etree::clear_loose_text(target);
    log::debug!("Removed {removed} elements from content container");
}

/// Remove listing entries from a category listing, keeping its furniture.
fn clear_listing_container(listing: &Selection) {
    let mut removed = 0;
    for child in dom::element_children(listing) {
        if dom::is_tag(&child, "article") || has_indicator(&child, LISTING_ITEM_INDICATORS) {
            dom::remove(&child);
            removed += 1;
            continue;
        }
        if has_indicator(&child, CATEGORY_PRESERVE_INDICATORS)
            || has_indicator(&child, PRESERVE_INDICATORS)
        {
            continue;
        }
        if dom::is_tag(&child, "div") && holds_only_articles(&child) {
            dom::remove(&child);
            removed += 1;
        }
    }
    etree::clear_loose_text(listing);
    log::debug!("Removed {removed} elements from category listing");
}

/// Every descendant element is an `<article>`, and there is at least one.
fn holds_only_articles(sel: &Selection) -> bool {
    let descendants = dom::query_all(sel, "*");
    !descendants.is_empty() && descendants.iter().all(|d| dom::is_tag(d, "article"))
}

/// `tag.class1.class2`, or the bare tag when there is no class.
fn selector_label(sel: &Selection) -> String {
    let tag = dom::tag_name(sel).unwrap_or_default();
    let classes: Vec<String> = dom::class_name(sel)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if classes.is_empty() {
        tag
    } else {
        format!("{tag}.{}", classes.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8"/>
    <title>Test Page</title>
</head>
<body class="single-post">
    <header><nav>Menu</nav></header>
    <main>
        <article>
            <div class="entry-content">
                <h1 class="entry-title">Old Title Here</h1>
                <p class="intro">Old paragraph one.</p>
                <p>Old paragraph two.</p>
                <div class="share-buttons">Share</div>
            </div>
        </article>
    </main>
</body>
</html>"#;

    #[test]
    fn fragment_takes_first_top_level_h1() {
        let fragment = Fragment::parse("<h1>Title</h1><p>a</p>tail text<h1>Second</h1>");

        let h1 = fragment.h1.expect("heading");
        assert_eq!(h1.text, "Title");
        assert_eq!(h1.outer_html, "<h1>Title</h1>");
        assert!(fragment.rest_html.contains("tail text"));
        assert!(fragment.rest_html.contains("<h1>Second</h1>"));
        assert!(!fragment.rest_html.contains("Title"));
    }

    #[test]
    fn fragment_without_h1() {
        let fragment = Fragment::parse("just text");
        assert!(fragment.h1.is_none());
        assert_eq!(fragment.rest_html, "just text");
    }

    #[test]
    fn fragment_heading_keeps_markup() {
        let fragment = Fragment::parse(r#"<h1 class="x">A <em>B</em></h1><p>c</p>"#);

        let h1 = fragment.h1.expect("heading");
        assert_eq!(h1.text, "A B");
        assert_eq!(h1.outer_html, r#"<h1 class="x">A <em>B</em></h1>"#);
    }

    #[test]
    fn replace_h1_prefers_inner_span() {
        let doc = dom::parse(r#"<h1 class="t"><span class="s">Old <em>x</em></span> trailing</h1>"#);
        let h1 = doc.select("h1");

        replace_h1_text(&h1, "New");

        assert_eq!(
            h1.html().to_string(),
            r#"<h1 class="t"><span class="s">New</span> trailing</h1>"#
        );
    }

    #[test]
    fn wrapper_needs_seventy_percent() {
        let doc = dom::parse(
            r#"<div id="c"><div id="w"><p>1</p><p>2</p><p>3</p></div><p>4</p></div>"#,
        );
        let container = doc.select("#c");

        let wrapper = find_wrapper(&container, 0.7).expect("wrapper");
        assert_eq!(dom::id(&wrapper).as_deref(), Some("w"));
        assert!(find_wrapper(&container, 0.8).is_none());
    }

    #[test]
    fn post_path_keeps_furniture_and_replaces_body() {
        let out = replace_content(POST, "<h1>New Title</h1><p>P1</p><p>P2</p>").expect("replace");
        let doc = dom::parse(&out);

        assert_eq!(doc.select("h1").text().to_string(), "New Title");
        assert_eq!(doc.select("h1").attr("class").as_deref(), Some("entry-title"));
        assert_eq!(doc.select(".entry-content p").length(), 2);
        assert!(!out.contains("Old paragraph"));
        assert!(doc.select(".share-buttons").exists());
        assert!(doc.select("header nav").exists());
    }

    #[test]
    fn post_without_template_heading_gets_new_one() {
        let html = r#"<html><body><div class="entry-content"><p>a</p><p>b</p></div></body></html>"#;
        let out = replace_content(html, "<h1>Fresh</h1><p>x</p>").expect("replace");
        let doc = dom::parse(&out);

        let h1 = doc.select(".entry-content > h1");
        assert_eq!(h1.text().to_string(), "Fresh");
        assert_eq!(doc.select("h1").length(), 1);
    }

    #[test]
    fn extra_headings_are_demoted() {
        let out = replace_content(POST, "<h1>T</h1><p>a</p><h1>Another</h1>").expect("replace");
        let doc = dom::parse(&out);

        assert_eq!(doc.select("h1").length(), 1);
        assert_eq!(doc.select("h2").text().to_string(), "Another");
    }

    #[test]
    fn missing_container_is_an_error() {
        let err = replace_content("<html><body><span>x</span></body></html>", "<p>x</p>");
        assert!(matches!(
            err,
            Err(Error::ContainerNotFound {
                strategy: "content",
                ..
            })
        ));
    }

    #[test]
    fn listing_without_container_is_an_error() {
        let err = replace_content(
            r#"<html><body class="archive category"><p>x</p></body></html>"#,
            "<p>x</p>",
        );
        assert!(matches!(
            err,
            Err(Error::ContainerNotFound {
                page_type: PageType::Category,
                strategy: "listing",
            })
        ));
    }

    #[test]
    fn only_article_div_is_removed_from_listing() {
        let doc = dom::parse(
            r#"<div id="l"><div id="a"><article></article></div><div id="b"><article><p>x</p></article></div></div>"#,
        );
        clear_listing_container(&doc.select("#l"));

        assert!(!doc.select("#a").exists());
        assert!(doc.select("#b").exists());
    }

    #[test]
    fn analyze_reports_post_structure() {
        let report = analyze(POST).expect("analyze");

        assert_eq!(report.page_type, PageType::Post);
        assert!(report.container_found);
        assert_eq!(report.container_selector.as_deref(), Some("div.entry-content"));
        assert_eq!(report.h1_text.as_deref(), Some("Old Title Here"));
        assert!(report.head_preserved);
        assert_eq!(report.articles_count, 0);
    }
}
