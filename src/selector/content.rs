//! Content selector rules
//!
//! These probes identify the article body container on single posts and
//! pages. Page builders come first because their wrappers sit inside the
//! generic theme markup, then theme-specific wrappers, WooCommerce, the
//! standard WordPress classes, schema.org `itemprop`, and finally generic
//! HTML5 fallbacks.

use dom_query::Selection;

use crate::dom;
use crate::selector::utils::{
    has_indicator, paragraph_count, paragraph_text_len, BAD_CONTAINER_INDICATORS,
    PRESERVE_INDICATORS,
};
use crate::selector::{first_accepted, Located, Probe};

/// Content container probes in priority order.
///
/// First valid match wins. Only the first element matched by a probe is
/// validated; if it fails, the next probe is tried.
pub static CONTENT_PROBES: &[Probe] = &[
    // Elementor
    Probe::css(
        "div[class*='elementor-widget-theme-post-content'] div[class*='elementor-widget-container']",
        "elementor",
    ),
    Probe::css(
        "div[class*='elementor-widget-text-editor'] div[class*='elementor-widget-container']",
        "elementor",
    ),
    Probe::css("div[class*='elementor-text-editor']", "elementor"),
    // Divi
    Probe::css("div[class*='et_pb_post_content']", "divi"),
    Probe::css("div[class*='et_pb_text_inner']", "divi"),
    Probe::css("div[class*='et_pb_module_inner']", "divi"),
    // WPBakery
    Probe::css("div[class*='wpb_text_column'] div[class*='wpb_wrapper']", "wpbakery"),
    Probe::css("div[class*='wpb_content_element'] div[class*='wpb_wrapper']", "wpbakery"),
    // Beaver Builder
    Probe::css("div[class*='fl-post-content']", "beaver"),
    Probe::css("div[class*='fl-module-content']", "beaver"),
    Probe::css("div[class*='fl-rich-text']", "beaver"),
    // Bricks
    Probe::css("div[class*='brxe-post-content']", "bricks"),
    Probe::css("div[class*='brxe-text-basic']", "bricks"),
    Probe::css("div[class*='brxe-text']", "bricks"),
    // Oxygen
    Probe::css("div[class*='ct-text-block']", "oxygen"),
    Probe::css("div[class*='oxy-post-content']", "oxygen"),
    Probe::css("div[class*='ct-content-block']", "oxygen"),
    // Gutenberg
    Probe::css("div[class*='wp-block-post-content']", "gutenberg"),
    // Thrive Architect
    Probe::css("div[class*='thrv_text_element']", "thrive"),
    Probe::css("div[class*='tve_shortcode_rendered']", "thrive"),
    // Brizy
    Probe::css("div[class*='brz-rich-text']", "brizy"),
    Probe::css("div[class*='brz-text']", "brizy"),
    // SeedProd
    Probe::css("div[class*='seedprod-text']", "seedprod"),
    // Themes
    Probe::css("div[class*='single-content']", "theme"),
    Probe::css("div[class*='w-post-elm'][class*='post_content']", "impreza"),
    Probe::css("div[class*='uk-margin-medium-top'][property='text']", "yootheme"),
    Probe::css("div[property='text']", "yootheme"),
    Probe::css("div[class*='l-section-h'] div[class*='w-post-elm']", "impreza"),
    Probe::css("div[class*='ast-post-content']", "astra"),
    Probe::css("div[class*='ast-article-post'] div[class*='entry-content']", "astra"),
    Probe::css("div[class*='inside-article'] div[class*='entry-content']", "generatepress"),
    Probe::css("div[class*='oceanwp-post-content']", "oceanwp"),
    Probe::css("div[class*='ct-page-content']", "blocksy"),
    Probe::css("div[class*='ct-container-content']", "blocksy"),
    Probe::css("div[class*='ct-inner-content']", "blocksy"),
    Probe::css("div[class*='td-post-content']", "newspaper"),
    Probe::css("div[class*='jeg_post_content']", "jnews"),
    Probe::css("div[class*='tdb-block-inner']", "newspaper"),
    Probe::css("div[class*='vc_row'] div[class*='wpb_wrapper']", "wpbakery"),
    // WooCommerce
    Probe::css("div[class*='woocommerce-product-details__short-description']", "woocommerce"),
    Probe::css("div[id='tab-description']", "woocommerce"),
    Probe::css("div[class*='woocommerce-Tabs-panel--description']", "woocommerce"),
    Probe::css("div[class*='product-short-description']", "woocommerce"),
    // Standard WordPress
    Probe::css("div[class*='entry-content']", "wordpress"),
    Probe::css("div[class*='post-content']", "wordpress"),
    Probe::css("div[class*='single-post-content']", "wordpress"),
    Probe::css("div[class*='article-content']", "wordpress"),
    Probe::css("div[class*='the-content']", "wordpress"),
    Probe::css("div[class*='page-content']", "wordpress"),
    Probe::css("div[class*='blog-single-content']", "wordpress"),
    Probe::css("div[class*='post-body']", "wordpress"),
    Probe::css("div[class*='content-inner']", "wordpress"),
    Probe::css("div[class*='singular-content']", "wordpress"),
    // Schema.org
    Probe::css("[itemprop='articleBody']", "schema"),
    Probe::css("[itemprop='text']", "schema"),
    Probe::css("[itemprop='description']", "schema"),
    // Generic wrappers
    Probe::css("div[class*='content-area'] div[class*='entry-content']", "generic"),
    Probe::css("div[class*='content-container']", "generic"),
    Probe::css("div[class*='content-wrapper']", "generic"),
    Probe::css("div[id='primary'] div[class*='content']", "generic"),
    Probe::css("div[id='content']", "generic"),
    Probe::css("div[role='main']", "generic"),
    Probe::css("article div[class*='content']", "generic"),
    Probe::css("article", "generic"),
    Probe::css("div[class*='hentry']", "generic"),
    // HTML5
    Probe::css("main article", "html5"),
    Probe::css("article:not([class*='sidebar'])", "html5"),
    Probe::css("main:not([class*='sidebar'])", "html5"),
];

/// Minimum combined paragraph text for the density fallback.
const DENSITY_MIN_TEXT: usize = 300;

/// Check whether an element can hold the article body.
///
/// Needs at least two `<p>` descendants and no sidebar/menu/footer/header/
/// comment/nav marker in its class or id.
#[must_use]
pub fn is_valid_container(sel: &Selection) -> bool {
    paragraph_count(sel) >= 2 && !has_indicator(sel, BAD_CONTAINER_INDICATORS)
}

/// Locate the content container under `root` (normally `<body>`).
///
/// Runs [`CONTENT_PROBES`] first; if none yields a valid container, falls
/// back to [`find_by_text_density`].
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::dom;
/// use rs_pbnkit::selector::content::find_content_container;
///
/// let doc = dom::parse(r#"<div class="sidebar"><p>a</p><p>b</p></div>
/// <div class="entry-content"><p>one</p><p>two</p></div>"#);
///
/// let found = find_content_container(&doc.select("body")).expect("container");
/// assert_eq!(dom::class_name(&found.element).as_deref(), Some("entry-content"));
/// ```
#[must_use]
pub fn find_content_container<'a>(root: &Selection<'a>) -> Option<Located<'a>> {
    if let Some(located) = first_accepted(root, CONTENT_PROBES, is_valid_container) {
        return Some(located);
    }

    let fallback = find_by_text_density(root).map(|element| Located {
        element,
        probe: None,
    });
    if fallback.is_none() {
        log::warn!("Content container not found");
    }
    fallback
}

/// Highest-scoring `div`/`article`/`section`/`main` by paragraph text density.
///
/// Candidates need at least two paragraphs holding more than 300 characters
/// in total and no preserve marker. Score is `text_len / (depth + 1)`, so the
/// shallowest of equally dense wrappers wins; ties keep document order.
#[must_use]
pub fn find_by_text_density<'a>(root: &Selection<'a>) -> Option<Selection<'a>> {
    let mut best: Option<(Selection<'a>, f64)> = None;

    for elem in dom::query_all(root, "div, article, section, main") {
        if has_indicator(&elem, PRESERVE_INDICATORS) {
            continue;
        }
        if paragraph_count(&elem) < 2 {
            continue;
        }
        let text_len = paragraph_text_len(&elem);
        if text_len <= DENSITY_MIN_TEXT {
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let score = text_len as f64 / (dom::depth(&elem) + 1) as f64;
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((elem, score));
        }
    }

    if let Some((elem, score)) = &best {
        log::debug!(
            "Density fallback picked <{}> with score {score:.1}",
            dom::tag_name(elem).unwrap_or_default()
        );
    }
    best.map(|(elem, _)| elem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_paragraphs() -> String {
        let sentence = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
        format!("<p>{}</p><p>{}</p>", sentence.repeat(4), sentence.repeat(4))
    }

    #[test]
    fn builder_wins_over_wordpress_class() {
        let doc = dom::parse(
            r#"<div class="entry-content"><div class="elementor-widget-theme-post-content">
            <div class="elementor-widget-container"><p>a</p><p>b</p></div></div></div>"#,
        );

        let found = find_content_container(&doc.select("body")).expect("found");
        assert_eq!(found.probe.map(|p| p.group), Some("elementor"));
        assert!(dom::is_tag(&found.element, "div"));
        assert_eq!(
            dom::class_name(&found.element).as_deref(),
            Some("elementor-widget-container")
        );
    }

    #[test]
    fn single_paragraph_candidate_is_skipped() {
        let doc = dom::parse(
            r#"<div class="et_pb_text_inner"><p>only one</p></div>
            <div class="entry-content"><p>a</p><p>b</p></div>"#,
        );

        let found = find_content_container(&doc.select("body")).expect("found");
        assert_eq!(found.probe.map(|p| p.group), Some("wordpress"));
    }

    #[test]
    fn bad_indicator_rejects_container() {
        let doc = dom::parse(r#"<div class="post-content sidebar-left"><p>a</p><p>b</p></div>"#);
        let div = doc.select("div");
        assert!(!is_valid_container(&div));
    }

    #[test]
    fn only_first_match_of_a_probe_is_validated() {
        // The first `.entry-content` is invalid; the second is never consulted
        // by that probe, so the later `article` probe wins.
        let doc = dom::parse(
            r#"<article id="a"><div class="entry-content"><p>x</p></div>
            <div class="entry-content" id="second"><p>a</p><p>b</p></div></article>"#,
        );

        let found = find_content_container(&doc.select("body")).expect("found");
        assert_eq!(dom::id(&found.element).as_deref(), Some("a"));
    }

    #[test]
    fn density_fallback_prefers_shallow_dense_block() {
        let html = format!(
            r#"<section id="outer"><div id="inner">{}</div></section><div class="widget">{}</div>"#,
            long_paragraphs(),
            long_paragraphs()
        );
        let doc = dom::parse(&html);

        let found = find_by_text_density(&doc.select("body")).expect("found");
        assert_eq!(dom::id(&found).as_deref(), Some("outer"));
    }

    #[test]
    fn density_fallback_requires_enough_text() {
        let doc = dom::parse("<section><p>short</p><p>text</p></section>");
        assert!(find_by_text_density(&doc.select("body")).is_none());
    }

    #[test]
    fn nothing_found_returns_none() {
        let doc = dom::parse("<span>nothing here</span>");
        assert!(find_content_container(&doc.select("body")).is_none());
    }
}
