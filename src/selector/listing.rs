//! Listing selector rules
//!
//! Probes for the post-listing container of category and archive pages.

use dom_query::Selection;

use crate::dom;
use crate::selector::utils::{has_indicator, PRESERVE_INDICATORS};
use crate::selector::{first_accepted, Located, Probe, Query};

/// Listing container probes in priority order.
pub static LISTING_PROBES: &[Probe] = &[
    // Publisher
    Probe::css("div[class*='listing-grid']", "publisher"),
    Probe::css("div[class*='listing-blog']", "publisher"),
    Probe::css("div[class*='listing'][class*='clearfix']", "publisher"),
    // JNews
    Probe::css("div[class*='jeg_posts']", "jnews"),
    Probe::css("div[class*='jeg_postblock']", "jnews"),
    Probe::css("div[class*='jnews_posts']", "jnews"),
    // Generic listing classes
    Probe::css("div[class*='posts-listing']", "generic"),
    Probe::css("div[class*='post-listing']", "generic"),
    Probe::css("div[class*='blog-listing']", "generic"),
    // Newspaper
    Probe::css("div[class*='td-ss-main-content']", "newspaper"),
    Probe::css("div[class*='td_module_wrap']", "newspaper"),
    Probe::query(
        Query::ParentOf("div[class*='tdb-block-inner'] div[class*='td-module']"),
        "newspaper",
    ),
    // Elementor
    Probe::css("div[class*='elementor-posts-container']", "elementor"),
    Probe::css("div[class*='elementor-posts']", "elementor"),
    Probe::css("div[class*='elementor-loop-container']", "elementor"),
    // Divi
    Probe::css("div[class*='et_pb_blog_grid']", "divi"),
    Probe::css("div[class*='et_pb_posts']", "divi"),
    // Astra and flavor themes
    Probe::css("div[class*='theme-flavor-container'] div[class*='posts']", "theme"),
    Probe::query(Query::ParentOf("div[class*='ast-archive-post']"), "astra"),
    Probe::css("div[class*='flavor'] div[class*='posts']", "theme"),
    // WordPress archives
    Probe::css("div[class*='archive-posts']", "wordpress"),
    Probe::css("div[class*='blog-posts']", "wordpress"),
    Probe::css("div[class*='posts-wrapper']", "wordpress"),
    Probe::css("div[class*='post-list']", "wordpress"),
    Probe::css("div[class*='category-posts']", "wordpress"),
    // Containers holding listing articles
    Probe::query(
        Query::HasDescendant {
            outer: "div",
            inner: "article[class*='listing-item']",
        },
        "structure",
    ),
    Probe::query(
        Query::HasDescendant {
            outer: "div",
            inner: "article[class*='post-item']",
        },
        "structure",
    ),
    Probe::query(
        Query::HasDescendant {
            outer: "div",
            inner: "article[class*='type-post']",
        },
        "structure",
    ),
    Probe::query(
        Query::HasDescendant {
            outer: "section",
            inner: "article[class*='type-post']",
        },
        "structure",
    ),
    // Any block with several articles
    Probe::query(
        Query::MinDescendants {
            outer: "main div",
            inner: "article",
            min: 2,
        },
        "structure",
    ),
    Probe::query(
        Query::MinDescendants {
            outer: "div[id='content'] div",
            inner: "article",
            min: 2,
        },
        "structure",
    ),
    Probe::query(
        Query::MinDescendants {
            outer: "div[class*='content'] div",
            inner: "article",
            min: 2,
        },
        "structure",
    ),
];

/// A listing needs an `<article>` descendant or a `listing` class.
#[must_use]
pub fn is_valid_listing(sel: &Selection) -> bool {
    sel.select("article").exists()
        || dom::class_name(sel).is_some_and(|c| c.to_lowercase().contains("listing"))
}

/// Locate the post-listing container under `root`.
///
/// Falls back to the `div`/`section`/`main` holding the most `<article>`
/// descendants (at least two), skipping theme furniture.
#[must_use]
pub fn find_listing_container<'a>(root: &Selection<'a>) -> Option<Located<'a>> {
    if let Some(located) = first_accepted(root, LISTING_PROBES, is_valid_listing) {
        return Some(located);
    }

    let mut best: Option<(Selection<'a>, usize)> = None;
    for elem in dom::query_all(root, "div, section, main") {
        if has_indicator(&elem, PRESERVE_INDICATORS) {
            continue;
        }
        let articles = dom::count(&elem, "article");
        if best.as_ref().is_none_or(|(_, max)| articles > *max) {
            best = Some((elem, articles));
        }
    }

    match best {
        Some((element, articles)) if articles >= 2 => {
            log::debug!("Listing found by article count: {articles}");
            Some(Located {
                element,
                probe: None,
            })
        }
        _ => {
            log::warn!("Category listing container not found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_listing_grid() {
        let doc = dom::parse(
            r#"<div class="listing listing-grid clearfix"><article class="listing-item">a</article></div>"#,
        );

        let found = find_listing_container(&doc.select("body")).expect("found");
        assert_eq!(found.probe.map(|p| p.group), Some("publisher"));
    }

    #[test]
    fn listing_class_alone_is_enough() {
        let doc = dom::parse(r#"<div class="post-listing"><div class="card">x</div></div>"#);
        let found = find_listing_container(&doc.select("body")).expect("found");
        assert!(found.probe.is_some());
    }

    #[test]
    fn probe_without_articles_or_listing_class_is_rejected() {
        let doc = dom::parse(r#"<div class="blog-posts"><div class="card">x</div></div>"#);
        assert!(find_listing_container(&doc.select("body")).is_none());
    }

    #[test]
    fn fallback_picks_block_with_most_articles() {
        let doc = dom::parse(
            r#"<section id="grid"><article>1</article><article>2</article><article>3</article></section>
            <div class="sidebar"><article>x</article><article>y</article><article>z</article><article>w</article></div>"#,
        );

        let found = find_listing_container(&doc.select("body")).expect("found");
        assert!(found.probe.is_none());
        assert_eq!(dom::id(&found.element).as_deref(), Some("grid"));
    }

    #[test]
    fn single_article_is_not_a_listing() {
        let doc = dom::parse("<section><article>1</article></section>");
        assert!(find_listing_container(&doc.select("body")).is_none());
    }
}
