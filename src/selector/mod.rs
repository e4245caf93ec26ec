//! Selector Infrastructure
//!
//! Container and heading detection run down ordered tables of structural
//! queries, most specific page builder first and generic HTML5 last. The
//! tables are data ([`Probe`] slices) so supporting a new theme means adding
//! a row, and the order that decides which candidate wins is visible in one
//! place.

use dom_query::Selection;

use crate::dom;

pub mod content;
pub mod heading;
pub mod listing;
pub mod utils;

/// One structural query.
///
/// Plain CSS covers most rows; the other variants express the few
/// structural conditions CSS selectors cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Elements matching a CSS selector.
    Css(&'static str),
    /// The parent of the first element matching the selector.
    ParentOf(&'static str),
    /// `outer` elements having at least one `inner` descendant.
    HasDescendant {
        /// Candidate elements.
        outer: &'static str,
        /// Required descendant.
        inner: &'static str,
    },
    /// `outer` elements having at least `min` `inner` descendants.
    MinDescendants {
        /// Candidate elements.
        outer: &'static str,
        /// Counted descendant.
        inner: &'static str,
        /// Minimum count.
        min: usize,
    },
}

impl Query {
    /// First element under `root` matching the query, in document order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_pbnkit::dom;
    /// use rs_pbnkit::selector::Query;
    ///
    /// let doc = dom::parse(r#"<div id="a"><p>x</p></div><div id="b"><article></article></div>"#);
    /// let q = Query::HasDescendant { outer: "div", inner: "article" };
    ///
    /// let found = q.first(&doc.select("body")).expect("match");
    /// assert_eq!(dom::id(&found).as_deref(), Some("b"));
    /// ```
    #[must_use]
    pub fn first<'a>(&self, root: &Selection<'a>) -> Option<Selection<'a>> {
        match *self {
            Self::Css(css) => dom::query_all(root, css).into_iter().next(),
            Self::ParentOf(css) => dom::query_all(root, css)
                .into_iter()
                .next()
                .map(|sel| dom::parent(&sel))
                .filter(Selection::exists),
            Self::HasDescendant { outer, inner } => dom::query_all(root, outer)
                .into_iter()
                .find(|sel| sel.select(inner).exists()),
            Self::MinDescendants { outer, inner, min } => dom::query_all(root, outer)
                .into_iter()
                .find(|sel| dom::count(sel, inner) >= min),
        }
    }

    /// Check whether anything under `root` matches.
    #[must_use]
    pub fn exists(&self, root: &Selection) -> bool {
        self.first(root).is_some()
    }
}

/// A query tagged with the builder/theme family it targets.
///
/// The group only feeds diagnostics; order in the table is what matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// The structural query.
    pub query: Query,
    /// Family label used in log lines, e.g. `"elementor"`.
    pub group: &'static str,
}

impl Probe {
    /// CSS-only probe.
    #[must_use]
    pub const fn css(css: &'static str, group: &'static str) -> Self {
        Self {
            query: Query::Css(css),
            group,
        }
    }

    /// Probe with a structural query.
    #[must_use]
    pub const fn query(query: Query, group: &'static str) -> Self {
        Self { query, group }
    }
}

/// A located element together with the probe that found it.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    /// The element.
    pub element: Selection<'a>,
    /// Probe that matched, `None` for heuristic fallbacks.
    pub probe: Option<Probe>,
}

/// Walk `probes` in order and return the first element accepted by `accept`.
///
/// Only the first match of each probe is considered; a rejected match moves
/// on to the next probe rather than to later matches of the same one.
#[must_use]
pub fn first_accepted<'a>(
    root: &Selection<'a>,
    probes: &[Probe],
    accept: impl Fn(&Selection) -> bool,
) -> Option<Located<'a>> {
    for probe in probes {
        if let Some(element) = probe.query.first(root) {
            if accept(&element) {
                log::debug!("Matched {} probe {:?}", probe.group, probe.query);
                return Some(Located {
                    element,
                    probe: Some(*probe),
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_query_returns_document_order() {
        let doc = dom::parse(r#"<p id="one" class="x">1</p><p id="two" class="x">2</p>"#);
        let found = Query::Css("p.x").first(&doc.select("body"));

        assert_eq!(found.and_then(|s| dom::id(&s)).as_deref(), Some("one"));
    }

    #[test]
    fn parent_of_query() {
        let doc = dom::parse(
            r#"<div class="tdb-block-inner"><div id="wrap"><div class="td-module">x</div></div></div>"#,
        );
        let q = Query::ParentOf("div[class*='tdb-block-inner'] div[class*='td-module']");

        let found = q.first(&doc.select("body"));
        assert_eq!(found.and_then(|s| dom::id(&s)).as_deref(), Some("wrap"));
    }

    #[test]
    fn min_descendants_query() {
        let doc = dom::parse(
            r#"<main><div id="one"><article></article></div><div id="two"><article></article><article></article></div></main>"#,
        );
        let q = Query::MinDescendants {
            outer: "main div",
            inner: "article",
            min: 2,
        };

        let found = q.first(&doc.select("body"));
        assert_eq!(found.and_then(|s| dom::id(&s)).as_deref(), Some("two"));
    }

    #[test]
    fn first_accepted_skips_rejected_probe() {
        let doc = dom::parse(r#"<div class="a">short</div><div class="b"><p>1</p><p>2</p></div>"#);
        let probes = [Probe::css("div.a", "first"), Probe::css("div.b", "second")];

        let located = first_accepted(&doc.select("body"), &probes, |sel| {
            utils::paragraph_count(sel) >= 2
        })
        .expect("located");

        assert_eq!(located.probe.map(|p| p.group), Some("second"));
    }

    #[test]
    fn no_match_returns_none() {
        let doc = dom::parse("<p>x</p>");
        assert!(!Query::Css("article").exists(&doc.select("body")));
    }
}
