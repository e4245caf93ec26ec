//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate. The rest of the crate goes through
//! these functions instead of touching `Selection`/`NodeRef` directly, so the
//! attribute, traversal and mutation idioms stay in one place.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Lowercased `class + " " + id` string used by every indicator check.
///
/// Theme furniture is recognised by substrings of either attribute, so the
/// two are matched together.
#[must_use]
pub fn class_id_lower(sel: &Selection) -> String {
    let class = class_name(sel).unwrap_or_default();
    let id = id(sel).unwrap_or_default();
    format!("{class} {id}").to_lowercase()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Check the tag name of the first node in the selection.
#[must_use]
pub fn is_tag(sel: &Selection, tag: &str) -> bool {
    tag_name(sel).is_some_and(|t| t == tag)
}

/// Number of ancestors of the first node (document node included).
#[must_use]
pub fn depth(sel: &Selection) -> usize {
    let Some(node) = sel.nodes().first() else {
        return 0;
    };
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        depth += 1;
        current = parent.parent();
    }
    depth
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Direct element children of the first node, in document order.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes()
        .first()
        .map(|node| {
            node.children()
                .into_iter()
                .filter(dom_query::NodeRef::is_element)
                .map(Selection::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Query all elements by CSS selector, one `Selection` per match.
#[must_use]
pub fn query_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Count elements matching a CSS selector under the selection.
#[inline]
#[must_use]
pub fn count(sel: &Selection, selector: &str) -> usize {
    sel.select(selector).length()
}

/// Check whether any ancestor of the first node has the given tag.
#[must_use]
pub fn has_ancestor_tag(sel: &Selection, tag: &str) -> bool {
    let Some(node) = sel.nodes().first() else {
        return false;
    };
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent
            .node_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
        {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Check whether two selections point at the same node.
#[must_use]
pub fn same_node(a: &Selection, b: &Selection) -> bool {
    match (a.nodes().first(), b.nodes().first()) {
        (Some(x), Some(y)) => x.id == y.id,
        _ => false,
    }
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Append HTML content
#[inline]
pub fn append_html(sel: &Selection, html: &str) {
    sel.append_html(html);
}

/// Insert HTML content as siblings before the selection
#[inline]
pub fn before_html(sel: &Selection, html: &str) {
    sel.before_html(html);
}

/// Rename element tag
#[inline]
pub fn rename(sel: &Selection, new_tag: &str) {
    sel.rename(new_tag);
}

/// Create a detached element owned by the same tree as `sel`.
///
/// Returns `None` for an empty selection. The element has to be attached
/// with one of the `etree` insertion helpers.
#[must_use]
pub fn new_element<'a>(sel: &Selection<'a>, tag: &str) -> Option<Selection<'a>> {
    let node = sel.nodes().first()?;
    Some(Selection::from(node.tree.new_element(tag)))
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container".to_string()));
    }

    #[test]
    fn test_class_id_lower_combines_attributes() {
        let doc = parse(r#"<div id="Sidebar-Left" class="Widget Area">x</div>"#);
        let div = doc.select("div");

        assert_eq!(class_id_lower(&div), "widget area sidebar-left");
    }

    #[test]
    fn test_element_children_skip_text() {
        let doc = parse(r#"<div id="root">a<p>1</p> b <span>2</span></div>"#);
        let root = doc.select("#root");

        let tags: Vec<String> = element_children(&root)
            .iter()
            .filter_map(tag_name)
            .collect();
        assert_eq!(tags, vec!["p".to_string(), "span".to_string()]);
    }

    #[test]
    fn test_has_ancestor_tag() {
        let doc = parse(r#"<a href="/x"><span id="inner">t</span></a><span id="outer">t</span>"#);

        assert!(has_ancestor_tag(&doc.select("#inner"), "a"));
        assert!(!has_ancestor_tag(&doc.select("#outer"), "a"));
    }

    #[test]
    fn test_depth_grows_with_nesting() {
        let doc = parse(r#"<div id="a"><div id="b"><p id="c">x</p></div></div>"#);

        let a = depth(&doc.select("#a"));
        let c = depth(&doc.select("#c"));
        assert_eq!(c, a + 2);
    }

    #[test]
    fn test_rename_element() {
        let doc = parse("<h1>One</h1><h1>Two</h1>");
        let second = doc.select("h1").last();

        rename(&second, "h2");

        assert_eq!(doc.select("h1").length(), 1);
        assert_eq!(doc.select("h2").text().to_string(), "Two");
    }

    #[test]
    fn test_same_node() {
        let doc = parse(r#"<p id="x">1</p><p>2</p>"#);
        let a = doc.select("#x");
        let b = doc.select("p").first();

        assert!(same_node(&a, &b));
        assert!(!same_node(&a, &doc.select("p").last()));
    }
}
