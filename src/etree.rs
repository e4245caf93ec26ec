//! Element Tree (etree) Utilities
//!
//! Text/tail model on top of the `dom_query` node tree. Splicing content and
//! placing links both depend on telling an element's own leading text apart
//! from the text that follows it.
//!
//! ## Text vs Tail
//!
//! - **Text**: the text nodes before the element's first non-text child
//! - **Tail**: the text nodes after the element's closing tag, up to the next
//!   non-text sibling
//!
//! ```html
//! <div>
//!   TEXT HERE          <!-- This is div's "text" -->
//!   <span>inner</span>
//!   TAIL HERE          <!-- This is span's "tail" -->
//! </div>
//! ```
//!
//! Setters never rewrite a text node in place: they detach the old nodes and
//! attach fresh ones, which leaves every element sibling untouched.

use dom_query::{NodeRef, Selection};

fn first_node<'a>(sel: &Selection<'a>) -> Option<NodeRef<'a>> {
    sel.nodes().first().copied()
}

/// Leading text nodes of an element, in order.
fn text_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut nodes = Vec::new();
    let mut child = node.first_child();
    while let Some(c) = child {
        if !c.is_text() {
            break;
        }
        child = c.next_sibling();
        nodes.push(c);
    }
    nodes
}

/// Text nodes following an element, up to the next non-text sibling.
fn tail_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut nodes = Vec::new();
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if !s.is_text() {
            break;
        }
        sibling = s.next_sibling();
        nodes.push(s);
    }
    nodes
}

fn concat(nodes: &[NodeRef]) -> String {
    nodes.iter().map(|n| n.text().to_string()).collect()
}

/// Get the element's own leading text.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::{dom, etree};
///
/// let doc = dom::parse("<p>Lead <b>bold</b> tail</p>");
/// assert_eq!(etree::text(&doc.select("p")), "Lead ");
/// ```
#[must_use]
pub fn text(sel: &Selection) -> String {
    first_node(sel).map_or_else(String::new, |node| concat(&text_nodes(&node)))
}

/// Get the text that follows the element's closing tag.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::{dom, etree};
///
/// let doc = dom::parse("<p>Lead <b>bold</b> tail</p>");
/// assert_eq!(etree::tail(&doc.select("b")), " tail");
/// ```
#[must_use]
pub fn tail(sel: &Selection) -> String {
    first_node(sel).map_or_else(String::new, |node| concat(&tail_nodes(&node)))
}

/// Replace the element's own leading text. An empty string clears it.
pub fn set_text(sel: &Selection, text: &str) {
    let Some(node) = first_node(sel) else {
        return;
    };
    for old in text_nodes(&node) {
        old.remove_from_parent();
    }
    if !text.is_empty() {
        let fresh = node.tree.new_text(text);
        node.prepend_child(&fresh);
    }
}

/// Replace the text following the element. An empty string clears it.
pub fn set_tail(sel: &Selection, tail: &str) {
    let Some(node) = first_node(sel) else {
        return;
    };
    for old in tail_nodes(&node) {
        old.remove_from_parent();
    }
    if !tail.is_empty() {
        let fresh = node.tree.new_text(tail);
        node.insert_after(&fresh);
    }
}

/// Drop every child of the element and leave `text` as its only content.
pub fn replace_children_with_text(sel: &Selection, text: &str) {
    let Some(node) = first_node(sel) else {
        return;
    };
    for child in node.children() {
        child.remove_from_parent();
    }
    if !text.is_empty() {
        let fresh = node.tree.new_text(text);
        node.append_child(&fresh);
    }
}

/// Insert `child` as the first child element of `parent`.
///
/// The element lands right after the parent's leading text, so that text
/// stays the parent's `text` and nothing after it moves.
pub fn insert_first_element(parent: &Selection, child: &Selection) {
    let (Some(parent), Some(child)) = (first_node(parent), first_node(child)) else {
        return;
    };
    match text_nodes(&parent).last() {
        Some(last_text) => last_text.insert_after(&child),
        None => parent.prepend_child(&child),
    }
}

/// Insert `node` as the first child of `parent`, ahead of any text.
pub fn prepend(parent: &Selection, node: &Selection) {
    if let (Some(parent), Some(node)) = (first_node(parent), first_node(node)) {
        parent.prepend_child(&node);
    }
}

/// Append `node` as the last child of `parent`.
pub fn append(parent: &Selection, node: &Selection) {
    if let (Some(parent), Some(node)) = (first_node(parent), first_node(node)) {
        parent.append_child(&node);
    }
}

/// Clear the element's own text and the tail of each of its children.
///
/// Used after removing children, so text that sat between removed elements
/// does not survive as orphaned fragments. Every direct text child goes,
/// including runs separated by comments.
pub fn clear_loose_text(sel: &Selection) {
    let Some(node) = first_node(sel) else {
        return;
    };
    for child in node.children() {
        if child.is_text() {
            child.remove_from_parent();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn text_stops_at_first_element() {
        let doc = dom::parse("<div>one <span>two</span> three</div>");
        let div = doc.select("div");

        assert_eq!(text(&div), "one ");
        assert_eq!(tail(&doc.select("span")), " three");
    }

    #[test]
    fn text_of_element_without_text_is_empty() {
        let doc = dom::parse("<div><span>x</span></div>");
        assert_eq!(text(&doc.select("div")), "");
        assert_eq!(tail(&doc.select("span")), "");
    }

    #[test]
    fn set_text_keeps_children() {
        let doc = dom::parse("<p>old text <b>bold</b> after</p>");
        let p = doc.select("p");

        set_text(&p, "new ");

        assert_eq!(text(&p), "new ");
        assert_eq!(p.select("b").text().to_string(), "bold");
        assert_eq!(p.text().to_string(), "new bold after");
    }

    #[test]
    fn set_tail_replaces_following_text_only() {
        let doc = dom::parse("<p>a <b>b</b> c <i>d</i> e</p>");
        let b = doc.select("b");

        set_tail(&b, "");

        assert_eq!(tail(&b), "");
        assert_eq!(doc.select("p").text().to_string(), "a bd e");
    }

    #[test]
    fn insert_first_element_goes_after_leading_text() {
        let doc = dom::parse("<p>lead <b>b</b></p>");
        let p = doc.select("p");
        let a = dom::new_element(&p, "a").expect("element");

        insert_first_element(&p, &a);

        assert_eq!(p.html().to_string(), "<p>lead <a></a><b>b</b></p>");
    }

    #[test]
    fn replace_children_with_text_drops_markup() {
        let doc = dom::parse("<h1><span>Old</span> <em>title</em></h1>");
        let h1 = doc.select("h1");

        replace_children_with_text(&h1, "New");

        assert_eq!(h1.html().to_string(), "<h1>New</h1>");
    }

    #[test]
    fn clear_loose_text_removes_text_between_children() {
        let doc = dom::parse("<div id=\"c\"> x <p>1</p> y <p>2</p> z </div>");
        let div = doc.select("#c");

        clear_loose_text(&div);

        assert_eq!(div.inner_html().to_string(), "<p>1</p><p>2</p>");
    }

    #[test]
    fn clear_loose_text_handles_comments() {
        let doc = dom::parse("<div id=\"c\"><!-- c --> x <p>1</p></div>");
        let div = doc.select("#c");

        clear_loose_text(&div);

        assert_eq!(div.inner_html().to_string(), "<!-- c --><p>1</p>");
    }
}
