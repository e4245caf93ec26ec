#![allow(clippy::expect_used)]

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rs_pbnkit::{analyze, classify, dom, replace_content, Error, Link, LinkInserter, LinkType, Page, PageType};

#[test]
fn splice_does_not_panic_on_unclosed_tags() {
    let html = "<html><body class=\"single-post\"><div class=\"entry-content\"><p>one<p>two<div>three";
    let out = replace_content(html, "<p>new</p>").expect("lenient parse");
    assert!(out.contains("<p>new</p>"));
}

#[test]
fn splice_on_empty_input_reports_missing_container() {
    let result = replace_content("", "<p>x</p>");
    assert!(matches!(result, Err(Error::ContainerNotFound { .. })));
}

#[test]
fn fragment_bare_text_is_kept() {
    let html = "<html><body class=\"single-post\"><div class=\"entry-content\"><p>a</p><p>b</p></div></body></html>";
    let out = replace_content(html, "plain words <em>and markup</em>").expect("splice");

    assert!(out.contains("plain words "));
    assert!(out.contains("<em>and markup</em>"));
}

#[test]
fn analysis_of_garbage_does_not_panic() {
    for input in ["", "<<<>>>", "<div class=\"test id=broken>", "\u{0}\u{1}binary"] {
        let report = analyze(input).expect("analysis");
        assert!(!report.container_found || report.container_selector.is_some());
    }
}

#[test]
fn classification_is_stable() {
    let doc = dom::parse("<html><body><article><div class=\"entry-content\"><p>x</p></div></article></body></html>");
    let body = doc.select("body");

    let first = classify::classify(&body);
    assert_eq!(first, classify::classify(&body));
    assert_eq!(first, PageType::Post);
}

#[test]
fn inserter_handles_pages_without_head() {
    let html = "<body><div class=\"entry-content\"><p>Enough words are written here to host one link without trouble at all.</p></div></body>";
    let source = Arc::new(Page::new("https://a.com/x/", "a.com", "x.html", "X", None));
    let target = Arc::new(Page::new("https://b.com/y/", "b.com", "y.html", "Y", None));
    let mut link = Link::new(source, target, LinkType::CrossSite);
    link.anchor = "anchor text".to_string();
    let mut links = vec![link];
    let mut rng = StdRng::seed_from_u64(0);

    let (out, stats) = LinkInserter::default()
        .insert_into_html(html, &mut links, &mut rng)
        .expect("insert");
    let out = out.expect("rewritten");

    assert_eq!(stats.success, 1);
    assert!(out.starts_with("<!DOCTYPE html>\n<html>\n\n<body"));
}
