#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use rs_pbnkit::document::extract_head;
use rs_pbnkit::{Catalog, ClusterLinker, KeywordMap, LinkType, Scheme, SchemeOptions};
use serde_json::Value;

const PARAGRAPHS: [&str; 4] = [
    "Doctors usually recommend starting with the lowest dose and adjusting it after a few weeks.",
    "Most people notice the effect within an hour, and it can last for several hours afterwards.",
    "Generic tablets contain the same active ingredient and are often sold at a lower price.",
    "Always check with a pharmacist before combining it with other medicines you already take.",
];

fn write_page(base: &Path, rel: &str, title: Option<&str>) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    let title = title.map(|t| format!("<title>{t}</title>")).unwrap_or_default();
    let body: String = PARAGRAPHS.iter().map(|p| format!("<p>{p}</p>")).collect();
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  {title}\n</head>\n\
         <body class=\"single-post\"><article><div class=\"entry-content\">{body}</div></article></body>\n</html>"
    );
    fs::write(path, html).expect("write");
}

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path();
    write_page(base, "a.com/one.html", Some("Buy Viagra Online"));
    write_page(base, "a.com/blog/two.html", Some("  Sildenafil dosage guide "));
    write_page(base, "b.com/one.html", Some("Viagra reviews"));
    write_page(base, "b.com/untitled.html", None);
    write_page(base, "c.com/index.html", Some("Viagra prices"));
    write_page(base, "c.com/other.html", Some("Gardening tips"));
    fs::write(base.join("b.com/notes.txt"), "Viagra notes").expect("write txt");
    fs::write(base.join("stray.html"), "<title>Viagra</title>").expect("write stray");
    dir
}

fn keywords(dir: &Path) -> KeywordMap {
    let path = dir.join("keywords.json");
    fs::write(&path, r#"{"viagra": "viagra", "sildenafil": "viagra", "cialis": "cialis"}"#)
        .expect("write keywords");
    KeywordMap::from_file(&path).expect("keywords")
}

#[test]
fn catalog_groups_titled_pages_by_topic() {
    let dir = site();
    let catalog = Catalog::scan(dir.path(), &keywords(dir.path()));

    assert_eq!(catalog.page_count(), 5);
    assert_eq!(catalog.clusters.len(), 1);

    let cluster = &catalog.clusters["viagra"];
    let urls: Vec<&str> = cluster.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://a.com/blog/two/",
            "https://a.com/one/",
            "https://b.com/one/",
            "https://c.com/index/",
        ]
    );
    assert_eq!(cluster.pages[0].title, "Sildenafil dosage guide");
    assert_eq!(cluster.domains().len(), 3);
}

#[test]
fn missing_base_directory_yields_empty_catalog() {
    let catalog = Catalog::scan(Path::new("/nonexistent/sites"), &KeywordMap::new());
    assert_eq!(catalog.page_count(), 0);
    assert!(catalog.clusters.is_empty());
}

#[test]
fn full_pipeline_plans_inserts_and_exports() {
    let dir = site();
    let heads_before: Vec<(String, String)> = ["a.com/one.html", "b.com/one.html", "c.com/index.html"]
        .iter()
        .map(|rel| {
            let html = fs::read_to_string(dir.path().join(rel)).expect("read");
            (rel.to_string(), extract_head(&html).expect("head").to_string())
        })
        .collect();

    let mut linker = ClusterLinker::new(dir.path(), keywords(dir.path())).with_seed(42);
    linker.build_clusters();
    let planned = linker.create_links(Some("viagra"), Scheme::Cluster, &SchemeOptions::default());
    assert!(planned > 0);

    let stats = linker.insert_all_links();
    assert_eq!(stats.total(), planned);
    assert_eq!(stats.success, planned);

    let cluster = &linker.clusters()["viagra"];
    for link in &cluster.links {
        assert!(link.inserted, "{} -> {}", link.source.url, link.target.url);
        let html = fs::read_to_string(&link.source.file_path).expect("read source");
        assert!(html.contains(&format!("<a href=\"{}\">", link.target.url)));
    }
    assert!(cluster
        .links
        .iter()
        .any(|l| l.link_type == LinkType::Internal && l.source.domain == "a.com"));

    for (rel, head) in &heads_before {
        let html = fs::read_to_string(dir.path().join(rel)).expect("read");
        assert_eq!(extract_head(&html), Some(head.as_str()), "{rel}");
    }

    let untouched = fs::read_to_string(dir.path().join("c.com/other.html")).expect("read");
    assert!(!untouched.contains("<a "));

    let coverage = linker.coverage(Some("viagra"));
    let stats = coverage["viagra"].stats().expect("stats");
    assert_eq!(stats.total_pages, 4);
    assert!((stats.coverage_score - 100.0).abs() < f64::EPSILON);

    let export = dir.path().join("plan.json");
    linker.export_links_json(&export).expect("export");
    let plan: Value = serde_json::from_str(&fs::read_to_string(&export).expect("read plan"))
        .expect("json");

    assert_eq!(plan["total_links"], Value::from(planned));
    let links = plan["clusters"]["viagra"]["links"].as_array().expect("links");
    assert_eq!(links.len(), planned);
    for link in links {
        assert!(matches!(link["type"].as_str(), Some("internal" | "cross-site")));
        assert_eq!(link["inserted"], Value::Bool(true));
        assert!(!link["anchor"].as_str().expect("anchor").is_empty());
    }

    let pages = plan["clusters"]["viagra"]["pages"].as_array().expect("pages");
    let incoming: u64 = pages.iter().filter_map(|p| p["incoming"].as_u64()).sum();
    assert_eq!(incoming, planned as u64);
}

#[test]
fn report_text_covers_every_topic() {
    let dir = site();
    let mut linker = ClusterLinker::new(dir.path(), keywords(dir.path())).with_seed(7);
    linker.build_clusters();
    linker.create_links(None, Scheme::Mesh, &SchemeOptions::default());

    let report = linker.coverage_report_text(None);
    assert!(report.contains("LINK REPORT: VIAGRA"));
    assert!(report.contains("PAGES PER DOMAIN:"));
    assert!(linker.links_summary().contains("Pages: 4"));
}
