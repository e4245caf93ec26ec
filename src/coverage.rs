//! Link coverage metrics.
//!
//! Counts are recomputed from the cluster's link list on every call, so the
//! analysis is the same no matter how often or in which order it runs.

use std::fmt;

use crate::catalog::Cluster;
use crate::result::{CoverageReport, CoverageStats};

/// URLs listed per section of the text report.
const REPORT_URL_LIMIT: usize = 5;

/// Analyze incoming and outgoing link counts of a cluster.
///
/// An empty cluster yields [`CoverageReport::Error`] instead of dividing by
/// zero.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::catalog::Cluster;
/// use rs_pbnkit::coverage::analyze;
///
/// let report = analyze(&Cluster::new("viagra"));
/// assert!(report.stats().is_none());
/// ```
#[must_use]
pub fn analyze(cluster: &Cluster) -> CoverageReport {
    let pages = &cluster.pages;
    if pages.is_empty() {
        return CoverageReport::Error {
            error: "No pages in cluster".to_string(),
        };
    }

    let (incoming, outgoing) = cluster.link_counts();
    let count_in = |url: &str| incoming.get(url).copied().unwrap_or(0);
    let count_out = |url: &str| outgoing.get(url).copied().unwrap_or(0);

    let orphan_pages: Vec<String> = pages
        .iter()
        .filter(|p| count_in(&p.url) == 0)
        .map(|p| p.url.clone())
        .collect();
    let dead_end_pages: Vec<String> = pages
        .iter()
        .filter(|p| count_out(&p.url) == 0)
        .map(|p| p.url.clone())
        .collect();

    let cross_site_links = cluster.links.iter().filter(|l| l.is_cross_site()).count();
    let total_pages = pages.len();
    let page_count = total_pages as f64;

    let stats = CoverageStats {
        total_pages,
        total_links: cluster.links.len(),
        internal_links: cluster.links.len() - cross_site_links,
        cross_site_links,
        pages_without_incoming: orphan_pages.len(),
        pages_without_outgoing: dead_end_pages.len(),
        avg_incoming: incoming.values().sum::<usize>() as f64 / page_count,
        avg_outgoing: outgoing.values().sum::<usize>() as f64 / page_count,
        max_incoming: incoming.values().copied().max().unwrap_or(0),
        min_incoming: incoming.values().copied().min().unwrap_or(0),
        coverage_score: (total_pages - orphan_pages.len()) as f64 / page_count * 100.0,
        domains: cluster.domains().len(),
        pages_per_domain: cluster
            .pages_by_domain()
            .into_iter()
            .map(|(domain, pages)| (domain, pages.len()))
            .collect(),
        orphan_pages,
        dead_end_pages,
    };

    log::debug!(
        "Coverage for {}: {:.1}% of {} pages",
        cluster.topic,
        stats.coverage_score,
        stats.total_pages
    );
    CoverageReport::Stats(stats)
}

/// Human-readable coverage report for one topic.
#[must_use]
pub fn report_text(report: &CoverageReport, topic: &str) -> String {
    ReportText { report, topic }.to_string()
}

/// Text view of a [`CoverageReport`].
struct ReportText<'a> {
    report: &'a CoverageReport,
    topic: &'a str,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{rule}")?;
        writeln!(f, "  LINK REPORT: {}", self.topic.to_uppercase())?;
        writeln!(f, "{rule}")?;

        let stats = match self.report {
            CoverageReport::Stats(stats) => stats,
            CoverageReport::Error { error } => {
                writeln!(f, "\nError: {error}")?;
                return write!(f, "\n{rule}");
            }
        };

        writeln!(f, "\nTOTALS:")?;
        writeln!(f, "   Pages: {}", stats.total_pages)?;
        writeln!(f, "   Links: {}", stats.total_links)?;
        writeln!(f, "   - internal: {}", stats.internal_links)?;
        writeln!(f, "   - cross-site: {}", stats.cross_site_links)?;
        writeln!(f, "   Domains: {}", stats.domains)?;

        writeln!(f, "\nCOVERAGE:")?;
        writeln!(f, "   Coverage score: {:.1}%", stats.coverage_score)?;
        writeln!(f, "   Average incoming: {:.1}", stats.avg_incoming)?;
        writeln!(f, "   Average outgoing: {:.1}", stats.avg_outgoing)?;
        writeln!(f, "   Max incoming: {}", stats.max_incoming)?;
        writeln!(f, "   Min incoming: {}", stats.min_incoming)?;

        if stats.orphan_pages.is_empty() {
            writeln!(f, "\nEvery page has incoming links.")?;
        } else {
            writeln!(
                f,
                "\nPAGES WITHOUT INCOMING LINKS ({}):",
                stats.pages_without_incoming
            )?;
            write_urls(f, &stats.orphan_pages)?;
        }

        if stats.dead_end_pages.is_empty() {
            writeln!(f, "\nEvery page has outgoing links.")?;
        } else {
            writeln!(
                f,
                "\nPAGES WITHOUT OUTGOING LINKS ({}):",
                stats.pages_without_outgoing
            )?;
            write_urls(f, &stats.dead_end_pages)?;
        }

        writeln!(f, "\nPAGES PER DOMAIN:")?;
        for (domain, count) in &stats.pages_per_domain {
            writeln!(f, "   {domain}: {count}")?;
        }
        write!(f, "\n{rule}")
    }
}

fn write_urls(f: &mut fmt::Formatter<'_>, urls: &[String]) -> fmt::Result {
    for url in urls.iter().take(REPORT_URL_LIMIT) {
        writeln!(f, "   - {url}")?;
    }
    if urls.len() > REPORT_URL_LIMIT {
        writeln!(f, "   ... and {} more", urls.len() - REPORT_URL_LIMIT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Link, LinkType, Page};
    use std::sync::Arc;

    fn page(domain: &str, n: usize) -> Arc<Page> {
        Arc::new(Page::new(
            format!("https://{domain}/{n}"),
            domain,
            format!("/s/{domain}/{n}.html"),
            "t",
            None,
        ))
    }

    fn cluster() -> Cluster {
        let (a1, a2, b1) = (page("a.com", 1), page("a.com", 2), page("b.com", 1));
        let mut cluster = Cluster::new("viagra");
        cluster.pages = vec![a1.clone(), a2.clone(), b1.clone()];
        cluster.links = vec![
            Link::new(a1.clone(), a2.clone(), LinkType::Internal),
            Link::new(a2, b1.clone(), LinkType::CrossSite),
            Link::new(b1, a1, LinkType::CrossSite),
        ];
        cluster
    }

    #[test]
    fn counts_and_score() {
        let report = analyze(&cluster());
        let stats = report.stats().expect("stats");

        assert_eq!(stats.total_pages, 3);
        assert_eq!(stats.internal_links, 1);
        assert_eq!(stats.cross_site_links, 2);
        assert_eq!(stats.pages_without_incoming, 0);
        assert!((stats.coverage_score - 100.0).abs() < f64::EPSILON);
        assert!((stats.avg_incoming - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.pages_per_domain.get("a.com"), Some(&2));
        assert_eq!(stats.domains, 2);
    }

    #[test]
    fn orphans_and_dead_ends() {
        let mut cluster = cluster();
        cluster.links.truncate(1);
        let report = analyze(&cluster);
        let stats = report.stats().expect("stats");

        assert_eq!(stats.orphan_pages, vec!["https://a.com/1", "https://b.com/1"]);
        assert_eq!(stats.dead_end_pages, vec!["https://a.com/2", "https://b.com/1"]);
        assert_eq!(stats.min_incoming, 0);
        assert!((stats.coverage_score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn analysis_is_repeatable() {
        let cluster = cluster();
        assert_eq!(analyze(&cluster), analyze(&cluster));
    }

    #[test]
    fn report_lists_at_most_five_urls() {
        let mut cluster = Cluster::new("x");
        cluster.pages = (0..8).map(|i| page("a.com", i)).collect();
        let text = report_text(&analyze(&cluster), "x");

        assert!(text.contains("Coverage score: 0.0%"));
        assert!(text.contains("... and 3 more"));
        assert!(text.contains("   a.com: 8"));
    }

    #[test]
    fn report_for_empty_cluster() {
        let text = report_text(&analyze(&Cluster::new("x")), "x");
        let rule = "=".repeat(70);

        assert!(text.contains("Error: No pages in cluster"));
        assert!(text.starts_with(&format!("{rule}\n  LINK REPORT: X\n")));
        assert!(text.ends_with(&format!("\n\n{rule}")));
    }
}
