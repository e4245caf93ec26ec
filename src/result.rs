//! Result types for splice, insertion and coverage output.
//!
//! Everything here is plain data with `Serialize`, so the command-line tools
//! can print it as JSON and callers can diff it between runs.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use crate::classify::PageType;

/// Structure of a page as the content engine sees it.
///
/// Produced without mutating anything; used to check a new theme before
/// running a splice on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    /// Detected page type.
    pub page_type: PageType,

    /// Whether a content (or listing) container was located.
    pub container_found: bool,

    /// `tag.class1.class2` of the container, or the bare tag.
    pub container_selector: Option<String>,

    /// Whether a main heading was located.
    pub h1_found: bool,

    /// First 100 characters of the heading text.
    pub h1_text: Option<String>,

    /// Whether the raw document had a `<head>` span to carry over.
    pub head_preserved: bool,

    /// `<article>` elements in the listing container (listing pages only).
    pub articles_count: usize,
}

/// Aggregate outcome of a link insertion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsertStats {
    /// Links placed in their source file.
    pub success: usize,
    /// Links whose file could not be read or that ran out of attempts.
    pub failed: usize,
    /// Links whose source file offered no usable text block.
    pub skipped: usize,
}

impl InsertStats {
    /// Total number of links accounted for.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.success + self.failed + self.skipped
    }
}

impl AddAssign for InsertStats {
    fn add_assign(&mut self, rhs: Self) {
        self.success += rhs.success;
        self.failed += rhs.failed;
        self.skipped += rhs.skipped;
    }
}

impl fmt::Display for InsertStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "success: {}, failed: {}, skipped: {}",
            self.success, self.failed, self.skipped
        )
    }
}

/// Link coverage metrics for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageStats {
    pub total_pages: usize,
    pub total_links: usize,
    pub internal_links: usize,
    pub cross_site_links: usize,
    pub pages_without_incoming: usize,
    pub pages_without_outgoing: usize,
    /// URLs of pages nothing links to.
    pub orphan_pages: Vec<String>,
    /// URLs of pages that link nowhere.
    pub dead_end_pages: Vec<String>,
    pub avg_incoming: f64,
    pub avg_outgoing: f64,
    pub max_incoming: usize,
    pub min_incoming: usize,
    /// Percentage of pages with at least one incoming link.
    pub coverage_score: f64,
    /// Number of distinct domains.
    pub domains: usize,
    pub pages_per_domain: BTreeMap<String, usize>,
}

/// Coverage analysis outcome.
///
/// Serializes either as the flat metrics object or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CoverageReport {
    /// Metrics for a non-empty cluster.
    Stats(CoverageStats),
    /// The cluster could not be analyzed.
    Error {
        /// Reason.
        error: String,
    },
}

impl CoverageReport {
    /// The metrics, if the analysis succeeded.
    #[must_use]
    pub const fn stats(&self) -> Option<&CoverageStats> {
        match self {
            Self::Stats(stats) => Some(stats),
            Self::Error { .. } => None,
        }
    }
}

/// One page entry of the exported link plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanPage {
    pub url: String,
    pub domain: String,
    pub title: String,
    pub incoming: usize,
    pub outgoing: usize,
}

/// One link entry of the exported link plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanLink {
    pub source: String,
    pub target: String,
    pub anchor: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub inserted: bool,
}

/// Pages and links of one topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanCluster {
    pub pages: Vec<PlanPage>,
    pub links: Vec<PlanLink>,
}

/// The exported link plan document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkPlan {
    /// Clusters by topic.
    pub clusters: BTreeMap<String, PlanCluster>,
    /// Number of planned links.
    pub total_links: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_stats_accumulate() {
        let mut stats = InsertStats {
            success: 1,
            failed: 0,
            skipped: 2,
        };
        stats += InsertStats {
            success: 3,
            failed: 1,
            skipped: 0,
        };

        assert_eq!(stats.total(), 7);
        assert_eq!(stats.to_string(), "success: 4, failed: 1, skipped: 2");
    }

    #[test]
    fn coverage_error_serializes_flat() {
        let report = CoverageReport::Error {
            error: "No pages in cluster".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap_or_default();

        assert_eq!(json, r#"{"error":"No pages in cluster"}"#);
        assert!(report.stats().is_none());
    }

    #[test]
    fn plan_link_uses_type_key() {
        let link = PlanLink {
            source: "https://a.com/x/".to_string(),
            target: "https://b.com/y/".to_string(),
            anchor: "buy now".to_string(),
            link_type: "cross-site".to_string(),
            inserted: false,
        };
        let json = serde_json::to_value(&link).unwrap_or_default();

        assert_eq!(json["type"], "cross-site");
    }
}
