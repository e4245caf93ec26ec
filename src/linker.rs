//! End-to-end link pipeline over a site tree.
//!
//! [`ClusterLinker`] ties the pieces together: scan the tree into topic
//! clusters, plan links per cluster with a scheme, give them anchors, place
//! them into the files, then report coverage or export the plan as JSON.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::anchor::{AnchorMorpher, AnchorState};
use crate::catalog::{Catalog, Cluster};
use crate::coverage;
use crate::error::{Error, Result};
use crate::inserter::LinkInserter;
use crate::keywords::KeywordMap;
use crate::options::{InsertOptions, Scheme, SchemeOptions};
use crate::result::{CoverageReport, InsertStats, LinkPlan, PlanCluster, PlanLink, PlanPage};
use crate::scheme;

/// Characters of an anchor shown in the links summary.
const SUMMARY_ANCHOR_CHARS: usize = 50;

/// Example links shown per topic in the links summary.
const SUMMARY_EXAMPLES: usize = 3;

/// Scan, plan, insert and report for one site tree.
///
/// # Example
///
/// ```rust,no_run
/// use rs_pbnkit::{ClusterLinker, KeywordMap, Scheme, SchemeOptions};
///
/// let keywords = KeywordMap::from_json(r#"{"sildenafil": "viagra", "viagra": "viagra"}"#)?;
/// let mut linker = ClusterLinker::new("sites", keywords).with_seed(42);
///
/// linker.build_clusters();
/// linker.create_links(Some("viagra"), Scheme::Cluster, &SchemeOptions::default());
/// let stats = linker.insert_all_links();
///
/// println!("{stats}");
/// println!("{}", linker.coverage_report_text(None));
/// linker.export_links_json("plan.json".as_ref())?;
/// # Ok::<(), rs_pbnkit::Error>(())
/// ```
pub struct ClusterLinker {
    base_dir: PathBuf,
    keywords: KeywordMap,
    inserter: LinkInserter,
    catalog: Catalog,
    planned: Vec<String>,
    rng: StdRng,
}

impl ClusterLinker {
    /// Linker over `base_dir` with default insert options and an
    /// entropy-seeded RNG.
    pub fn new(base_dir: impl Into<PathBuf>, keywords: KeywordMap) -> Self {
        Self {
            base_dir: base_dir.into(),
            keywords,
            inserter: LinkInserter::default(),
            catalog: Catalog::default(),
            planned: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed seed, so planning and insertion repeat exactly.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Use custom insert options.
    #[must_use]
    pub fn with_insert_options(mut self, options: InsertOptions) -> Self {
        self.inserter = LinkInserter::new(options);
        self
    }

    /// Root of the site tree.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The scanned catalog (empty before [`ClusterLinker::build_clusters`]).
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Topic clusters by name.
    #[must_use]
    pub fn clusters(&self) -> &BTreeMap<String, Cluster> {
        &self.catalog.clusters
    }

    /// Scan the site tree and rebuild every cluster.
    pub fn build_clusters(&mut self) -> &BTreeMap<String, Cluster> {
        self.catalog = Catalog::scan(&self.base_dir, &self.keywords);
        self.planned.clear();
        &self.catalog.clusters
    }

    /// Plan links for one topic, or for every cluster when `topic` is `None`.
    ///
    /// Replaces the previous plan of each planned cluster. Returns the
    /// number of links planned; an unknown topic plans nothing.
    pub fn create_links(
        &mut self,
        topic: Option<&str>,
        scheme: Scheme,
        options: &SchemeOptions,
    ) -> usize {
        if self.catalog.clusters.is_empty() {
            log::warn!("No clusters built, call build_clusters() first");
            return 0;
        }

        self.planned.clear();
        let topics: Vec<String> = match topic {
            Some(topic) if self.catalog.clusters.contains_key(topic) => vec![topic.to_string()],
            Some(topic) => {
                log::error!("Cluster not found: {topic}");
                return 0;
            }
            None => self.catalog.clusters.keys().cloned().collect(),
        };

        topics
            .iter()
            .filter_map(|topic| self.plan_cluster(topic, scheme, options))
            .sum()
    }

    /// Plan links for one cluster by scheme name.
    ///
    /// Unknown scheme names fall back to the cluster scheme with a warning.
    pub fn build_links_for_cluster(
        &mut self,
        topic: &str,
        scheme_name: &str,
        options: &SchemeOptions,
    ) -> usize {
        let scheme = scheme_name.parse::<Scheme>().unwrap_or_else(|_| {
            log::warn!("Unknown scheme: {scheme_name}, using cluster");
            Scheme::Cluster
        });
        self.plan_cluster(topic, scheme, options).unwrap_or(0)
    }

    fn plan_cluster(&mut self, topic: &str, scheme: Scheme, options: &SchemeOptions) -> Option<usize> {
        let synonyms = self.keywords.synonyms_for(topic);
        let Some(cluster) = self.catalog.clusters.get_mut(topic) else {
            log::error!("Cluster not found: {topic}");
            return None;
        };

        let mut links = scheme::build_links(scheme, &cluster.pages_by_domain(), options, &mut self.rng);

        let morpher = AnchorMorpher::new(topic, &synonyms);
        let mut state = AnchorState::new();
        scheme::assign_anchors(&mut links, &morpher, &mut state, &mut self.rng);

        let cross_site = links.iter().filter(|l| l.is_cross_site()).count();
        log::info!(
            "Cluster {topic}: {} links ({} internal, {cross_site} cross-site)",
            links.len(),
            links.len() - cross_site
        );

        let count = links.len();
        cluster.links = links;
        if !self.planned.iter().any(|t| t == topic) {
            self.planned.push(topic.to_string());
        }
        Some(count)
    }

    /// Topics planned by the last [`ClusterLinker::create_links`] call.
    #[must_use]
    pub fn planned_topics(&self) -> &[String] {
        &self.planned
    }

    /// Number of links in the current plan.
    #[must_use]
    pub fn planned_link_count(&self) -> usize {
        self.planned
            .iter()
            .filter_map(|topic| self.catalog.clusters.get(topic))
            .map(|cluster| cluster.links.len())
            .sum()
    }

    /// Place every planned link into its source file.
    ///
    /// `inserted` and `context` are recorded on the cluster links.
    pub fn insert_all_links(&mut self) -> InsertStats {
        if self.planned_link_count() == 0 {
            log::warn!("No links to insert, call create_links() first");
            return InsertStats::default();
        }

        let mut stats = InsertStats::default();
        for topic in &self.planned {
            if let Some(cluster) = self.catalog.clusters.get_mut(topic) {
                log::info!("Inserting {} links for {topic}", cluster.links.len());
                stats += self.inserter.insert_links(&mut cluster.links, &mut self.rng);
            }
        }
        stats
    }

    /// Coverage per topic, for one topic or all of them.
    #[must_use]
    pub fn coverage(&self, topic: Option<&str>) -> BTreeMap<String, CoverageReport> {
        self.catalog
            .clusters
            .iter()
            .filter(|(name, _)| topic.is_none_or(|t| t == name.as_str()))
            .map(|(name, cluster)| (name.clone(), coverage::analyze(cluster)))
            .collect()
    }

    /// Text coverage reports, one block per topic.
    #[must_use]
    pub fn coverage_report_text(&self, topic: Option<&str>) -> String {
        self.coverage(topic)
            .iter()
            .map(|(name, report)| coverage::report_text(report, name))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Page and link counts per topic with a few example links.
    #[must_use]
    pub fn links_summary(&self) -> String {
        LinksSummary(&self.catalog).to_string()
    }

    /// The link plan of every cluster.
    ///
    /// `total_links` counts the links of the current plan only.
    #[must_use]
    pub fn link_plan(&self) -> LinkPlan {
        let clusters = self
            .catalog
            .clusters
            .iter()
            .map(|(topic, cluster)| (topic.clone(), cluster_plan(cluster)))
            .collect();

        LinkPlan {
            clusters,
            total_links: self.planned_link_count(),
        }
    }

    /// Write the link plan as pretty-printed JSON.
    pub fn export_links_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.link_plan())?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
        log::info!("Links exported to {}", path.display());
        Ok(())
    }
}

fn cluster_plan(cluster: &Cluster) -> PlanCluster {
    let (incoming, outgoing) = cluster.link_counts();
    let count = |counts: &HashMap<&str, usize>, url: &str| {
        counts.get(url).copied().unwrap_or(0)
    };

    PlanCluster {
        pages: cluster
            .pages
            .iter()
            .map(|page| PlanPage {
                url: page.url.clone(),
                domain: page.domain.clone(),
                title: page.title.clone(),
                incoming: count(&incoming, &page.url),
                outgoing: count(&outgoing, &page.url),
            })
            .collect(),
        links: cluster
            .links
            .iter()
            .map(|link| PlanLink {
                source: link.source.url.clone(),
                target: link.target.url.clone(),
                anchor: link.anchor.clone(),
                link_type: link.link_type.as_str().to_string(),
                inserted: link.inserted,
            })
            .collect(),
    }
}

/// Text view of the planned links of a catalog.
struct LinksSummary<'a>(&'a Catalog);

impl fmt::Display for LinksSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{rule}")?;
        writeln!(f, "  LINK SUMMARY")?;
        write!(f, "{rule}")?;

        for (topic, cluster) in &self.0.clusters {
            write!(f, "\n\n{}", topic.to_uppercase())?;
            write!(f, "\n   Pages: {}", cluster.pages.len())?;
            write!(f, "\n   Links: {}", cluster.links.len())?;
            if cluster.links.is_empty() {
                continue;
            }
            write!(f, "\n   Examples:")?;
            for link in cluster.links.iter().take(SUMMARY_EXAMPLES) {
                let anchor: String = link.anchor.chars().take(SUMMARY_ANCHOR_CHARS).collect();
                write!(
                    f,
                    "\n   - {} -> {}\n     Anchor: {anchor}...",
                    link.source.domain, link.target.domain
                )?;
            }
        }
        Ok(())
    }
}
