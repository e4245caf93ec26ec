//! Site tree catalog.
//!
//! A site tree is `{base}/{domain}/{path}.html`. Scanning it yields every
//! titled page per domain and, through the keyword table, the topic
//! clusters the link planner works on.
//!
//! Pages are shared as [`Arc<Page>`] between the catalog, clusters and links.
//! Link counts are not stored on pages; they are derived from a link list
//! whenever needed, so they can never go stale.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use url::Url;
use walkdir::WalkDir;

use crate::encoding;
use crate::keywords::KeywordMap;

/// One HTML file of the site tree.
///
/// Equality and hashing use the URL only.
#[derive(Debug, Clone)]
pub struct Page {
    /// Canonical URL, `https://{domain}/{path}/`.
    pub url: String,
    /// Domain directory the file lives in.
    pub domain: String,
    /// Location on disk.
    pub file_path: PathBuf,
    /// Trimmed `<title>` text.
    pub title: String,
    /// Topic matched from the title, if any.
    pub topic: Option<String>,
}

impl Page {
    /// Build a page by hand.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        domain: impl Into<String>,
        file_path: impl Into<PathBuf>,
        title: impl Into<String>,
        topic: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            domain: domain.into(),
            file_path: file_path.into(),
            title: title.into(),
            topic,
        }
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Page {}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

/// Whether a link stays on one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkType {
    /// Source and target share a domain.
    #[serde(rename = "internal")]
    Internal,
    /// Source and target are on different domains.
    #[serde(rename = "cross-site")]
    CrossSite,
}

impl LinkType {
    /// Type of a link between two pages, from their domains.
    #[must_use]
    pub fn between(source: &Page, target: &Page) -> Self {
        if source.domain == target.domain {
            Self::Internal
        } else {
            Self::CrossSite
        }
    }

    /// Name used in exports: `internal` or `cross-site`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::CrossSite => "cross-site",
        }
    }
}

/// A planned link from one page to another.
///
/// Created without an anchor; the anchor is assigned after planning and
/// `inserted` flips to true once, when the link lands in the source file.
#[derive(Debug, Clone)]
pub struct Link {
    pub source: Arc<Page>,
    pub target: Arc<Page>,
    pub anchor: String,
    pub link_type: LinkType,
    pub inserted: bool,
    /// Diagnostic text, set when insertion fails.
    pub context: String,
}

impl Link {
    /// New uninserted link with an empty anchor.
    #[must_use]
    pub fn new(source: Arc<Page>, target: Arc<Page>, link_type: LinkType) -> Self {
        Self {
            source,
            target,
            anchor: String::new(),
            link_type,
            inserted: false,
            context: String::new(),
        }
    }

    /// Check whether the link crosses domains.
    #[must_use]
    pub fn is_cross_site(&self) -> bool {
        self.link_type == LinkType::CrossSite
    }
}

/// Pages sharing one topic, with the links planned between them.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub topic: String,
    pub pages: Vec<Arc<Page>>,
    pub links: Vec<Link>,
}

impl Cluster {
    /// Empty cluster for a topic.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Distinct domains of the cluster's pages.
    #[must_use]
    pub fn domains(&self) -> BTreeSet<&str> {
        self.pages.iter().map(|p| p.domain.as_str()).collect()
    }

    /// Pages grouped by domain, domains sorted, pages in cluster order.
    #[must_use]
    pub fn pages_by_domain(&self) -> BTreeMap<String, Vec<Arc<Page>>> {
        let mut grouped: BTreeMap<String, Vec<Arc<Page>>> = BTreeMap::new();
        for page in &self.pages {
            grouped
                .entry(page.domain.clone())
                .or_default()
                .push(Arc::clone(page));
        }
        grouped
    }

    /// Incoming and outgoing link counts per page URL, from `links`.
    ///
    /// Every page of the cluster is present, with zero when unlinked.
    #[must_use]
    pub fn link_counts(&self) -> (HashMap<&str, usize>, HashMap<&str, usize>) {
        let mut incoming: HashMap<&str, usize> =
            self.pages.iter().map(|p| (p.url.as_str(), 0)).collect();
        let mut outgoing = incoming.clone();
        for link in &self.links {
            *incoming.entry(link.target.url.as_str()).or_default() += 1;
            *outgoing.entry(link.source.url.as_str()).or_default() += 1;
        }
        (incoming, outgoing)
    }
}

/// Scanned site tree.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// `domain -> relative path -> page`, for every titled page.
    pub pages: BTreeMap<String, BTreeMap<String, Arc<Page>>>,
    /// `topic -> cluster`, for pages whose title matched a keyword.
    pub clusters: BTreeMap<String, Cluster>,
}

impl Catalog {
    /// Scan `{base}/{domain}/**/*.html`.
    ///
    /// Only directories directly under `base` count as domains. Files are
    /// visited in sorted order. Unreadable files, files without a `<title>`
    /// and paths that do not form a valid URL are skipped with a log line.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use rs_pbnkit::{Catalog, KeywordMap};
    ///
    /// let keywords = KeywordMap::from_json(r#"{"viagra": "viagra"}"#)?;
    /// let catalog = Catalog::scan(Path::new("sites"), &keywords);
    ///
    /// for (topic, cluster) in &catalog.clusters {
    ///     println!("{topic}: {} pages", cluster.pages.len());
    /// }
    /// # Ok::<(), rs_pbnkit::Error>(())
    /// ```
    #[must_use]
    pub fn scan(base: &Path, keywords: &KeywordMap) -> Self {
        let mut catalog = Self::default();

        if !base.is_dir() {
            log::error!("Directory not found: {}", base.display());
            return catalog;
        }

        for (domain, domain_path) in domain_dirs(base) {
            log::info!("Scanning domain: {domain}");

            for entry in WalkDir::new(&domain_path).sort_by_file_name() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::warn!("Skipping unreadable entry under {}: {e}", domain_path.display());
                        continue;
                    }
                };
                if !entry.file_type().is_file() || !has_html_extension(entry.path()) {
                    continue;
                }
                let Ok(rel) = entry.path().strip_prefix(&domain_path) else {
                    continue;
                };
                let rel_path = rel.to_string_lossy().replace('\\', "/");

                if let Some(page) = analyze_page(entry.path(), &domain, &rel_path, keywords) {
                    catalog.add(rel_path, page);
                }
            }
        }

        log::info!("Found {} clusters", catalog.clusters.len());
        for (topic, cluster) in &catalog.clusters {
            log::info!(
                "  {topic}: {} pages on {} domains",
                cluster.pages.len(),
                cluster.domains().len()
            );
        }
        catalog
    }

    fn add(&mut self, rel_path: String, page: Page) {
        let page = Arc::new(page);
        if let Some(topic) = &page.topic {
            self.clusters
                .entry(topic.clone())
                .or_insert_with(|| Cluster::new(topic.clone()))
                .pages
                .push(Arc::clone(&page));
        }
        self.pages
            .entry(page.domain.clone())
            .or_default()
            .insert(rel_path, page);
    }

    /// Number of titled pages across all domains.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.values().map(BTreeMap::len).sum()
    }
}

/// Immediate subdirectories of `base`, sorted by name.
fn domain_dirs(base: &Path) -> Vec<(String, PathBuf)> {
    let entries = match std::fs::read_dir(base) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Cannot list {}: {e}", base.display());
            return Vec::new();
        }
    };
    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    dirs.sort();
    dirs
}

fn has_html_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

/// `https://{domain}/{rel_path without .html}/`.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::catalog::page_url;
///
/// assert_eq!(
///     page_url("example.com", "blog/post.html").as_deref(),
///     Some("https://example.com/blog/post/")
/// );
/// assert_eq!(page_url("example.com", "index.html").as_deref(), Some("https://example.com/index/"));
/// ```
#[must_use]
pub fn page_url(domain: &str, rel_path: &str) -> Option<String> {
    let path = rel_path.replace('\\', "/");
    let path = path.strip_suffix(".html").unwrap_or(&path);
    match Url::parse(&format!("https://{domain}/{path}/")) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            log::warn!("No valid URL for {domain}/{rel_path}: {e}");
            None
        }
    }
}

/// Read one file into a [`Page`], or `None` if it must be skipped.
fn analyze_page(path: &Path, domain: &str, rel_path: &str, keywords: &KeywordMap) -> Option<Page> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Skipping {}: {e}", path.display());
            return None;
        }
    };
    let (html, _) = encoding::transcode_to_utf8(&bytes);

    let doc = dom_query::Document::from(html.as_str());
    let title = doc.select("title").first().text().trim().to_string();
    if title.is_empty() {
        log::debug!("Skipping {}: no title", path.display());
        return None;
    }

    let url = page_url(domain, rel_path)?;
    let topic = keywords.topic_for_title(&title).map(str::to_string);

    Some(Page::new(url, domain, path, title, topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, domain: &str) -> Arc<Page> {
        Arc::new(Page::new(url, domain, "/tmp/x.html", "t", None))
    }

    #[test]
    fn pages_compare_by_url() {
        let a = Page::new("https://a.com/x/", "a.com", "/one.html", "One", None);
        let b = Page::new("https://a.com/x/", "b.com", "/two.html", "Two", Some("t".into()));
        assert_eq!(a, b);
    }

    #[test]
    fn link_type_from_domains() {
        let a = page("https://a.com/1/", "a.com");
        let b = page("https://b.com/1/", "b.com");
        let a2 = page("https://a.com/2/", "a.com");

        assert_eq!(LinkType::between(&a, &b), LinkType::CrossSite);
        assert_eq!(LinkType::between(&a, &a2), LinkType::Internal);
        assert_eq!(LinkType::CrossSite.as_str(), "cross-site");
    }

    #[test]
    fn cluster_groups_by_sorted_domain() {
        let mut cluster = Cluster::new("t");
        cluster.pages = vec![
            page("https://b.com/1/", "b.com"),
            page("https://a.com/1/", "a.com"),
            page("https://b.com/2/", "b.com"),
        ];

        let grouped = cluster.pages_by_domain();
        let domains: Vec<&String> = grouped.keys().collect();
        assert_eq!(domains, vec!["a.com", "b.com"]);
        assert_eq!(grouped["b.com"].len(), 2);
        assert_eq!(cluster.domains().len(), 2);
    }

    #[test]
    fn link_counts_are_derived() {
        let a = page("https://a.com/1/", "a.com");
        let b = page("https://b.com/1/", "b.com");
        let mut cluster = Cluster::new("t");
        cluster.pages = vec![Arc::clone(&a), Arc::clone(&b)];
        cluster.links = vec![Link::new(Arc::clone(&a), Arc::clone(&b), LinkType::CrossSite)];

        let (incoming, outgoing) = cluster.link_counts();
        assert_eq!(incoming["https://b.com/1/"], 1);
        assert_eq!(incoming["https://a.com/1/"], 0);
        assert_eq!(outgoing["https://a.com/1/"], 1);
    }

    #[test]
    fn url_for_nested_path() {
        assert_eq!(
            page_url("site.net", "cat\\sub\\page.html").as_deref(),
            Some("https://site.net/cat/sub/page/")
        );
    }
}
