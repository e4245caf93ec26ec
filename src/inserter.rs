//! Link placement inside existing page text.
//!
//! A link is placed by splitting the leading text of a text block at a word
//! boundary and putting the `<a>` between the two halves. Child elements of
//! the block are never touched, so markup that was there before stays
//! intact. Each source file is read and written at most once per batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dom_query::Selection;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Link;
use crate::document::{assemble, ParsedPage, DEFAULT_DOCTYPE};
use crate::error::{Error, Result};
use crate::options::InsertOptions;
use crate::result::InsertStats;
use crate::selector::utils::contains_any;
use crate::{dom, encoding, etree};

/// Tags a link must never be placed under.
pub const FORBIDDEN_TAGS: &[&str] = &[
    "script", "style", "meta", "head", "link", "title", "button", "nav", "footer", "header",
    "menu", "aside", "code", "pre", "xmp", "noscript", "iframe", "object", "form", "input",
    "select", "textarea", "option", "label", "h1", "h2", "h3", "h4", "h5", "h6", "a",
];

/// Class/id substrings marking blocks that must not receive links.
pub const FORBIDDEN_PATTERNS: &[&str] = &[
    "comment",
    "reply",
    "login",
    "signup",
    "cookie",
    "popup",
    "modal",
    "copyright",
    "author-bio",
    "related-posts",
    "share-buttons",
    "widget-area",
    "ad-banner",
    "breadcrumbs",
];

/// Content containers, in priority order.
pub const CONTENT_SELECTORS: &[&str] = &[
    "div[class*='entry-content']",
    "div[class*='post-content']",
    "div[class*='article-content']",
    "div[class*='page-content']",
    "div[class*='text-content']",
    "div[class*='content-area']",
    "div[id*='content']",
    "section",
    "article",
    "main",
];

/// Elements that can host a link.
const CANDIDATE_TAGS: &str = "p, div, li, span, blockquote";

/// Ancestor levels checked for forbidden tags and patterns, the element
/// itself included.
const FORBIDDEN_DEPTH: usize = 6;

/// Text length above which a container match is preferred.
const CONTAINER_TEXT_THRESHOLD: usize = 500;

/// Fewest words a text block needs to be split.
const MIN_WORDS: usize = 6;

#[derive(Debug, Clone)]
enum Outcome {
    Inserted,
    Failed(String),
    Skipped,
}

struct Placement {
    html: Option<String>,
    outcomes: Vec<Outcome>,
}

/// Places planned links into their source documents.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rs_pbnkit::catalog::{Link, LinkType, Page};
/// use rs_pbnkit::inserter::LinkInserter;
///
/// let source = Arc::new(Page::new("https://a.com/x", "a.com", "x.html", "X", None));
/// let target = Arc::new(Page::new("https://b.com/y", "b.com", "y.html", "Y", None));
/// let mut link = Link::new(source, target, LinkType::CrossSite);
/// link.anchor = "buy here".to_string();
///
/// let html = "<html><head><title>X</title></head><body><article><p>\
///     one two three four five six seven eight nine ten eleven twelve thirteen fourteen\
///     </p></article></body></html>";
///
/// let inserter = LinkInserter::default();
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut links = [link];
/// let (out, stats) = inserter.insert_into_html(html, &mut links, &mut rng)?;
///
/// assert_eq!(stats.success, 1);
/// assert!(links[0].inserted);
/// assert!(out.expect("rewritten").contains(r#"<a href="https://b.com/y">buy here</a>"#));
/// # Ok::<(), rs_pbnkit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkInserter {
    options: InsertOptions,
}

impl LinkInserter {
    /// Inserter with the given options.
    #[must_use]
    pub fn new(options: InsertOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &InsertOptions {
        &self.options
    }

    /// Place every link in its source file, one file at a time.
    ///
    /// Per-file problems (missing or unreadable files, write errors) are
    /// logged and counted as failed for all links of that file; they never
    /// stop the batch. Links that land get `inserted = true`, the others get
    /// a diagnostic `context`.
    pub fn insert_links<R: Rng + ?Sized>(&self, links: &mut [Link], rng: &mut R) -> InsertStats {
        let mut seen = HashSet::new();
        let files: Vec<PathBuf> = links
            .iter()
            .map(|link| link.source.file_path.clone())
            .filter(|path| seen.insert(path.clone()))
            .collect();

        let mut stats = InsertStats::default();
        for path in &files {
            let mut group: Vec<&mut Link> = links
                .iter_mut()
                .filter(|link| &link.source.file_path == path)
                .collect();
            stats += self.process_file(path, &mut group, rng);
        }

        log::info!("Link insertion finished ({stats})");
        stats
    }

    /// Place links into an in-memory document.
    ///
    /// Returns the rewritten document, or `None` when nothing was placed,
    /// and the outcome counts. Links are updated like in
    /// [`LinkInserter::insert_links`].
    pub fn insert_into_html<R: Rng + ?Sized>(
        &self,
        raw_html: &str,
        links: &mut [Link],
        rng: &mut R,
    ) -> Result<(Option<String>, InsertStats)> {
        let placement = {
            let refs: Vec<&Link> = links.iter().collect();
            self.place_links(raw_html, &refs, "document", rng)?
        };
        let stats = apply_outcomes(links.iter_mut(), placement.outcomes);
        Ok((placement.html, stats))
    }

    fn process_file<R: Rng + ?Sized>(
        &self,
        path: &Path,
        links: &mut [&mut Link],
        rng: &mut R,
    ) -> InsertStats {
        let label = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        if !path.is_file() {
            log::warn!("Source file missing: {}", path.display());
            return fail_all(links, &format!("source file missing: {label}"));
        }

        match self.rewrite_file(path, links, &label, rng) {
            Ok(stats) => stats,
            Err(e) => {
                log::error!("Error processing {}: {e}", path.display());
                fail_all(links, &format!("error processing {label}: {e}"))
            }
        }
    }

    fn rewrite_file<R: Rng + ?Sized>(
        &self,
        path: &Path,
        links: &mut [&mut Link],
        label: &str,
        rng: &mut R,
    ) -> Result<InsertStats> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let (raw_html, detected) = encoding::transcode_to_utf8(&bytes);

        let placement = {
            let refs: Vec<&Link> = links.iter().map(|link| &**link).collect();
            self.place_links(&raw_html, &refs, label, rng)?
        };

        if let Some(html) = &placement.html {
            std::fs::write(path, encoding::encode(html, detected)).map_err(|e| Error::io(path, e))?;
            log::debug!("Wrote {} ({})", path.display(), detected.name());
        }

        Ok(apply_outcomes(
            links.iter_mut().map(|link| &mut **link),
            placement.outcomes,
        ))
    }

    /// Decide where each link goes and build the rewritten document.
    fn place_links<R: Rng + ?Sized>(
        &self,
        raw_html: &str,
        links: &[&Link],
        label: &str,
        rng: &mut R,
    ) -> Result<Placement> {
        let page = ParsedPage::parse(raw_html)?;
        let body = page.body();
        let container = find_link_container(&body);

        let mut candidates = self.find_candidates(&container, &body);
        if candidates.is_empty() {
            log::warn!("Skipped {label}: no suitable text elements found");
            return Ok(Placement {
                html: None,
                outcomes: vec![Outcome::Skipped; links.len()],
            });
        }
        candidates.shuffle(rng);

        let min_len = self.options.min_text_length;
        let mut outcomes = Vec::with_capacity(links.len());
        let mut cursor = 0;
        let mut inserted = 0;

        for link in links {
            if cursor >= candidates.len() {
                candidates.shuffle(rng);
                cursor = 0;
            }

            let max_attempts = self.options.max_attempts.min(candidates.len());
            let mut placed = false;
            for _ in 0..max_attempts {
                if cursor >= candidates.len() {
                    candidates.shuffle(rng);
                    cursor = 0;
                }
                if insert_single_link(&candidates[cursor], &link.target.url, &link.anchor, min_len, rng)
                {
                    placed = true;
                    break;
                }
                cursor += 1;
            }

            if !placed && self.options.append_fallback {
                placed = append_link(&container, &link.target.url, &link.anchor);
                if placed {
                    log::debug!("Appended fallback link {} in {label}", link.target.url);
                }
            }

            if placed {
                inserted += 1;
                outcomes.push(Outcome::Inserted);
            } else {
                log::warn!(
                    "Failed to insert link {} -> {} in {label}",
                    link.source.url,
                    link.target.url
                );
                outcomes.push(Outcome::Failed(format!(
                    "could not place link {} -> {} in {label}",
                    link.source.url, link.target.url
                )));
            }
            cursor += 1;
        }

        let html = (inserted > 0).then(|| {
            assemble(
                DEFAULT_DOCTYPE,
                page.head_raw().unwrap_or_default(),
                &page.body_html(),
            )
        });
        Ok(Placement { html, outcomes })
    }

    /// Text blocks that can host a link.
    ///
    /// Looks inside the container first, then at every `<p>` of the body,
    /// then at every `<div>`.
    fn find_candidates<'a>(&self, container: &Selection<'a>, body: &Selection<'a>) -> Vec<Selection<'a>> {
        let in_container: Vec<Selection<'a>> = dom::query_all(container, CANDIDATE_TAGS)
            .into_iter()
            .filter(|s| self.is_suitable(s))
            .collect();
        if !in_container.is_empty() {
            return in_container;
        }

        let paragraphs: Vec<Selection<'a>> = dom::query_all(body, "p")
            .into_iter()
            .filter(|s| self.is_suitable(s))
            .collect();
        if !paragraphs.is_empty() {
            log::debug!("No candidates in container, using body paragraphs");
            return paragraphs;
        }

        dom::query_all(body, "div")
            .into_iter()
            .filter(|s| self.is_suitable(s))
            .collect()
    }

    fn is_suitable(&self, sel: &Selection) -> bool {
        !is_forbidden(sel)
            && !dom::has_ancestor_tag(sel, "a")
            && etree::text(sel).trim().chars().count() >= self.options.min_text_length
    }
}

/// First match of the first matching content selector whose text exceeds
/// the threshold, else its first match, else the body.
fn find_link_container<'a>(body: &Selection<'a>) -> Selection<'a> {
    for css in CONTENT_SELECTORS {
        let matches = dom::query_all(body, css);
        if matches.is_empty() {
            continue;
        }
        let long = matches
            .iter()
            .position(|m| dom::text_content(m).chars().count() > CONTAINER_TEXT_THRESHOLD)
            .unwrap_or(0);
        log::debug!("Link container: {css}");
        return matches.into_iter().nth(long).unwrap_or_else(|| body.clone());
    }
    body.clone()
}

/// Check the element and its nearest ancestors for forbidden tags and
/// class/id patterns.
///
/// Only [`FORBIDDEN_DEPTH`] levels are checked, so a pattern on a distant
/// wrapper such as `<body>` does not disqualify the whole page.
#[must_use]
pub fn is_forbidden(sel: &Selection) -> bool {
    let mut current = sel.clone();
    for _ in 0..FORBIDDEN_DEPTH {
        if !current.exists() {
            break;
        }
        if dom::tag_name(&current).is_some_and(|t| FORBIDDEN_TAGS.contains(&t.as_str())) {
            return true;
        }
        if contains_any(&dom::class_id_lower(&current), FORBIDDEN_PATTERNS) {
            return true;
        }
        current = dom::parent(&current);
    }
    false
}

/// Split the element's leading text at a random word boundary and put a
/// link there.
///
/// Needs at least `min_text_length` characters and six words of leading
/// text. The split leaves at least two words before the link and three
/// after it. Returns whether the link was placed.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rs_pbnkit::{dom, etree};
/// use rs_pbnkit::inserter::insert_single_link;
///
/// let doc = dom::parse("<p>A B C D E F G<b>x</b></p>");
/// let p = doc.select("p");
/// let mut rng = StdRng::seed_from_u64(0);
///
/// assert!(insert_single_link(&p, "/t", "link", 5, &mut rng));
/// assert_eq!(p.select("b").text().to_string(), "x");
/// assert!(etree::text(&p).starts_with("A B"));
/// ```
pub fn insert_single_link<R: Rng + ?Sized>(
    elem: &Selection,
    target_url: &str,
    anchor: &str,
    min_text_length: usize,
    rng: &mut R,
) -> bool {
    let raw = etree::text(elem);
    if raw.trim().chars().count() < min_text_length {
        return false;
    }

    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.len() < MIN_WORDS {
        return false;
    }

    let pos = rng.random_range(2..=words.len() - 3);
    let mut before = words[..pos].join(" ");
    let mut after = words[pos..].join(" ");

    if let Some(lead) = raw.chars().next().filter(|c| matches!(c, ' ' | '\n' | '\t')) {
        before.insert(0, lead);
    }
    if !before.is_empty() && !before.ends_with(' ') {
        before.push(' ');
    }
    if !after.is_empty() && !after.starts_with(' ') {
        after.insert(0, ' ');
    }

    let Some(link) = dom::new_element(elem, "a") else {
        return false;
    };
    dom::set_attribute(&link, "href", target_url);
    etree::set_text(&link, anchor);

    etree::set_text(elem, &before);
    etree::insert_first_element(elem, &link);
    etree::set_tail(&link, &after);
    true
}

/// Append `<p><a href="..">..</a></p>` to the container.
fn append_link(container: &Selection, target_url: &str, anchor: &str) -> bool {
    let (Some(paragraph), Some(link)) = (
        dom::new_element(container, "p"),
        dom::new_element(container, "a"),
    ) else {
        return false;
    };
    dom::set_attribute(&link, "href", target_url);
    etree::set_text(&link, anchor);
    etree::append(&paragraph, &link);
    etree::append(container, &paragraph);
    true
}

fn fail_all(links: &mut [&mut Link], context: &str) -> InsertStats {
    for link in links.iter_mut() {
        link.context = context.to_string();
    }
    InsertStats {
        failed: links.len(),
        ..InsertStats::default()
    }
}

fn apply_outcomes<'l>(
    links: impl Iterator<Item = &'l mut Link>,
    outcomes: Vec<Outcome>,
) -> InsertStats {
    let mut stats = InsertStats::default();
    for (link, outcome) in links.zip(outcomes) {
        match outcome {
            Outcome::Inserted => {
                link.inserted = true;
                link.context.clear();
                stats.success += 1;
            }
            Outcome::Failed(context) => {
                link.context = context;
                stats.failed += 1;
            }
            Outcome::Skipped => {
                link.context = "no suitable text element".to_string();
                stats.skipped += 1;
            }
        }
    }
    stats
}
