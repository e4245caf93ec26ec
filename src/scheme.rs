//! Link topologies.
//!
//! Each scheme takes the pages of one cluster grouped by domain and returns
//! the planned [`Link`]s with empty anchors. Anchors are filled in
//! afterwards by [`assign_anchors`]. Every random choice draws from the
//! caller's RNG, so a seeded RNG reproduces the same plan.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::anchor::{AnchorCategory, AnchorMorpher, AnchorState};
use crate::catalog::{Link, LinkType, Page};
use crate::options::{Scheme, SchemeOptions};

/// Pages grouped by domain.
pub type PagesByDomain = BTreeMap<String, Vec<Arc<Page>>>;

/// Most links a single page gets in the mesh scheme.
const MESH_MAX_LINKS: usize = 5;

/// Anchor categories for links within one domain.
pub const INTERNAL_ANCHOR_WEIGHTS: [(AnchorCategory, u32); 3] = [
    (AnchorCategory::Commercial, 50),
    (AnchorCategory::Longtail, 30),
    (AnchorCategory::Branded, 20),
];

/// Anchor categories for links between domains.
pub const CROSS_SITE_ANCHOR_WEIGHTS: [(AnchorCategory, u32); 3] = [
    (AnchorCategory::Commercial, 60),
    (AnchorCategory::Longtail, 30),
    (AnchorCategory::Cta, 10),
];

/// Plan links for `scheme`.
pub fn build_links<R: Rng + ?Sized>(
    scheme: Scheme,
    pages_by_domain: &PagesByDomain,
    options: &SchemeOptions,
    rng: &mut R,
) -> Vec<Link> {
    log::debug!("Planning links with {scheme} scheme");
    match scheme {
        Scheme::Cluster => cluster(pages_by_domain, options),
        Scheme::Pyramid => pyramid(pages_by_domain, options, rng),
        Scheme::Mesh => mesh(pages_by_domain, options, rng),
        Scheme::HubSpoke => hub_spoke(pages_by_domain, options, rng),
    }
}

fn all_pages(pages_by_domain: &PagesByDomain) -> Vec<Arc<Page>> {
    pages_by_domain.values().flatten().cloned().collect()
}

/// Both directions for every pair of pages on the same domain.
fn push_internal_pairs(pages_by_domain: &PagesByDomain, links: &mut Vec<Link>) {
    for pages in pages_by_domain.values() {
        for (i, a) in pages.iter().enumerate() {
            for b in &pages[i + 1..] {
                links.push(Link::new(Arc::clone(a), Arc::clone(b), LinkType::Internal));
                links.push(Link::new(Arc::clone(b), Arc::clone(a), LinkType::Internal));
            }
        }
    }
}

/// Internal pairs plus balanced, capped cross-site links.
///
/// Every source links to the other-domain pages with the fewest incoming
/// cross-site links first. `external_links_per_page` caps both the outgoing
/// and the incoming cross-site count of every page. With
/// `ensure_full_coverage`, a page left without incoming cross-site links
/// gets one from the other-domain page with the fewest outgoing links, if
/// that donor is still under the cap. Otherwise the page stays uncovered and
/// a warning names it.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use std::sync::Arc;
/// use rs_pbnkit::catalog::Page;
/// use rs_pbnkit::options::SchemeOptions;
/// use rs_pbnkit::scheme::cluster;
///
/// let page = |domain: &str, n: u32| {
///     Arc::new(Page::new(format!("https://{domain}/{n}"), domain, "", "t", None))
/// };
/// let mut pages = BTreeMap::new();
/// pages.insert("a.com".to_string(), vec![page("a.com", 1), page("a.com", 2)]);
/// pages.insert("b.com".to_string(), vec![page("b.com", 1)]);
///
/// let links = cluster(&pages, &SchemeOptions::default());
/// assert_eq!(links.iter().filter(|l| !l.is_cross_site()).count(), 2);
/// assert!(links.iter().any(|l| l.is_cross_site() && l.target.domain == "b.com"));
/// ```
#[must_use]
pub fn cluster(pages_by_domain: &PagesByDomain, options: &SchemeOptions) -> Vec<Link> {
    let mut links = Vec::new();
    let all = all_pages(pages_by_domain);
    if all.len() < 2 {
        return links;
    }

    push_internal_pairs(pages_by_domain, &mut links);

    let domain_count = pages_by_domain.values().filter(|p| !p.is_empty()).count();
    if domain_count < 2 {
        if options.ensure_full_coverage {
            log::warn!(
                "Only one domain in cluster, cross-site coverage is impossible ({} pages)",
                all.len()
            );
        }
        return links;
    }

    let cap = options.external_links_per_page;
    let mut incoming: HashMap<&str, usize> = all.iter().map(|p| (p.url.as_str(), 0)).collect();
    let mut outgoing = incoming.clone();

    for source in &all {
        let mut candidates: Vec<&Arc<Page>> =
            all.iter().filter(|p| p.domain != source.domain).collect();
        let max_outgoing = cap.min(candidates.len());
        if max_outgoing == 0 {
            continue;
        }

        candidates.sort_by_key(|p| incoming[p.url.as_str()]);

        for target in candidates {
            if outgoing[source.url.as_str()] >= max_outgoing {
                break;
            }
            if incoming[target.url.as_str()] >= cap {
                continue;
            }
            links.push(Link::new(
                Arc::clone(source),
                Arc::clone(target),
                LinkType::CrossSite,
            ));
            *incoming.entry(target.url.as_str()).or_default() += 1;
            *outgoing.entry(source.url.as_str()).or_default() += 1;
        }
    }

    if options.ensure_full_coverage {
        for page in &all {
            if incoming[page.url.as_str()] > 0 {
                continue;
            }
            let mut donors: Vec<&Arc<Page>> = all
                .iter()
                .filter(|p| p.domain != page.domain && p.url != page.url)
                .collect();
            donors.sort_by_key(|p| outgoing[p.url.as_str()]);
            let Some(donor) = donors.first() else {
                continue;
            };
            if outgoing[donor.url.as_str()] >= cap {
                log::warn!(
                    "{} left without incoming cross-site links: every donor is at the cap of {cap}",
                    page.url
                );
                continue;
            }

            links.push(Link::new(
                Arc::clone(donor),
                Arc::clone(page),
                LinkType::CrossSite,
            ));
            *incoming.entry(page.url.as_str()).or_default() += 1;
            *outgoing.entry(donor.url.as_str()).or_default() += 1;
            log::debug!("Coverage link {} -> {}", donor.url, page.url);
        }
    }

    links
}

/// Three shuffled levels, each page linking to one random page a level up.
///
/// Top-level pages on different domains link to each other, and every
/// domain gets full internal linking. Fewer than three pages fall back to
/// [`cluster`].
pub fn pyramid<R: Rng + ?Sized>(
    pages_by_domain: &PagesByDomain,
    options: &SchemeOptions,
    rng: &mut R,
) -> Vec<Link> {
    let mut all = all_pages(pages_by_domain);
    if all.len() < 3 {
        return cluster(pages_by_domain, options);
    }

    all.shuffle(rng);

    let per_level = (all.len() / options.levels.max(1)).max(1);
    let top_len = (per_level / 2).max(1);
    let (top, rest) = all.split_at(top_len);
    let (middle, bottom) = rest.split_at(per_level.min(rest.len()));

    let mut links = Vec::new();
    let mut link_up = |level: &[Arc<Page>], above: &[Arc<Page>], rng: &mut R| {
        for page in level {
            if let Some(target) = above.choose(rng) {
                links.push(Link::new(
                    Arc::clone(page),
                    Arc::clone(target),
                    LinkType::between(page, target),
                ));
            }
        }
    };
    link_up(bottom, middle, rng);
    link_up(middle, top, rng);

    for (i, a) in top.iter().enumerate() {
        for b in &top[i + 1..] {
            if a.domain != b.domain {
                links.push(Link::new(Arc::clone(a), Arc::clone(b), LinkType::CrossSite));
            }
        }
    }

    push_internal_pairs(pages_by_domain, &mut links);
    links
}

/// Every page links to `min(5, density * others)` pages, at least one.
///
/// Other-domain targets come first, then same-domain ones, each group in
/// random order.
pub fn mesh<R: Rng + ?Sized>(
    pages_by_domain: &PagesByDomain,
    options: &SchemeOptions,
    rng: &mut R,
) -> Vec<Link> {
    let all = all_pages(pages_by_domain);
    let mut links = Vec::new();
    if all.len() < 2 {
        return links;
    }

    for source in &all {
        let (mut other_domain, mut same_domain): (Vec<&Arc<Page>>, Vec<&Arc<Page>>) = all
            .iter()
            .filter(|p| p.url != source.url)
            .partition(|p| p.domain != source.domain);

        let target_count = other_domain.len() + same_domain.len();
        let wanted = ((target_count as f64 * options.density) as usize)
            .max(1)
            .min(MESH_MAX_LINKS);

        other_domain.shuffle(rng);
        same_domain.shuffle(rng);

        for target in other_domain.into_iter().chain(same_domain).take(wanted) {
            links.push(Link::new(
                Arc::clone(source),
                Arc::clone(target),
                LinkType::between(source, target),
            ));
        }
    }

    links
}

/// Hub pages collect a cross-site link from every spoke.
///
/// The first page of each of the first `hub_count` domains is a hub. Each
/// hub links back to a random quarter of the spokes (at least one),
/// cross-site only, and every domain gets full internal linking.
pub fn hub_spoke<R: Rng + ?Sized>(
    pages_by_domain: &PagesByDomain,
    options: &SchemeOptions,
    rng: &mut R,
) -> Vec<Link> {
    let all = all_pages(pages_by_domain);
    let mut links = Vec::new();
    if all.len() < 2 {
        return links;
    }

    let mut hubs: Vec<Arc<Page>> = pages_by_domain
        .values()
        .take(options.hub_count)
        .filter_map(|pages| pages.first().cloned())
        .collect();
    if hubs.is_empty() {
        hubs.extend(all.first().cloned());
    }

    let spokes: Vec<Arc<Page>> = all.iter().filter(|p| !hubs.contains(p)).cloned().collect();

    for spoke in &spokes {
        for hub in &hubs {
            if spoke.domain != hub.domain {
                links.push(Link::new(Arc::clone(spoke), Arc::clone(hub), LinkType::CrossSite));
            }
        }
    }

    let backlinks = (spokes.len() / 4).max(1);
    for hub in &hubs {
        for spoke in spokes.choose_multiple(rng, backlinks) {
            if spoke.domain != hub.domain {
                links.push(Link::new(Arc::clone(hub), Arc::clone(spoke), LinkType::CrossSite));
            }
        }
    }

    push_internal_pairs(pages_by_domain, &mut links);
    links
}

/// Give every link an anchor from `morpher`.
///
/// The category is drawn per link from [`INTERNAL_ANCHOR_WEIGHTS`] or
/// [`CROSS_SITE_ANCHOR_WEIGHTS`].
pub fn assign_anchors<R: Rng + ?Sized>(
    links: &mut [Link],
    morpher: &AnchorMorpher,
    state: &mut AnchorState,
    rng: &mut R,
) {
    for link in links {
        let weights = match link.link_type {
            LinkType::Internal => &INTERNAL_ANCHOR_WEIGHTS,
            LinkType::CrossSite => &CROSS_SITE_ANCHOR_WEIGHTS,
        };
        let category = weights
            .choose_weighted(rng, |(_, weight)| *weight)
            .map_or(AnchorCategory::Commercial, |(category, _)| *category);
        link.anchor = morpher.get_anchor(state, rng, Some(category));
    }
}
