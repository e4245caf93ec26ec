//! Anchor text generation.
//!
//! An [`AnchorMorpher`] expands the template tables for one topic and its
//! synonyms into categorized pools, then serves random anchors from them.
//! Which anchors were already handed out lives in a separate
//! [`AnchorState`], owned by the caller, so one morpher can serve several
//! independent runs.

pub mod templates;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use regex::{NoExpand, Regex};

use self::templates::{
    ACTION_SYNONYMS, BRANDED, COMMERCIAL, COMPARISON, CONTEXTUAL, CTA, INFORMATIONAL, LONGTAIL,
    QUESTION, TAIL_SUFFIXES, TRANSITION_AFTER, TRANSITION_BEFORE,
};

/// Cap on tail-suffix combinations added to the commercial pool.
const MAX_TAIL_VARIATIONS: usize = 300;

/// Anchors per category that receive action-word variations.
const SYNONYM_SOURCE_LIMIT: usize = 20;

/// Replacements tried per action word.
const SYNONYMS_PER_WORD: usize = 2;

/// Kind of anchor text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorCategory {
    Commercial,
    Informational,
    Comparison,
    Branded,
    Longtail,
    Contextual,
    Question,
    Cta,
}

impl AnchorCategory {
    /// Every category, in pool order.
    pub const ALL: [Self; 8] = [
        Self::Commercial,
        Self::Informational,
        Self::Comparison,
        Self::Branded,
        Self::Longtail,
        Self::Contextual,
        Self::Question,
        Self::Cta,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::Informational => "informational",
            Self::Comparison => "comparison",
            Self::Branded => "branded",
            Self::Longtail => "longtail",
            Self::Contextual => "contextual",
            Self::Question => "question",
            Self::Cta => "cta",
        }
    }

    /// Category by name, `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    const fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Commercial => COMMERCIAL,
            Self::Informational => INFORMATIONAL,
            Self::Comparison => COMPARISON,
            Self::Branded => BRANDED,
            Self::Longtail => LONGTAIL,
            Self::Contextual => CONTEXTUAL,
            Self::Question => QUESTION,
            Self::Cta => CTA,
        }
    }
}

impl fmt::Display for AnchorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category weights for mixed picks.
pub const MIXED_WEIGHTS: [(AnchorCategory, u32); 8] = [
    (AnchorCategory::Commercial, 25),
    (AnchorCategory::Branded, 20),
    (AnchorCategory::Longtail, 15),
    (AnchorCategory::Informational, 15),
    (AnchorCategory::Contextual, 10),
    (AnchorCategory::Cta, 10),
    (AnchorCategory::Comparison, 3),
    (AnchorCategory::Question, 2),
];

/// Where a contextual anchor sits in its sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Leads the sentence, after a transition phrase.
    Start,
    /// Inside the sentence.
    #[default]
    Middle,
    /// Ends the sentence, followed by a transition phrase.
    End,
}

/// Anchors already handed out in one run, lowercased.
#[derive(Debug, Clone, Default)]
pub struct AnchorState {
    used: HashSet<String>,
}

impl AnchorState {
    /// Fresh state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every used anchor.
    pub fn reset(&mut self) {
        self.used.clear();
    }

    /// Number of distinct anchors handed out since the last reset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Check whether nothing was handed out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Check whether an anchor was handed out, ignoring case.
    #[must_use]
    pub fn contains(&self, anchor: &str) -> bool {
        self.used.contains(&anchor.to_lowercase())
    }
}

static ACTION_PATTERNS: LazyLock<Vec<(&'static str, Regex, &'static [&'static str])>> =
    LazyLock::new(|| {
        ACTION_SYNONYMS
            .iter()
            .filter_map(|(word, synonyms)| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
                    .ok()
                    .map(|re| (*word, re, *synonyms))
            })
            .collect()
    });

/// First letter upper case, the rest lower case.
fn capitalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Append anchors not already in `pool`, ignoring case.
fn extend_unique(pool: &mut Vec<String>, anchors: impl IntoIterator<Item = String>) {
    let mut seen: HashSet<String> = pool.iter().map(|a| a.to_lowercase()).collect();
    pool.extend(anchors.into_iter().filter(|a| seen.insert(a.to_lowercase())));
}

/// Categorized anchor pools for one topic.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rs_pbnkit::anchor::{AnchorCategory, AnchorMorpher, AnchorState};
///
/// let morpher = AnchorMorpher::new("viagra", &["sildenafil".to_string()]);
/// let mut state = AnchorState::new();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let a = morpher.get_anchor(&mut state, &mut rng, Some(AnchorCategory::Commercial));
/// let b = morpher.get_anchor(&mut state, &mut rng, Some(AnchorCategory::Commercial));
/// assert_ne!(a.to_lowercase(), b.to_lowercase());
/// ```
#[derive(Debug, Clone)]
pub struct AnchorMorpher {
    topic: String,
    display: String,
    pools: BTreeMap<AnchorCategory, Vec<String>>,
}

impl AnchorMorpher {
    /// Build the pools for `topic` and its synonyms.
    #[must_use]
    pub fn new(topic: &str, synonyms: &[String]) -> Self {
        let topic_lower = topic.to_lowercase();
        let mut names = vec![topic_lower.clone()];
        names.extend(synonyms.iter().map(|s| s.to_lowercase()));

        let mut morpher = Self {
            display: capitalize(&topic_lower),
            topic: topic_lower,
            pools: BTreeMap::new(),
        };

        for category in AnchorCategory::ALL {
            let mut pool = Vec::new();
            extend_unique(
                &mut pool,
                names.iter().flat_map(|name| {
                    let display = capitalize(name);
                    category
                        .templates()
                        .iter()
                        .map(move |tpl| tpl.replace("{drug}", &display))
                }),
            );
            morpher.pools.insert(category, pool);
        }

        morpher.add_tail_suffix_variations(&names);
        morpher.add_synonym_variations();
        morpher.add_lsi_variations();

        log::debug!(
            "Built anchor pool for {}: {} variants",
            morpher.topic,
            morpher.pool_size()
        );
        morpher
    }

    /// Lowercased topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Capitalized topic, the anchor of last resort.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display
    }

    /// Anchors of one category.
    #[must_use]
    pub fn pool(&self, category: AnchorCategory) -> &[String] {
        self.pools.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Number of anchors across all categories.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    /// Number of distinct anchors across all categories, ignoring case.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.pools
            .values()
            .flatten()
            .map(|a| a.to_lowercase())
            .collect::<HashSet<_>>()
            .len()
    }

    /// `buy X` / `order X` / `X for sale` combined with every tail suffix.
    fn add_tail_suffix_variations(&mut self, names: &[String]) {
        let mut seen: HashSet<String> = self
            .pool(AnchorCategory::Commercial)
            .iter()
            .map(|a| a.to_lowercase())
            .collect();
        let mut extra = Vec::new();

        'roots: for name in names {
            let display = capitalize(name);
            let roots = [
                format!("buy {display}"),
                format!("order {display}"),
                format!("{display} for sale"),
            ];
            for root in &roots {
                for tail in TAIL_SUFFIXES {
                    let combo = format!("{root} {tail}").trim().to_string();
                    if seen.insert(combo.to_lowercase()) {
                        extra.push(combo);
                        if extra.len() >= MAX_TAIL_VARIATIONS {
                            break 'roots;
                        }
                    }
                }
            }
        }

        if let Some(pool) = self.pools.get_mut(&AnchorCategory::Commercial) {
            pool.extend(extra);
        }
    }

    /// Swap action words ("buy", "cheap", ...) for their synonyms.
    fn add_synonym_variations(&mut self) {
        let mut additions: Vec<(AnchorCategory, String)> = Vec::new();

        for (category, anchors) in &self.pools {
            for anchor in anchors.iter().take(SYNONYM_SOURCE_LIMIT) {
                let lower = anchor.to_lowercase();
                for (word, pattern, synonyms) in ACTION_PATTERNS.iter() {
                    if !lower.contains(word) {
                        continue;
                    }
                    for synonym in synonyms.iter().take(SYNONYMS_PER_WORD) {
                        let variant = pattern.replace_all(anchor, NoExpand(synonym));
                        if variant != anchor.as_str() {
                            additions.push((*category, variant.into_owned()));
                        }
                    }
                }
            }
        }

        for (category, anchor) in additions {
            if let Some(pool) = self.pools.get_mut(&category) {
                extend_unique(pool, [anchor]);
            }
        }
    }

    /// Related-term phrases for known topics.
    fn add_lsi_variations(&mut self) {
        let terms = templates::lsi_terms(&self.topic);
        if terms.is_empty() {
            return;
        }
        let display = &self.display;
        let lsi: Vec<String> = terms
            .iter()
            .flat_map(|term| {
                [
                    format!("{display} {term}"),
                    format!("{term} with {display}"),
                    format!("{display} for {term}"),
                    format!("best {term} {display}"),
                ]
            })
            .collect();
        if let Some(pool) = self.pools.get_mut(&AnchorCategory::Informational) {
            extend_unique(pool, lsi);
        }
    }

    /// Random anchor, avoiding ones already in `state`.
    ///
    /// `None` picks a category by [`MIXED_WEIGHTS`]. When every anchor of the
    /// pool was used, the state is reset and the whole pool is available
    /// again. An empty pool yields the capitalized topic.
    pub fn get_anchor<R: Rng + ?Sized>(
        &self,
        state: &mut AnchorState,
        rng: &mut R,
        category: Option<AnchorCategory>,
    ) -> String {
        self.pick(Some(state), rng, category)
    }

    /// Random anchor without repeat tracking.
    pub fn get_any_anchor<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<AnchorCategory>,
    ) -> String {
        self.pick(None, rng, category)
    }

    /// Anchor by category name.
    ///
    /// `"mixed"` picks by weight; unknown names use the branded pool.
    pub fn get_anchor_named<R: Rng + ?Sized>(
        &self,
        state: &mut AnchorState,
        rng: &mut R,
        name: &str,
    ) -> String {
        let category = if name == "mixed" {
            None
        } else {
            Some(AnchorCategory::from_name(name).unwrap_or_else(|| {
                log::debug!("Unknown anchor category {name:?}, using branded");
                AnchorCategory::Branded
            }))
        };
        self.get_anchor(state, rng, category)
    }

    fn pick<R: Rng + ?Sized>(
        &self,
        state: Option<&mut AnchorState>,
        rng: &mut R,
        category: Option<AnchorCategory>,
    ) -> String {
        let category = category.unwrap_or_else(|| weighted_category(rng));
        let pool = self.pool(category);

        let anchor = match state {
            Some(state) => {
                let mut available: Vec<&String> = pool
                    .iter()
                    .filter(|a| !state.used.contains(&a.to_lowercase()))
                    .collect();
                if available.is_empty() {
                    state.reset();
                    available = pool.iter().collect();
                }
                let anchor = available.choose(rng).map(|a| (*a).clone());
                if let Some(anchor) = &anchor {
                    state.used.insert(anchor.to_lowercase());
                }
                anchor
            }
            None => pool.choose(rng).cloned(),
        };

        anchor.unwrap_or_else(|| self.display.clone())
    }

    /// Anchor matched to the surrounding text, plus the phrase to insert.
    ///
    /// The category follows keywords in `surrounding_text`. A middle
    /// position gets a short contextual anchor as-is; start and end wrap the
    /// anchor in a transition phrase.
    pub fn contextual_anchor<R: Rng + ?Sized>(
        &self,
        state: &mut AnchorState,
        rng: &mut R,
        surrounding_text: &str,
        position: Position,
    ) -> (String, String) {
        if position == Position::Middle {
            let anchor = self.get_anchor(state, rng, Some(AnchorCategory::Contextual));
            return (anchor.clone(), anchor);
        }

        let category = context_category(surrounding_text);
        let anchor = self.get_anchor(state, rng, Some(category));

        let full = if position == Position::Start {
            let transition = TRANSITION_BEFORE.choose(rng).copied().unwrap_or_default();
            format!("{transition} {}", anchor.to_lowercase())
        } else {
            let transition = TRANSITION_AFTER.choose(rng).copied().unwrap_or_default();
            format!("{anchor} {transition}")
        };
        (anchor, full.trim().to_string())
    }

    /// Up to `count` distinct anchors, one per category first.
    ///
    /// Stops early once a bounded number of draws produced nothing new, so a
    /// request larger than the pool returns fewer anchors instead of looping.
    pub fn get_diverse_anchors<R: Rng + ?Sized>(
        &self,
        state: &mut AnchorState,
        rng: &mut R,
        count: usize,
    ) -> Vec<String> {
        let mut anchors: Vec<String> = Vec::with_capacity(count);

        let mut categories = AnchorCategory::ALL;
        categories.shuffle(rng);
        for category in categories {
            if anchors.len() >= count {
                break;
            }
            let anchor = self.get_anchor(state, rng, Some(category));
            if !anchors.contains(&anchor) {
                anchors.push(anchor);
            }
        }

        let max_draws = count.saturating_mul(10).max(self.pool_size());
        let mut draws = 0;
        while anchors.len() < count && draws < max_draws {
            draws += 1;
            let anchor = self.get_anchor(state, rng, None);
            if !anchors.contains(&anchor) {
                anchors.push(anchor);
            }
        }

        anchors.truncate(count);
        anchors
    }
}

fn weighted_category<R: Rng + ?Sized>(rng: &mut R) -> AnchorCategory {
    MIXED_WEIGHTS
        .choose_weighted(rng, |(_, weight)| *weight)
        .map_or(AnchorCategory::Commercial, |(category, _)| *category)
}

fn context_category(text: &str) -> AnchorCategory {
    let lower = text.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has_any(&["buy", "order", "purchase", "price", "cost", "cheap"]) {
        AnchorCategory::Commercial
    } else if has_any(&["how", "what", "why", "effect", "work", "dose"]) {
        AnchorCategory::Informational
    } else if has_any(&["vs", "compare", "better", "alternative"]) {
        AnchorCategory::Comparison
    } else {
        AnchorCategory::Contextual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn morpher() -> AnchorMorpher {
        AnchorMorpher::new("viagra", &["sildenafil".to_string()])
    }

    #[test]
    fn capitalize_lowers_the_rest() {
        assert_eq!(capitalize("sILDENAFIL"), "Sildenafil");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn pools_use_topic_and_synonyms() {
        let m = morpher();
        let commercial = m.pool(AnchorCategory::Commercial);

        assert!(commercial.iter().any(|a| a == "buy Viagra online"));
        assert!(commercial.iter().any(|a| a == "buy Sildenafil online"));
        assert!(commercial.iter().any(|a| a == "buy Viagra usa to usa"));
    }

    #[test]
    fn pools_hold_no_repeated_anchor() {
        let m = morpher();
        for category in AnchorCategory::ALL {
            let pool = m.pool(category);
            let distinct: HashSet<String> = pool.iter().map(|a| a.to_lowercase()).collect();
            assert_eq!(distinct.len(), pool.len(), "{category:?}");
        }
        let cheap = m
            .pool(AnchorCategory::Commercial)
            .iter()
            .filter(|a| *a == "cheap Viagra online")
            .count();
        assert_eq!(cheap, 1);
    }

    #[test]
    fn tail_variations_are_capped() {
        let m = morpher();
        let tails = m
            .pool(AnchorCategory::Commercial)
            .iter()
            .filter(|a| a.starts_with("Viagra for sale ") || a.starts_with("Sildenafil for sale "))
            .count();
        // 2 names x 3 roots x 58 suffixes = 348 combos, capped at 300.
        assert!(tails <= MAX_TAIL_VARIATIONS);
    }

    #[test]
    fn synonym_variations_replace_whole_words() {
        let m = morpher();
        let commercial = m.pool(AnchorCategory::Commercial);

        assert!(commercial.iter().any(|a| a == "purchase Viagra online"));
        assert!(commercial.iter().any(|a| a == "buy Viagra on the internet"));
    }

    #[test]
    fn lsi_variations_for_known_topic() {
        let m = morpher();
        let info = m.pool(AnchorCategory::Informational);
        assert!(info.iter().any(|a| a == "sildenafil with Viagra"));

        let unknown = AnchorMorpher::new("zzz", &[]);
        assert_eq!(unknown.pool(AnchorCategory::Informational).len(), INFORMATIONAL.len());
    }

    #[test]
    fn seeded_sequences_repeat() {
        let m = morpher();
        let draw = |seed| {
            let mut state = AnchorState::new();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| m.get_anchor(&mut state, &mut rng, None))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn exhausted_pool_resets_state() {
        let m = AnchorMorpher::new("zzz", &[]);
        let pool_len = m.pool(AnchorCategory::Question).len();
        let mut state = AnchorState::new();
        let mut rng = StdRng::seed_from_u64(1);

        let first: HashSet<String> = (0..pool_len)
            .map(|_| m.get_anchor(&mut state, &mut rng, Some(AnchorCategory::Question)))
            .collect();
        assert_eq!(first.len(), pool_len);

        let again = m.get_anchor(&mut state, &mut rng, Some(AnchorCategory::Question));
        assert!(first.contains(&again));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn unknown_category_name_uses_branded() {
        let m = morpher();
        let mut state = AnchorState::new();
        let mut rng = StdRng::seed_from_u64(3);

        let anchor = m.get_anchor_named(&mut state, &mut rng, "nonsense");
        assert!(m.pool(AnchorCategory::Branded).contains(&anchor));
    }

    #[test]
    fn contextual_positions() {
        let m = morpher();
        let mut state = AnchorState::new();
        let mut rng = StdRng::seed_from_u64(5);

        let (anchor, full) = m.contextual_anchor(&mut state, &mut rng, "x", Position::Middle);
        assert_eq!(anchor, full);
        assert!(m.pool(AnchorCategory::Contextual).contains(&anchor));

        let (anchor, full) =
            m.contextual_anchor(&mut state, &mut rng, "best price to buy", Position::Start);
        assert!(m.pool(AnchorCategory::Commercial).contains(&anchor));
        assert!(full.ends_with(&anchor.to_lowercase()));

        let (anchor, full) = m.contextual_anchor(&mut state, &mut rng, "", Position::End);
        assert!(full.starts_with(&anchor));
        assert!(full.len() > anchor.len());
    }

    #[test]
    fn diverse_anchors_are_distinct_and_bounded() {
        let m = AnchorMorpher::new("zzz", &[]);
        let mut state = AnchorState::new();
        let mut rng = StdRng::seed_from_u64(9);

        let anchors = m.get_diverse_anchors(&mut state, &mut rng, 12);
        let unique: HashSet<&String> = anchors.iter().collect();
        assert_eq!(anchors.len(), 12);
        assert_eq!(unique.len(), 12);

        let too_many = m.get_diverse_anchors(&mut state, &mut rng, m.pool_size() + 50);
        assert!(too_many.len() <= m.pool_size());
    }
}
