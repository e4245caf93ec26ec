//! Configuration for content splicing, link planning and link insertion.
//!
//! All structs have public fields and a `Default` impl, so callers only spell
//! out the fields they want to change.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a rewritten document is encoded when written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    /// Write back in the encoding detected when the file was read.
    #[default]
    Preserve,
    /// Always write UTF-8 and rewrite `<meta charset>` declarations to match.
    ForceUtf8,
}

/// Options for the content engine.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::{OutputEncoding, SpliceOptions};
///
/// let options = SpliceOptions {
///     output_encoding: OutputEncoding::ForceUtf8,
///     ..SpliceOptions::default()
/// };
/// assert_eq!(options.wrapper_paragraph_ratio, 0.7);
/// ```
#[derive(Debug, Clone)]
pub struct SpliceOptions {
    /// Encoding used by [`crate::splice::replace_file`] on write.
    ///
    /// Default: `OutputEncoding::Preserve`
    pub output_encoding: OutputEncoding,

    /// Share of the container's `<p>` elements a child `<div>` must hold to
    /// be treated as the inner text wrapper.
    ///
    /// Default: `0.7`
    pub wrapper_paragraph_ratio: f64,
}

impl Default for SpliceOptions {
    fn default() -> Self {
        Self {
            output_encoding: OutputEncoding::Preserve,
            wrapper_paragraph_ratio: 0.7,
        }
    }
}

/// Link topology used to connect the pages of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Full internal linking plus capped, balanced cross-site links.
    #[default]
    Cluster,
    /// Three shuffled levels linking upwards.
    Pyramid,
    /// Every page links to a density-dependent number of others.
    Mesh,
    /// Hub pages collect links from every spoke.
    HubSpoke,
}

impl Scheme {
    /// All schemes, in the order they are offered to users.
    pub const ALL: [Scheme; 4] = [Self::Cluster, Self::Pyramid, Self::Mesh, Self::HubSpoke];

    /// Snake-case name of the scheme.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Pyramid => "pyramid",
            Self::Mesh => "mesh",
            Self::HubSpoke => "hub_spoke",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cluster" => Ok(Self::Cluster),
            "pyramid" => Ok(Self::Pyramid),
            "mesh" => Ok(Self::Mesh),
            "hub_spoke" | "hub-spoke" => Ok(Self::HubSpoke),
            _ => Err(Error::UnknownScheme(s.to_string())),
        }
    }
}

/// Parameters shared by the link schemes.
///
/// Each scheme reads only the fields it needs.
#[derive(Debug, Clone)]
pub struct SchemeOptions {
    /// Cross-site links per page, used as both the outgoing and incoming cap
    /// of the cluster scheme.
    ///
    /// Default: `2`
    pub external_links_per_page: usize,

    /// Give every page without incoming cross-site links one more link after
    /// the balancing pass (cluster scheme).
    ///
    /// Default: `true`
    pub ensure_full_coverage: bool,

    /// Number of pyramid levels the page count is divided by.
    ///
    /// Default: `3`
    pub levels: usize,

    /// Fraction of the other pages each page links to (mesh scheme).
    ///
    /// Default: `0.3`
    pub density: f64,

    /// Number of domains contributing a hub page (hub-and-spoke scheme).
    ///
    /// Default: `1`
    pub hub_count: usize,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self {
            external_links_per_page: 2,
            ensure_full_coverage: true,
            levels: 3,
            density: 0.3,
            hub_count: 1,
        }
    }
}

/// Options for placing planned links into HTML files.
#[derive(Debug, Clone)]
pub struct InsertOptions {
    /// Minimum length of an element's own leading text to host a link.
    ///
    /// Default: `50`
    pub min_text_length: usize,

    /// Candidates tried per link before it counts as failed.
    ///
    /// Default: `20`
    pub max_attempts: usize,

    /// Append `<p><a>..</a></p>` to the content container when no text
    /// element could host the link.
    ///
    /// Default: `false`
    pub append_fallback: bool,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            max_attempts: 20,
            append_fallback: false,
        }
    }
}
