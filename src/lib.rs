//! # rs-pbnkit
//!
//! Content splicing and cross-site link planning for trees of rendered
//! WordPress sites.
//!
//! The crate works on static HTML exported from WordPress themes. It finds
//! the theme's content (or post listing) container, swaps the article body
//! for new content while keeping the `<head>` byte for byte, groups pages of
//! many sites into topic clusters, plans links between them with one of four
//! topologies, and writes those links into natural text positions.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_pbnkit::replace_content;
//!
//! let html = r#"<!DOCTYPE html><html><head><title>Old</title></head>
//! <body><article class="post"><h1 class="entry-title">Old</h1>
//! <div class="entry-content"><p>Old text.</p><p>More old text.</p></div>
//! </article></body></html>"#;
//!
//! let output = replace_content(html, "<h1>New title</h1><p>New text.</p>")?;
//! assert!(output.contains("<head><title>Old</title></head>"));
//! assert!(output.contains("New text."));
//! assert!(!output.contains("Old text."));
//! # Ok::<(), rs_pbnkit::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Page classification**: post, page, category, archive, unknown
//! - **Container location**: ordered selector tables with a text-density fallback
//! - **Content splicing**: head kept verbatim, theme furniture preserved
//! - **Link planning**: cluster, pyramid, mesh and hub-and-spoke schemes
//! - **Anchor variation**: weighted anchor categories with repeat avoidance
//! - **Link insertion**: links go into paragraph text, never into navigation

mod error;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Element tree utilities with text/tail model support.
pub mod etree;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Raw document split into doctype, verbatim head and parsed body.
pub mod document;

/// Page type classification.
pub mod classify;

/// Selector tables and locators for content, listing and heading elements.
pub mod selector;

/// Content replacement engine.
pub mod splice;

/// Regex based rewrites of `<head>` metadata.
pub mod meta;

/// Synonym to topic keyword tables.
pub mod keywords;

/// Page catalog, topic clusters and link records.
pub mod catalog;

/// Anchor text generation.
pub mod anchor;

/// Link topologies.
pub mod scheme;

/// Placement of planned links into HTML files.
pub mod inserter;

/// Link coverage metrics.
pub mod coverage;

/// Cluster linking workflow.
pub mod linker;

/// Configuration options.
pub mod options;

// Public API - re-exports
pub use anchor::{AnchorCategory, AnchorMorpher, AnchorState, Position};
pub use catalog::{Catalog, Cluster, Link, LinkType, Page};
pub use classify::PageType;
pub use error::{Error, Result};
pub use inserter::LinkInserter;
pub use keywords::KeywordMap;
pub use linker::ClusterLinker;
pub use options::{InsertOptions, OutputEncoding, Scheme, SchemeOptions, SpliceOptions};
pub use result::{
    CoverageReport, CoverageStats, InsertStats, LinkPlan, PlanCluster, PlanLink, PlanPage,
    StructureReport,
};
pub use splice::{analyze, replace_content, replace_file, ContentEngine};
