//! Error types for rs-pbnkit.
//!
//! Only conditions a caller has to decide about surface here. Batch
//! operations (catalog scans, link insertion) convert per-file failures into
//! counts and log lines instead of returning them.

use std::path::PathBuf;

use crate::classify::PageType;

/// Error type for content splicing, catalog and link-plan operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// No content or listing container could be located.
    ///
    /// `strategy` names the locator that was exhausted (`"content"` or
    /// `"listing"`) so an operator can tell which theme family is missing.
    #[error("No {strategy} container found for {page_type} page")]
    ContainerNotFound {
        /// Classification of the page the splice ran on.
        page_type: PageType,
        /// Locator strategy that found nothing.
        strategy: &'static str,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation ran on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Keyword table or link plan (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A link scheme name that is not one of the known topologies.
    #[error("Unknown link scheme: {0}")]
    UnknownScheme(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for rs-pbnkit operations.
pub type Result<T> = std::result::Result<T, Error>;
