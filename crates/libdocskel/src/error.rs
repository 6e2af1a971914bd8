use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised by docskel.
///
/// Per-type extraction problems are also represented here, but the driver catches them and
/// records them in a [`crate::Report`] instead of aborting the run.
#[derive(Error, Debug)]
pub enum DocskelError {
    /// An absolute link that matches neither a built-in documentation host nor a configured
    /// external root.
    #[error("Unresolved link: {0}")]
    UnresolvedLink(String),

    /// The all-types index could not be located or read.
    #[error("Failed to discover documented types under {}: {}", .0.display(), .1)]
    AllTypeDiscovery(PathBuf, String),

    /// The constant values index exists but could not be read.
    #[error("Failed to read constant values from {}: {}", .0.display(), .1)]
    AllConstantDiscovery(PathBuf, String),

    /// A page or output file could not be read or written.
    #[error("Failed to read page: {0}")]
    PageRead(#[from] std::io::Error),

    /// A structural problem while extracting a single type page.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The type-name filter is not a valid regular expression.
    #[error("Invalid type filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    /// Two models have no structural correspondence.
    #[error("No correspondence between {0} and {1}")]
    NoMatch(String, String),

    /// An unknown documentation format name was requested.
    #[error("Unknown documentation format: {0}")]
    UnknownFormat(String),

    /// Failed to serialize the model.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A highlighting theme that is not bundled was requested.
    #[error("Unknown highlighting theme: {0}")]
    UnknownTheme(String),

    /// Indicates an error occurred during syntax highlighting.
    #[error("Highlighting error: {0}")]
    Highlight(String),
}

impl From<syntect::Error> for DocskelError {
    fn from(err: syntect::Error) -> Self {
        Self::Highlight(err.to_string())
    }
}

/// Result type used throughout docskel.
pub type Result<T> = std::result::Result<T, DocskelError>;
