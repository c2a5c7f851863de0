//! Core errors.

use std::path::PathBuf;

use buildport_protocols::{CatalogError, PageError};
use thiserror::Error;

/// Fatal errors of an import.
///
/// Failures while reading individual panels or slots are not represented
/// here; the extractor absorbs them and logs a warning.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The page session failed or could not be opened.
    #[error("Page session error: {0}")]
    Session(#[from] PageError),

    /// The page has no recognizable build title.
    #[error("Build name not found on {url}")]
    NameNotFound { url: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Import cancelled")]
    Cancelled,

    /// A resolution task panicked or was aborted.
    #[error("Resolution failed: {0}")]
    Resolve(String),
}

/// Errors loading the reference catalog.
#[derive(Debug, Error)]
pub enum CatalogIndexError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
