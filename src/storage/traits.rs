//! Artifact store trait and error types
//!
//! This module defines the interface the pipeline uses to persist raw pages,
//! summaries and run metadata.

use crate::output::CrawlMetadata;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Cannot derive a URL for artifact '{name}': {reason}")]
    InvalidUrl { name: String, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A saved raw page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArtifact {
    /// File stem derived from the URL path
    pub name: String,

    /// Source URL of the page
    pub url: Url,

    /// Location of the stored content
    pub path: PathBuf,
}

/// Trait for artifact store implementations
pub trait ArtifactStore {
    /// Directory holding this run's artifacts
    fn location(&self) -> &Path;

    // ===== Raw content =====

    /// Saves the text of a page, replacing any artifact with the same name
    fn save_raw(&mut self, url: &Url, content: &str) -> StoreResult<PathBuf>;

    /// Reads back a saved page
    fn read_raw(&self, artifact: &RawArtifact) -> StoreResult<String>;

    /// Lists saved pages, sorted by name
    ///
    /// Names come from the URL path alone, so URLs that differ only in their
    /// query string share one artifact: the last page saved under that name
    /// is the only one listed, with its own URL.
    fn list_raw_artifacts(&self) -> StoreResult<Vec<RawArtifact>>;

    // ===== Summaries =====

    fn save_summary(&mut self, url: &Url, summary: &str) -> StoreResult<PathBuf>;

    fn save_meta_summary(&mut self, meta_summary: &str) -> StoreResult<PathBuf>;

    fn meta_summary_exists(&self) -> bool;

    // ===== Run metadata =====

    fn save_metadata(&mut self, metadata: &CrawlMetadata) -> StoreResult<PathBuf>;
}
