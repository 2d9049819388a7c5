//! Storage module for persisting run artifacts
//!
//! This module handles everything written to disk by a run, including:
//! - Raw page text and the manifest mapping files back to URLs
//! - Per-page summaries and the site meta-summary
//! - Run metadata

mod filesystem;
mod traits;

pub use filesystem::{artifact_name, meta_summary_file_name, FileStore};
pub use traits::{ArtifactStore, RawArtifact, StoreError, StoreResult};
