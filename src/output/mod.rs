//! Output module for summaries and run reports
//!
//! This module handles:
//! - Aggregating per-page summaries into the site meta-summary
//! - The run metadata record written next to the artifacts
//! - The console report printed at the end of a run

mod meta;
mod metadata;
mod report;

pub use meta::create_meta_summary;
pub use metadata::CrawlMetadata;
pub use report::{print_report, success_rate};
