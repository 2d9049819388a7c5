//! Configuration module for Site-Digest
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values afterwards.
//!
//! # Example
//!
//! ```no_run
//! use site_digest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("digest.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SummarizerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_seed_url};
