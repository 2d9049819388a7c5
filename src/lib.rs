//! Site-Digest: crawl a website and write extractive summaries
//!
//! This crate crawls a single site (by link discovery or through its sitemap),
//! stores the raw pages on disk, and produces a structured extractive summary
//! per page plus a meta-summary of the whole site.

pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod storage;
pub mod summarizer;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Digest operations
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Render(#[from] crawler::RenderError),

    #[error("Storage error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("No scraped content found in {dir}, cannot generate summary")]
    NoContentFound { dir: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Site-Digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlSession, PageRecord};
pub use state::PageOutcome;
pub use summarizer::Summarizer;
pub use crate::url::{extract_domain, normalize_url, same_site};
