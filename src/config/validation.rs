use crate::config::types::{Config, CrawlerConfig, OutputConfig, SummarizerConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.render_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "render_timeout_secs must be >= 1, got {}",
            config.render_timeout_secs
        )));
    }

    if config.wait_selector.trim().is_empty() {
        return Err(ConfigError::Validation(
            "wait_selector cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates summarizer configuration
fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    if !(config.ratio > 0.0 && config.ratio <= 1.0) {
        return Err(ConfigError::Validation(format!(
            "ratio must be in (0, 1], got {}",
            config.ratio
        )));
    }

    if config.key_phrases < 1 {
        return Err(ConfigError::Validation(
            "key_phrases must be >= 1".to_string(),
        ));
    }

    if config.sentences_per_section < 1 {
        return Err(ConfigError::Validation(
            "sentences_per_section must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.base_dir.is_empty() {
        return Err(ConfigError::Validation(
            "base_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed URL given on the command line
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn validate_seed_url(seed: &str) -> Result<url::Url, ConfigError> {
    let url = url::Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            seed
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(url)
}
