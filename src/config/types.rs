use serde::Deserialize;

/// Main configuration structure for Site-Digest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages to visit in one session
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Delay applied after every request (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// User-Agent header sent with static and sitemap requests
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for a single HTTP request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// How long the rendered fetcher waits for `wait_selector` (seconds)
    #[serde(rename = "render-timeout-secs")]
    pub render_timeout_secs: u64,

    /// CSS selector that must appear before a rendered page is captured
    #[serde(rename = "wait-selector")]
    pub wait_selector: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            delay_ms: 1000,
            user_agent: "Custom Web Scraper 1.0".to_string(),
            request_timeout_secs: 30,
            render_timeout_secs: 10,
            wait_selector: "body".to_string(),
        }
    }
}

/// Summarizer tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Fraction of sentences kept as key sentences
    pub ratio: f64,

    /// Number of key phrases listed in each summary
    #[serde(rename = "key-phrases")]
    pub key_phrases: usize,

    /// Maximum sentences rendered per section
    #[serde(rename = "sentences-per-section")]
    pub sentences_per_section: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            ratio: 0.3,
            key_phrases: 5,
            sentences_per_section: 3,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which the per-run output directory is created
    #[serde(rename = "base-dir")]
    pub base_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
        }
    }
}
