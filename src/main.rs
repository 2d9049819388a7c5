//! Site-Digest main entry point
//!
//! This is the command-line interface for crawling a website and writing
//! extractive summaries of its pages.

use anyhow::Context;
use clap::Parser;
use site_digest::config::{load_config_with_hash, validate, validate_seed_url, Config};
use site_digest::output::print_report;
use site_digest::pipeline::{run, summarize_stage, RunOptions};
use site_digest::storage::{ArtifactStore, FileStore};
use site_digest::url::site_label;
use site_digest::Summarizer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Digest: crawl a website and summarize every page
///
/// Pages are discovered by following same-site links (or from the site's
/// sitemap), saved to a timestamped output directory, and summarized into
/// per-page summaries plus one site-wide meta-summary.
#[derive(Parser, Debug)]
#[command(name = "site-digest")]
#[command(version = "1.0.0")]
#[command(about = "Website scraper and extractive summarizer", long_about = None)]
struct Cli {
    /// URL of the website to scrape
    #[arg(long)]
    url: String,

    /// Delay between requests in seconds
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Render pages in a headless browser (JavaScript-heavy sites)
    #[arg(long)]
    use_selenium: bool,

    /// Take the page list from the site's sitemap instead of following links
    #[arg(long)]
    use_sitemap: bool,

    /// Maximum number of pages to scrape
    #[arg(long)]
    max_pages: Option<usize>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory in which the output directory is created
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Re-summarize an existing output directory instead of crawling
    #[arg(long, value_name = "DIR", conflicts_with_all = ["use_selenium", "use_sitemap"])]
    resummarize: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let seed = validate_seed_url(&cli.url)?;
    let (config, config_hash) = build_config(&cli)?;

    if let Some(dir) = &cli.resummarize {
        return handle_resummarize(dir, &seed, &config);
    }

    tracing::info!("Starting web scraping for {}...", seed);
    let options = RunOptions {
        seed,
        config,
        config_hash,
        use_rendering: cli.use_selenium,
        use_sitemap: cli.use_sitemap,
    };

    match run(options).await {
        Ok(report) => {
            if !cli.quiet {
                print_report(&report.metadata, &report.output_dir);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_digest=info,warn"),
            1 => EnvFilter::new("site_digest=debug,info"),
            2 => EnvFilter::new("site_digest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(delay) = cli.delay {
        anyhow::ensure!(
            delay.is_finite() && delay >= 0.0,
            "--delay must be a non-negative number of seconds"
        );
        config.crawler.delay_ms = (delay * 1000.0).round() as u64;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.base_dir = dir.display().to_string();
    }

    validate(&config)?;
    Ok((config, hash))
}

/// Handles --resummarize: rebuilds summaries from previously scraped pages
fn handle_resummarize(
    dir: &std::path::Path,
    seed: &url::Url,
    config: &Config,
) -> anyhow::Result<()> {
    let site = site_label(seed).context("Seed URL has no host")?;
    let mut store = FileStore::open(dir, &site)?;
    let summarizer = Summarizer::new(&config.summarizer);

    let count = summarize_stage(&mut store, &summarizer, config.summarizer.ratio)?;
    anyhow::ensure!(
        store.meta_summary_exists(),
        "Meta-summary missing after summarizing {} pages",
        count
    );
    println!("✓ Re-summarized {} pages in {}", count, store.location().display());
    Ok(())
}
