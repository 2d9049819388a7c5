//! Console report printed after a run

use crate::output::CrawlMetadata;
use crate::storage::meta_summary_file_name;
use std::path::Path;

/// Prints run statistics and where to find the results
pub fn print_report(metadata: &CrawlMetadata, output_dir: &Path) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Seed URL: {}", metadata.seed_url);
    println!("  Fetcher: {}", metadata.fetcher);
    println!(
        "  Mode: {}",
        if metadata.use_sitemap {
            "sitemap"
        } else {
            "link discovery"
        }
    );
    println!("  URLs attempted: {}", metadata.stats.attempted());
    println!("  Pages visited: {}", metadata.visited);
    println!("  Pages saved: {}", metadata.stats.emitted);
    println!("  Empty pages: {}", metadata.stats.empty);
    println!("  Failed pages: {}", metadata.stats.failed);
    println!("  Pages summarized: {}", metadata.summarized_pages);
    if let Some(duration) = metadata.duration_seconds() {
        println!("  Duration: {} seconds", duration);
    }
    println!();

    println!("Success Rate: {:.1}%", success_rate(metadata));
    println!();

    println!("Output:");
    println!("  Scraped pages:  {}", output_dir.join("scraped_content").display());
    println!("  Summaries:      {}", output_dir.join("summaries").display());
    println!("  Run metadata:   {}", output_dir.join("metadata.json").display());
    println!();

    let full_summary = output_dir.join(meta_summary_file_name(&metadata.domain));
    println!("{}", "=".repeat(50));
    println!("NEXT STEPS FOR A MORE HUMAN-READABLE SUMMARY:");
    println!("1. Locate the file: {}", full_summary.display());
    println!("2. Give this file to a conversational AI assistant of your choice.");
    println!("3. Ask for a concise, human-readable overview of the website based on it.");
    println!("{}", "=".repeat(50));
}

/// Percentage of attempted URLs whose content was saved
pub fn success_rate(metadata: &CrawlMetadata) -> f64 {
    let attempted = metadata.stats.attempted();
    if attempted == 0 {
        0.0
    } else {
        (metadata.stats.emitted as f64 / attempted as f64) * 100.0
    }
}
