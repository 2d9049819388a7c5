//! Full pipeline runs into temporary output directories

use site_digest::config::Config;
use site_digest::output::CrawlMetadata;
use site_digest::pipeline::{run, RunOptions};
use site_digest::DigestError;
use std::fs;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawler.delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.output.base_dir = dir.path().display().to_string();
    config
}

fn options(server: &MockServer, config: Config) -> RunOptions {
    RunOptions {
        seed: Url::parse(&format!("{}/", server.uri())).expect("seed"),
        config,
        config_hash: Some("abc123".to_string()),
        use_rendering: false,
        use_sitemap: false,
    }
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_writes_all_artifacts() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head><style>body { color: red; }</style></head><body>
            <h1>Ferris Crab Club</h1>
            <p>The borrow checker keeps Rust programs safe. Cargo fetches crates from the registry.</p>
            <p>A major benefit is fearless concurrency.</p>
            <a href="/docs/intro">Docs</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/docs/intro",
        "<p>Tokio runtime drives async tasks. The borrow checker rejects dangling references.</p>",
    )
    .await;

    let dir = TempDir::new().expect("tempdir");
    let report = run(options(&server, config_for(&dir))).await.expect("run");

    let out = &report.output_dir;
    assert!(out.starts_with(dir.path()));
    assert!(out.join("scraped_content/index.txt").is_file());
    assert!(out.join("scraped_content/docs_intro.txt").is_file());
    assert!(out.join("summaries/index_summary.txt").is_file());
    assert!(out.join("summaries/docs_intro_summary.txt").is_file());

    let site = Url::parse(&server.uri())
        .expect("uri")
        .host_str()
        .expect("host")
        .to_string();
    let meta_file = fs::read_dir(out)
        .expect("read output")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .find(|name| name.ends_with("_FULL_SUMMARY.txt"))
        .expect("meta-summary written");
    assert!(meta_file.starts_with(&site));

    let meta = fs::read_to_string(out.join(&meta_file)).expect("meta");
    assert!(meta.starts_with("Website Meta-Summary:\n\n"));
    assert!(meta.contains(&format!("Page: {}/\n", server.uri())));
    assert!(meta.contains(&format!("Page: {}/docs/intro\n", server.uri())));
    assert!(!meta.contains("color: red"));

    let json = fs::read_to_string(out.join("metadata.json")).expect("metadata");
    let metadata: CrawlMetadata = serde_json::from_str(&json).expect("valid metadata");
    assert_eq!(metadata, report.metadata);
    assert_eq!(metadata.stats.emitted, 2);
    assert_eq!(metadata.summarized_pages, 2);
    assert_eq!(metadata.fetcher, "static");
    assert_eq!(metadata.config_hash.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_run_without_content_reports_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let result = run(options(&server, config_for(&dir))).await;
    assert!(matches!(result, Err(DigestError::NoContentFound { .. })));

    let out = fs::read_dir(dir.path())
        .expect("read base")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.is_dir())
        .expect("output directory created");
    assert_eq!(fs::read_dir(out.join("summaries")).expect("summaries").count(), 0);

    let metadata: CrawlMetadata =
        serde_json::from_str(&fs::read_to_string(out.join("metadata.json")).expect("metadata"))
            .expect("valid metadata");
    assert_eq!(metadata.stats.failed, 1);
    assert_eq!(metadata.summarized_pages, 0);
}

#[tokio::test]
async fn test_rendering_requires_feature() {
    if cfg!(feature = "headless") {
        return;
    }

    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let mut opts = options(&server, config_for(&dir));
    opts.use_rendering = true;

    let result = run(opts).await;
    assert!(matches!(result, Err(DigestError::Render(_))));
    assert!(server.received_requests().await.expect("recording").is_empty());
}
