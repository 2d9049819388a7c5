//! Crawl session tests against a mock site

use site_digest::config::CrawlerConfig;
use site_digest::crawler::{
    build_http_client, CrawlMode, CrawlOptions, CrawlSession, SitemapResolver, StaticFetcher,
};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> CrawlerConfig {
    CrawlerConfig {
        user_agent: "TestBot/1.0".to_string(),
        request_timeout_secs: 5,
        ..CrawlerConfig::default()
    }
}

fn options(max_pages: usize) -> CrawlOptions {
    CrawlOptions {
        max_pages,
        delay: Duration::ZERO,
    }
}

fn fetcher() -> Box<StaticFetcher> {
    Box::new(StaticFetcher::from_config(&test_config()).expect("client"))
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

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xml")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

async fn drain(session: &mut CrawlSession) -> Vec<String> {
    let mut paths = Vec::new();
    while let Some(page) = session.next_page().await {
        paths.push(page.url.path().to_string());
    }
    paths
}

fn seed(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("seed")
}

#[tokio::test]
async fn test_link_crawl_stays_on_site() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/guide">Guide</a>
            <a href="/about#team">About</a>
            <a href="https://elsewhere.invalid/page">Off site</a>
            <a href="mailto:crab@ferris.rs">Mail</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/about", r#"<p>About</p><a href="/">Home</a>"#).await;
    mount_html(&server, "/guide", r#"<p>Guide</p><a href="/missing">Gone</a>"#).await;

    let mut session = CrawlSession::new(seed(&server), fetcher(), options(50));
    let pages = drain(&mut session).await;

    assert_eq!(pages, vec!["/", "/about", "/guide"]);

    let stats = session.stats();
    assert_eq!(stats.emitted, 3);
    // /missing is not mounted, so the mock server answers 404
    assert_eq!(stats.failed, 1);
    // /missing was attempted but does not count as visited
    assert_eq!(session.visited().len(), 3);
    assert_eq!(session.attempted().len(), 4);
    assert!(session.is_closed());
}

#[tokio::test]
async fn test_dead_links_do_not_spend_page_budget() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<a href="/dead1">1</a><a href="/dead2">2</a><a href="/ok">OK</a>"#,
    )
    .await;
    mount_html(&server, "/ok", "<p>Still here</p>").await;

    let mut session = CrawlSession::new(seed(&server), fetcher(), options(2));
    let pages = drain(&mut session).await;

    assert_eq!(pages, vec!["/", "/ok"]);
    assert_eq!(session.stats().failed, 2);
    assert_eq!(session.visited().len(), 2);
}

#[tokio::test]
async fn test_max_pages_one_emits_only_seed() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<p>Home</p><a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_html(&server, "/a", "<p>A</p>").await;
    mount_html(&server, "/b", "<p>B</p>").await;

    let mut session = CrawlSession::new(seed(&server), fetcher(), options(1));
    let pages = drain(&mut session).await;

    assert_eq!(pages, vec!["/"]);
    assert_eq!(session.visited().len(), 1);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_failed_urls_are_not_retried() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<a href="/broken">1</a><a href="/ok">2</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/ok", r#"<p>Fine</p><a href="/broken">again</a>"#).await;

    let mut session = CrawlSession::new(seed(&server), fetcher(), options(10));
    let pages = drain(&mut session).await;

    assert_eq!(pages, vec!["/", "/ok"]);
    assert_eq!(session.stats().failed, 1);
}

#[tokio::test]
async fn test_sitemap_index_resolves_child_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{base}/sitemap-pages.xml</loc></sitemap>
</sitemapindex>"#
        ),
    )
    .await;
    mount_xml(
        &server,
        "/sitemap-pages.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/one</loc></url>
  <url><loc>{base}/two</loc></url>
</urlset>"#
        ),
    )
    .await;

    let resolver = SitemapResolver::new(build_http_client(&test_config()).expect("client"));
    let sitemap_url = Url::parse(&format!("{base}/sitemap.xml")).expect("url");
    let urls = resolver.resolve(&sitemap_url).await;

    let paths: Vec<_> = urls.iter().map(|u| u.path().to_string()).collect();
    assert_eq!(paths, vec!["/one", "/two"]);

    // Resolving again yields the same set
    assert_eq!(resolver.resolve(&sitemap_url).await, urls);
}

#[tokio::test]
async fn test_sitemap_mode_does_not_follow_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/listed</loc></url>
</urlset>"#
        ),
    )
    .await;
    mount_html(&server, "/", r#"<p>Home</p><a href="/unlisted">Hidden</a>"#).await;
    mount_html(&server, "/listed", "<p>Listed</p>").await;
    mount_html(&server, "/unlisted", "<p>Unlisted</p>").await;

    let resolver = SitemapResolver::new(build_http_client(&test_config()).expect("client"));
    let mut session =
        CrawlSession::with_sitemap(seed(&server), fetcher(), options(10), &resolver).await;
    assert_eq!(session.mode(), CrawlMode::Sitemap);

    let pages = drain(&mut session).await;
    assert_eq!(pages, vec!["/", "/listed"]);
}

#[tokio::test]
async fn test_missing_sitemap_crawls_seed_only() {
    let server = MockServer::start().await;
    mount_html(&server, "/", r#"<p>Home</p><a href="/other">Other</a>"#).await;

    let resolver = SitemapResolver::new(build_http_client(&test_config()).expect("client"));
    let mut session =
        CrawlSession::with_sitemap(seed(&server), fetcher(), options(10), &resolver).await;

    let pages = drain(&mut session).await;
    assert_eq!(pages, vec!["/"]);
}

#[tokio::test]
async fn test_next_page_after_exhaustion_stays_none() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<p>Only page</p>").await;

    let mut session = CrawlSession::new(seed(&server), fetcher(), options(5));
    assert!(session.next_page().await.is_some());
    assert!(session.next_page().await.is_none());
    assert!(session.next_page().await.is_none());

    session.close().await;
    assert!(session.is_closed());
}
