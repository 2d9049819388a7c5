//! Integration tests for Site-Digest
//!
//! These tests run mock HTTP servers with wiremock and exercise the crawl
//! session and the full pipeline end-to-end.

mod crawl_tests;
mod pipeline_tests;
