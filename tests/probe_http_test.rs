#![cfg(feature = "http")]

mod common;

use std::time::Duration;

use common::fixed_time;
use llmo_audit::{AuditDocument, Auditor, Options, StaticProbe};

#[tokio::test]
async fn prefetch_records_resources_that_answer_head() {
    let mut server = mockito::Server::new_async().await;
    let sitemap = server
        .mock("HEAD", "/sitemap.xml")
        .with_status(200)
        .create_async()
        .await;
    let robots = server
        .mock("HEAD", "/robots.txt")
        .with_status(404)
        .create_async()
        .await;

    let page = format!("{}/blog/post", server.url());
    let client = reqwest::Client::new();
    let probe = StaticProbe::prefetch(&client, &page, Duration::from_secs(5)).await;

    sitemap.assert_async().await;
    robots.assert_async().await;
    assert_eq!(
        probe.found().collect::<Vec<_>>(),
        vec![format!("{}/sitemap.xml", server.url())]
    );

    let auditor = Auditor::with_probe(Options::default(), probe).unwrap();
    let result = auditor.audit(&AuditDocument::new("<h1>Post</h1>", page), fixed_time());
    assert!(result.technical.has_sitemap);
    assert!(!result.technical.has_robots_txt);
}

#[tokio::test]
async fn prefetch_treats_server_errors_as_absent() {
    let mut server = mockito::Server::new_async().await;
    let _sitemap = server.mock("HEAD", "/sitemap.xml").with_status(500).create_async().await;
    let _robots = server.mock("HEAD", "/robots.txt").with_status(503).create_async().await;

    let client = reqwest::Client::new();
    let probe = StaticProbe::prefetch(&client, &server.url(), Duration::from_secs(5)).await;

    assert_eq!(probe.found().count(), 0);
}

#[tokio::test]
async fn prefetch_skips_relative_urls() {
    let client = reqwest::Client::new();
    let probe = StaticProbe::prefetch(&client, "/not/absolute", Duration::from_millis(50)).await;

    assert_eq!(probe.found().count(), 0);
}
