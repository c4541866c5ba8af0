//! Shared page fixtures for the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use llmo_audit::{AuditDocument, StaticProbe};

pub const PAGE_URL: &str = "https://acme.example/widgets";

pub const TITLE: &str = "Acme Widgets - Durable Industrial Widgets for Every Use";

pub const DESCRIPTION: &str = "Acme builds durable industrial widgets for factories, workshops and homes. \
                               Browse specifications, pricing and support resources for every widget model.";

/// Send the engine's `tracing` events to the test output.
///
/// Silent unless `RUST_LOG` is set, e.g. `RUST_LOG=llmo_audit=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Probe reporting both sitemap and robots.txt as present.
pub fn full_probe() -> StaticProbe {
    StaticProbe::new()
        .with_site_resource(PAGE_URL, "/sitemap.xml")
        .with_site_resource(PAGE_URL, "/robots.txt")
}

const ORGANIZATION: &str = r#"{"@type":"Organization","@id":"https://acme.example/#org","name":"Acme Widgets",
    "url":"https://acme.example","logo":"https://acme.example/logo.png",
    "description":"Industrial widget maker since 1952",
    "sameAs":["https://twitter.com/acme","https://www.linkedin.com/company/acme"]}"#;

const WEBSITE: &str = r#"{"@type":"WebSite","@id":"https://acme.example/#site","name":"Acme Widgets",
    "url":"https://acme.example","publisher":{"@id":"https://acme.example/#org"}}"#;

const BREADCRUMBS: &str = r#"{"@type":"BreadcrumbList","itemListElement":[
    {"@type":"ListItem","position":1,"name":"Home","item":"https://acme.example/"},
    {"@type":"ListItem","position":2,"name":"Widgets","item":"https://acme.example/widgets"}]}"#;

const FAQ_PAGE: &str = r#"{"@type":"FAQPage","name":"Widget questions","mainEntity":[
    {"@type":"Question","name":"How long does a widget last?",
     "acceptedAnswer":{"@type":"Answer","text":"A standard widget lasts ten years under daily use."}},
    {"@type":"Question","name":"Can widgets be recycled?",
     "acceptedAnswer":{"@type":"Answer","text":"Yes. Return them to any Acme depot for recycling."}},
    {"@type":"Question","name":"Do you ship abroad?",
     "acceptedAnswer":{"@type":"Answer","text":"We ship to forty countries with tracked delivery."}}]}"#;

fn json_ld(with_faq: bool) -> String {
    let mut graph = vec![ORGANIZATION, WEBSITE, BREADCRUMBS];
    if with_faq {
        graph.push(FAQ_PAGE);
    }
    format!(
        r#"<script type="application/ld+json">{{"@context":"https://schema.org","@graph":[{}]}}</script>"#,
        graph.join(",")
    )
}

const PARAGRAPH: &str = "Our widgets are machined from recycled steel and tested in working factories \
    before they ship. Each model comes with a clear manual and a ten year warranty. Engineers on our \
    support team answer questions by phone and email on every business day.";

fn head(title: &str) -> String {
    format!(
        r#"<head>
        <meta charset="utf-8">
        <title>{title}</title>
        <meta name="description" content="{DESCRIPTION}">
        <meta name="robots" content="index, follow">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <link rel="canonical" href="{PAGE_URL}">
        <meta property="og:title" content="Acme Widgets">
        <meta property="og:description" content="Durable industrial widgets">
        <meta property="og:image" content="https://acme.example/og.png">
        <meta property="og:url" content="{PAGE_URL}">
        <meta property="og:type" content="website">
        <meta property="og:site_name" content="Acme">
        <meta name="twitter:card" content="summary_large_image">
        <meta name="twitter:title" content="Acme Widgets">
        <meta name="twitter:description" content="Durable industrial widgets">
        <meta name="twitter:image" content="https://acme.example/og.png">
        <style>body {{ margin: 0 }} @media (max-width: 600px) {{ nav {{ display: none }} }}</style>
        "#
    )
}

/// A well-structured product page.
pub fn rich_html(title: &str, with_faq: bool) -> String {
    let paragraphs: String = (0..8).map(|_| format!("<p>{PARAGRAPH}</p>")).collect();

    format!(
        r#"<!DOCTYPE html><html lang="en">{head}{json_ld}</head>
<body>
<header><nav><a href="/">Home</a> <a href="/widgets">Widgets</a> <a href="https://partner.example/">Partner</a></nav></header>
<main>
<article>
<h1>Industrial Widgets</h1>
<section>
<h2>Why choose Acme widgets</h2>
{paragraphs}
<ul><li>Recycled steel body</li><li>Ten year warranty</li><li>Free returns</li></ul>
<h3>Specifications</h3>
<table><thead><tr><th>Model</th><th>Weight</th></tr></thead>
<tbody><tr><td>W100</td><td>2 kg</td></tr></tbody></table>
<ol><li>Unpack the widget</li><li>Mount it on the rail</li></ol>
<ul><li>Factories</li><li>Workshops</li></ul>
<figure><img src="/w100.png" alt="The W100 widget"><figcaption>The W100</figcaption></figure>
<img src="/w200.png" alt="The W200 widget">
</section>
<section>
<h2>Frequently asked questions</h2>
<h3>Q: How long does a widget last?</h3>
<p>A standard widget lasts ten years under daily use.</p>
</section>
</article>
<aside><p>Need help choosing? Call our engineers.</p></aside>
</main>
<footer><address>Acme Widgets, Springfield, IL</address></footer>
</body></html>"#,
        head = head(title),
        json_ld = json_ld(with_faq),
    )
}

/// The rich page as fetched quickly over https.
pub fn rich_document() -> AuditDocument {
    AuditDocument::new(rich_html(TITLE, true), PAGE_URL).with_elapsed_ms(320)
}
