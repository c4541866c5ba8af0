//! # llmo-audit
//!
//! Deterministic audit of how well a web page is structured for consumption by
//! large language models.
//!
//! The engine takes an already-fetched HTML document and produces a scored
//! report covering structured data, meta tags, content structure and technical
//! factors, together with prioritized recommendations.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use llmo_audit::{audit, AuditDocument};
//!
//! let html = r#"<html><head><title>Acme Widgets</title></head>
//! <body><main><h1>Acme Widgets</h1><p>Durable widgets.</p></main></body></html>"#;
//!
//! let document = AuditDocument::new(html, "https://acme.example/widgets");
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//!
//! let result = audit(&document, now);
//! println!("Overall: {}", result.overall_score);
//! for rec in &result.recommendations {
//!     println!("[{:?}] {}", rec.priority, rec.issue);
//! }
//! ```
//!
//! ## Features
//!
//! - **Structured data**: JSON-LD types, property paths, completeness and `@id` relationships
//! - **Meta tags**: title/description length bands, Open Graph and Twitter coverage
//! - **Content structure**: heading hierarchy, FAQ detection, readability, semantic HTML
//! - **Technical factors**: SSL, mobile readiness, size, speed, sitemap and robots.txt
//! - **Deterministic**: the timestamp is injected and all maps are ordered
//!
//! The engine performs no I/O. Sitemap and robots.txt presence come from a
//! [`SiteProbe`]; enable the `http` feature for [`StaticProbe::prefetch`].

mod audit;
mod document;
mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// The four page analyzers.
pub mod analyzer;

/// URL utilities for host extraction and link resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Sitemap and robots.txt probing.
pub mod probe;

/// Component scores and the overall score.
pub mod scoring;

/// Prioritized recommendations.
pub mod recommendations;

/// Comparison of two audit results.
pub mod comparison;

// Public API - re-exports
pub use audit::Auditor;
pub use comparison::{AuditComparison, ScoreChange};
pub use document::AuditDocument;
pub use error::{Error, Result};
pub use options::{Options, ScoreWeights};
pub use probe::{NoProbe, ProbeError, SiteProbe, StaticProbe};
pub use result::{
    AuditResult, Category, ComponentScores, Confidence, ContentStructureReport, EntityMentions, FaqItem,
    FaqMethod, FaqSection, KeywordDensity, LengthBand, MetaCompleteness, MetaTagReport, Priority,
    Readability, Recommendation, SchemaRelationship, StructuredDataReport, StructuredPatterns,
    TechnicalFactorReport,
};

use chrono::{DateTime, Utc};

/// Audits a fetched document with default options and no site probe.
///
/// # Arguments
///
/// * `document` - The fetched page and its transport metadata
/// * `now` - Timestamp recorded in the result
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use llmo_audit::{audit, AuditDocument};
///
/// let result = audit(&AuditDocument::new("", "https://example.com/"), Utc::now());
/// assert_eq!(result.component_scores.content, 0);
/// ```
#[must_use]
pub fn audit(document: &AuditDocument, now: DateTime<Utc>) -> AuditResult {
    Auditor::<NoProbe>::default().audit(document, now)
}
