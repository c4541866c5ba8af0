//! The audit pipeline.
//!
//! Parses the document and its JSON-LD once, runs the four analyzers, then
//! scores the reports and derives recommendations. Nothing in here can fail: malformed markup
//! degrades the affected reports instead.

use chrono::{DateTime, Utc};
use dom_query::Document;
use tracing::debug;

use crate::analyzer::{content, json_ld, meta_tags, technical};
use crate::document::AuditDocument;
use crate::error::Result;
use crate::probe::{NoProbe, SiteProbe};
use crate::recommendations::{self, AuditReports};
use crate::result::AuditResult;
use crate::scoring;
use crate::url_utils;
use crate::Options;

/// Runs audits with a fixed configuration and site probe.
///
/// An `Auditor` holds no mutable state, so one instance can audit many
/// documents, including from several threads when the probe is `Sync`.
#[derive(Debug, Clone)]
pub struct Auditor<P = NoProbe> {
    options: Options,
    probe: P,
}

impl Auditor<NoProbe> {
    /// Create an auditor that treats sitemap and robots.txt as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) when the
    /// options are inconsistent.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_probe(options, NoProbe)
    }
}

impl Default for Auditor<NoProbe> {
    /// Default options, which are always valid, and no site probe.
    fn default() -> Self {
        Self {
            options: Options::default(),
            probe: NoProbe,
        }
    }
}

impl<P: SiteProbe> Auditor<P> {
    /// Create an auditor that asks `probe` about site resources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) when the
    /// options are inconsistent.
    pub fn with_probe(options: Options, probe: P) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, probe })
    }

    /// The validated options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Audit one fetched document.
    ///
    /// `now` is recorded as the result timestamp; identical input and `now`
    /// yield identical results.
    #[must_use]
    pub fn audit(&self, document: &AuditDocument, now: DateTime<Utc>) -> AuditResult {
        let doc = Document::from(document.html.as_str());
        let opts = &self.options;

        let blocks = json_ld::parse_blocks(&doc);

        let structured_data = json_ld::analyze(&doc, &blocks, opts);
        let meta_tags = meta_tags::analyze(&doc, &blocks, opts);
        let content = content::analyze(&doc, &blocks, opts);
        let technical = technical::analyze(&doc, document, &self.probe);

        let component_scores = scoring::component_scores(&structured_data, &meta_tags, &content, &technical, opts);
        let overall_score = scoring::overall_score(&component_scores, &opts.weights);

        let domain = domain_of(&document.final_url);
        let recommendations = recommendations::generate(
            &AuditReports {
                domain: &domain,
                structured_data: &structured_data,
                meta_tags: &meta_tags,
                content: &content,
                technical: &technical,
            },
            opts,
        );

        debug!(
            domain = %domain,
            schema = component_scores.schema,
            meta = component_scores.meta,
            content = component_scores.content,
            technical = component_scores.technical,
            overall = overall_score,
            "audit complete"
        );

        AuditResult {
            domain,
            timestamp: now,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            structured_data,
            meta_tags,
            content,
            technical,
            component_scores,
            overall_score,
            recommendations,
        }
    }
}

/// Host of `final_url`, or the raw string when it has none.
fn domain_of(final_url: &str) -> String {
    url_utils::extract_hostname(final_url).unwrap_or_else(|| final_url.trim().to_string())
}
