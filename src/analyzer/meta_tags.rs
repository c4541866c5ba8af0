//! HTML Meta Tag Analysis
//!
//! Extracts the title, description, canonical link, robots and viewport
//! directives, and the Open Graph / Twitter card tag sets, then rates how
//! complete they are for machine consumption.

use std::collections::BTreeMap;

use dom_query::Document;
use tracing::debug;

use super::json_ld::ParsedBlocks;
use crate::dom;
use crate::result::{LengthBand, MetaCompleteness, MetaTagReport};
use crate::Options;

/// Open Graph tags every shareable page should carry.
pub const ESSENTIAL_OG_TAGS: [&str; 5] = ["og:title", "og:description", "og:image", "og:url", "og:type"];

/// Twitter card tags every shareable page should carry.
pub const ESSENTIAL_TWITTER_TAGS: [&str; 4] =
    ["twitter:card", "twitter:title", "twitter:description", "twitter:image"];

/// Examine the document's meta tags.
///
/// `json_ld` is only consulted for a `sameAs` social profile link.
#[must_use]
pub fn analyze(doc: &Document, json_ld: &ParsedBlocks, opts: &Options) -> MetaTagReport {
    let mut report = MetaTagReport {
        title: extract_title(doc),
        ..MetaTagReport::default()
    };

    for meta in dom::select_each(doc, "meta") {
        let Some(content) = dom::non_empty_attribute(&meta, "content") else {
            continue;
        };

        let key = dom::non_empty_attribute(&meta, "property")
            .or_else(|| dom::non_empty_attribute(&meta, "name"))
            .unwrap_or_default()
            .to_ascii_lowercase();

        // First occurrence wins for every key.
        match key.as_str() {
            "description" => fill(&mut report.description, content),
            "keywords" => fill(&mut report.keywords, content),
            "robots" => fill(&mut report.robots, content),
            "viewport" => fill(&mut report.viewport, content),
            k if k.starts_with("og:") || k.starts_with("article:") => {
                report.og_tags.entry(key).or_insert(content);
            }
            k if k.starts_with("twitter:") => {
                report.twitter_tags.entry(key).or_insert(content);
            }
            _ => {}
        }
    }

    report.canonical = dom::select_each(doc, "link[rel][href]")
        .iter()
        .find(|link| {
            dom::get_attribute(link, "rel").is_some_and(|rel| {
                rel.split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|link| dom::non_empty_attribute(link, "href"));

    report.title_length = char_len(report.title.as_deref());
    report.title_band = title_band(report.title_length);
    report.description_length = char_len(report.description.as_deref());
    report.description_band = description_band(report.description_length);

    let has_social_profile = json_ld.has_property("sameAs", opts.max_json_depth);
    report.completeness = completeness(&report, has_social_profile);

    debug!(
        title_length = report.title_length,
        description_length = report.description_length,
        og_tags = report.og_tags.len(),
        twitter_tags = report.twitter_tags.len(),
        overall = report.completeness.overall,
        "meta tags analyzed"
    );

    report
}

fn fill(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn char_len(s: Option<&str>) -> usize {
    s.map_or(0, |s| s.chars().count())
}

/// Text of the first `<title>` outside inline SVG, whitespace-normalized.
fn extract_title(doc: &Document) -> Option<String> {
    dom::select_each(doc, "title")
        .iter()
        .find(|t| !dom::has_ancestor(t, "svg"))
        .map(dom::normalized_text)
        .filter(|t| !t.is_empty())
}

/// Classify a title length. Optimal 50–65, acceptable 30–49 or 66–100.
#[must_use]
pub fn title_band(len: usize) -> LengthBand {
    match len {
        0 => LengthBand::Missing,
        50..=65 => LengthBand::Optimal,
        30..=49 | 66..=100 => LengthBand::Acceptable,
        _ => LengthBand::Poor,
    }
}

/// Classify a description length. Optimal 140–170, acceptable 70–139 or 171–300.
#[must_use]
pub fn description_band(len: usize) -> LengthBand {
    match len {
        0 => LengthBand::Missing,
        140..=170 => LengthBand::Optimal,
        70..=139 | 171..=300 => LengthBand::Acceptable,
        _ => LengthBand::Poor,
    }
}

/// Credit (0–1) a length band earns toward basic completeness.
#[must_use]
pub fn band_credit(band: LengthBand) -> f64 {
    match band {
        LengthBand::Missing => 0.0,
        LengthBand::Poor => 0.25,
        LengthBand::Acceptable => 0.6,
        LengthBand::Optimal => 1.0,
    }
}

fn ratio_present(tags: &BTreeMap<String, String>, essential: &[&str]) -> f64 {
    let present = essential.iter().filter(|t| tags.contains_key(**t)).count();
    present as f64 / essential.len() as f64
}

/// Basic, social and overall completeness.
///
/// basic: title 0.4, description 0.4, canonical 0.1, robots without noindex
/// 0.05, viewport 0.05. social: Open Graph 0.6 (with image-dimension and
/// article bonuses), Twitter 0.3, JSON-LD `sameAs` 0.1.
#[must_use]
pub fn completeness(report: &MetaTagReport, has_social_profile: bool) -> MetaCompleteness {
    let mut basic = 0.4 * band_credit(report.title_band) + 0.4 * band_credit(report.description_band);
    if report.canonical.is_some() {
        basic += 0.1;
    }
    if report.robots.is_some() && !report.is_noindex() {
        basic += 0.05;
    }
    if report.viewport.is_some() {
        basic += 0.05;
    }

    let mut og = ratio_present(&report.og_tags, &ESSENTIAL_OG_TAGS);
    if report.og_tags.contains_key("og:image:width") && report.og_tags.contains_key("og:image:height") {
        og += 0.1;
    }
    if report.og_tags.keys().any(|k| k.starts_with("article:")) {
        og += 0.1;
    }

    let mut social = 0.6 * og.min(1.0) + 0.3 * ratio_present(&report.twitter_tags, &ESSENTIAL_TWITTER_TAGS);
    if has_social_profile {
        social += 0.1;
    }

    let basic = basic.clamp(0.0, 1.0);
    let social = social.clamp(0.0, 1.0);

    MetaCompleteness {
        basic,
        social,
        overall: 0.7 * basic + 0.3 * social,
    }
}
