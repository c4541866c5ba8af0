//! Component scores and the overall LLM-friendliness score.
//!
//! Every component score is a point budget summing to 100, computed from its
//! report alone. The overall score is the weighted sum plus synergy bonuses.

use crate::analyzer::json_ld;
use crate::options::ScoreWeights;
use crate::result::{
    ComponentScores, ContentStructureReport, LengthBand, MetaTagReport, StructuredDataReport,
    TechnicalFactorReport,
};
use crate::Options;

fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

/// Structured data score.
///
/// 25 for JSON-LD declaring any `@type`, high-value type weights (≤35), property tier
/// (≤20), 20 × best completeness, minus 2 per malformed block (≤10).
/// Adding valid markup never lowers it.
#[must_use]
pub fn schema_score(report: &StructuredDataReport, opts: &Options) -> u8 {
    if !report.found {
        return 0;
    }

    let type_points = json_ld::type_points(&report.types, opts).min(35);
    let tier = json_ld::property_tier(report.property_occurrences());
    let best = report.completeness.values().copied().fold(0.0_f64, f64::max);
    let penalty = report.parse_errors.len().saturating_mul(2).min(10) as f64;

    to_score(25.0 + f64::from(type_points) + f64::from(tier) + 20.0 * best - penalty)
}

fn band_bonus(band: LengthBand) -> f64 {
    match band {
        LengthBand::Optimal => 20.0,
        LengthBand::Acceptable => 10.0,
        LengthBand::Poor => 3.0,
        LengthBand::Missing => 0.0,
    }
}

/// Meta tag score: 60 × overall completeness plus title and description
/// length bonuses (20 each when optimal).
#[must_use]
pub fn meta_score(report: &MetaTagReport) -> u8 {
    to_score(
        60.0 * report.completeness.overall
            + band_bonus(report.title_band)
            + band_bonus(report.description_band),
    )
}

/// Content structure score.
#[must_use]
pub fn content_score(report: &ContentStructureReport) -> u8 {
    let mut points = 0.0;

    points += match report.heading_count(1) {
        0 => 0.0,
        1 => 15.0,
        _ => 10.0,
    };
    points += 15.0 * report.heading_hierarchy_score;

    points += match report.word_count {
        1000.. => 15.0,
        600..=999 => 12.0,
        300..=599 => 8.0,
        100..=299 => 4.0,
        _ => 0.0,
    };

    let mut structure: f64 = match report.lists {
        0 => 0.0,
        1 | 2 => 5.0,
        _ => 8.0,
    };
    if report.tables > 0 {
        structure += 4.0;
    }
    points += structure.min(12.0);

    if !report.faq_sections.is_empty() {
        points += 8.0 + report.faq_count().min(4) as f64;
    }

    if report.images > 0 {
        points += 6.0 * report.image_alt_ratio;
    }

    if report.word_count > 0 {
        let grade = report.readability.flesch_kincaid_grade;
        points += if (6.0..=12.0).contains(&grade) {
            8.0
        } else if (4.0..=16.0).contains(&grade) {
            4.0
        } else {
            0.0
        };
    }

    points += 10.0 * report.content_diversity_score;
    points += (report.semantic_elements.len() as f64 * 2.0).min(7.0);

    to_score(points)
}

/// Technical score: SSL 30, mobile 25, page size ≤15, load time ≤15,
/// sitemap 8, robots.txt 7.
#[must_use]
pub fn technical_score(report: &TechnicalFactorReport) -> u8 {
    let mut points = 0.0;

    if report.ssl_enabled {
        points += 30.0;
    }
    if report.mobile_friendly {
        points += 25.0;
    }

    let kb = report.page_size_kb;
    points += if kb <= 500.0 {
        15.0
    } else if kb <= 1024.0 {
        10.0
    } else if kb <= 3072.0 {
        5.0
    } else {
        0.0
    };

    points += match report.load_time_ms {
        0..=500 => 15.0,
        501..=1000 => 12.0,
        1001..=2000 => 8.0,
        2001..=4000 => 4.0,
        _ => 0.0,
    };

    if report.has_sitemap {
        points += 8.0;
    }
    if report.has_robots_txt {
        points += 7.0;
    }

    to_score(points)
}

/// All four component scores.
#[must_use]
pub fn component_scores(
    structured_data: &StructuredDataReport,
    meta_tags: &MetaTagReport,
    content: &ContentStructureReport,
    technical: &TechnicalFactorReport,
    opts: &Options,
) -> ComponentScores {
    ComponentScores {
        schema: schema_score(structured_data, opts),
        meta: meta_score(meta_tags),
        content: content_score(content),
        technical: technical_score(technical),
    }
}

/// Weighted overall score with synergy bonuses.
///
/// +5 when schema and content are both ≥80, +3 when all four are ≥70, +2 when
/// meta ≥90 and schema ≥70.
#[must_use]
pub fn overall_score(scores: &ComponentScores, weights: &ScoreWeights) -> u8 {
    let ComponentScores {
        schema,
        meta,
        content,
        technical,
    } = *scores;

    let mut total = weights.schema * f64::from(schema)
        + weights.meta * f64::from(meta)
        + weights.content * f64::from(content)
        + weights.technical * f64::from(technical);

    if schema >= 80 && content >= 80 {
        total += 5.0;
    }
    if [schema, meta, content, technical].iter().all(|s| *s >= 70) {
        total += 3.0;
    }
    if meta >= 90 && schema >= 70 {
        total += 2.0;
    }

    to_score(total)
}
