//! Content structure analysis.
//!
//! Measures how easy the page body is for a machine to segment: heading
//! hierarchy, lists and tables, FAQ sections, semantic HTML5 landmarks,
//! readability and keyword focus.

use std::collections::BTreeMap;

use dom_query::Document;
use tracing::debug;

use super::json_ld::ParsedBlocks;
use super::{entities, faq, readability};
use crate::dom;
use crate::result::{ContentStructureReport, StructuredPatterns};
use crate::Options;

/// Semantic HTML5 elements that are counted.
pub const SEMANTIC_ELEMENTS: [&str; 14] = [
    "header", "footer", "main", "article", "section", "nav", "aside", "figure", "figcaption", "time",
    "details", "summary", "mark", "address",
];

/// Analyze the document body.
///
/// `json_ld` feeds the schema-based FAQ detection.
#[must_use]
pub fn analyze(doc: &Document, json_ld: &ParsedBlocks, opts: &Options) -> ContentStructureReport {
    let levels: Vec<u8> = dom::select_each(doc, "h1, h2, h3, h4, h5, h6")
        .iter()
        .filter_map(dom::heading_level)
        .collect();

    let mut headings: BTreeMap<String, usize> = (1..=6).map(|l| (format!("h{l}"), 0)).collect();
    for level in &levels {
        *headings.entry(format!("h{level}")).or_insert(0) += 1;
    }

    let images = dom::select_each(doc, "img");
    let images_with_alt = images
        .iter()
        .filter(|img| dom::non_empty_attribute(img, "alt").is_some())
        .count();
    let image_alt_ratio = if images.is_empty() {
        0.0
    } else {
        images_with_alt as f64 / images.len() as f64
    };

    let semantic_elements: BTreeMap<String, usize> = SEMANTIC_ELEMENTS
        .iter()
        .map(|tag| ((*tag).to_string(), dom::count(doc, tag)))
        .filter(|(_, n)| *n > 0)
        .collect();

    let text = dom::visible_text(doc);

    let mut report = ContentStructureReport {
        headings,
        heading_hierarchy_score: hierarchy_score(&levels),
        paragraphs: dom::count(doc, "p"),
        lists: dom::count(doc, "ul, ol"),
        list_items: dom::count(doc, "li"),
        tables: dom::count(doc, "table"),
        images: images.len(),
        images_with_alt,
        image_alt_ratio,
        faq_sections: faq::detect(doc, json_ld, opts),
        word_count: text.split_whitespace().count(),
        readability: readability::measure(&text),
        keyword_density: readability::keyword_density(
            &text,
            &opts.stop_words,
            opts.min_keyword_length,
            opts.keyword_limit,
        ),
        semantic_elements,
        structured_patterns: structured_patterns(doc),
        content_diversity_score: 0.0,
        entities: entities::extract(&text, opts.max_entities_per_kind),
    };
    report.content_diversity_score = diversity_score(&report);

    debug!(
        headings = levels.len(),
        words = report.word_count,
        faq_sections = report.faq_sections.len(),
        diversity = report.content_diversity_score,
        "content structure analyzed"
    );

    report
}

/// Heading hierarchy quality (0–1) from levels in document order.
///
/// Each jump of more than one level deeper is a violation. A missing H1 halves
/// the score; a first heading other than H1 costs a further fifth.
#[must_use]
pub fn hierarchy_score(levels: &[u8]) -> f64 {
    let Some(&first) = levels.first() else {
        return 0.0;
    };

    let violations = levels
        .windows(2)
        .filter(|pair| pair[1] > pair[0] + 1)
        .count();

    let mut score = 1.0 - violations as f64 / levels.len() as f64;
    if !levels.contains(&1) {
        score *= 0.5;
    }
    if first != 1 {
        score *= 0.8;
    }

    score.clamp(0.0, 1.0)
}

fn structured_patterns(doc: &Document) -> StructuredPatterns {
    let tables_with_headers = dom::select_each(doc, "table")
        .iter()
        .filter(|t| t.select("th, thead").exists())
        .count();
    let captioned_figures = dom::select_each(doc, "figure")
        .iter()
        .filter(|f| f.select("figcaption").exists())
        .count();

    StructuredPatterns {
        definition_lists: dom::count(doc, "dl"),
        blockquotes: dom::count(doc, "blockquote"),
        code_blocks: dom::count(doc, "pre"),
        tables_with_headers,
        captioned_figures,
        expandable_sections: dom::count(doc, "details"),
    }
}

/// Variety of content features (0–1).
///
/// Heading levels, paragraphs, lists, tables, FAQ, images and semantic
/// elements each contribute a capped share.
#[must_use]
pub fn diversity_score(report: &ContentStructureReport) -> f64 {
    let distinct_levels = report.headings.values().filter(|n| **n > 0).count();

    let mut score = (distinct_levels as f64 * 0.07).min(0.2)
        + (report.paragraphs as f64 * 0.03).min(0.15)
        + (report.lists as f64 * 0.075).min(0.15)
        + (report.images as f64 * 0.05).min(0.1)
        + (report.semantic_elements.len() as f64 * 0.03).min(0.15);
    if report.tables > 0 {
        score += 0.1;
    }
    if !report.faq_sections.is_empty() {
        score += 0.15;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_html(html: &str) -> ContentStructureReport {
        let doc = Document::from(html);
        analyze(&doc, &ParsedBlocks::default(), &Options::default())
    }

    #[test]
    fn test_counts() {
        let report = analyze_html(
            r#"<main><article>
                <h1>Guide</h1><h2>Part</h2><h3>Detail</h3>
                <p>First paragraph.</p><p>Second paragraph.</p>
                <ul><li>a</li><li>b</li></ul><ol><li>c</li></ol>
                <table><thead><tr><th>x</th></tr></thead></table>
                <img src="a.png" alt="A"><img src="b.png">
                <figure><img src="c.png" alt=""><figcaption>Cap</figcaption></figure>
            </article></main>"#,
        );

        assert_eq!(report.heading_count(1), 1);
        assert_eq!(report.heading_count(3), 1);
        assert_eq!(report.total_headings(), 3);
        assert_eq!(report.paragraphs, 2);
        assert_eq!(report.lists, 2);
        assert_eq!(report.list_items, 3);
        assert_eq!(report.tables, 1);
        assert_eq!(report.images, 3);
        assert_eq!(report.images_with_alt, 1);
        assert!((report.image_alt_ratio - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.structured_patterns.tables_with_headers, 1);
        assert_eq!(report.structured_patterns.captioned_figures, 1);
        assert_eq!(report.semantic_elements.get("main"), Some(&1));
        assert!(!report.semantic_elements.contains_key("nav"));
        assert!((report.heading_hierarchy_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hierarchy_penalties() {
        assert!(hierarchy_score(&[]).abs() < f64::EPSILON);
        assert!((hierarchy_score(&[1, 2, 3, 2]) - 1.0).abs() < 1e-9);
        // one skip out of three headings
        assert!((hierarchy_score(&[1, 3, 4]) - 2.0 / 3.0).abs() < 1e-9);
        // no H1 and not starting at H1
        assert!((hierarchy_score(&[2, 3]) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_empty_document() {
        let report = analyze_html("");

        assert_eq!(report.word_count, 0);
        assert_eq!(report.total_headings(), 0);
        assert!(report.heading_hierarchy_score.abs() < f64::EPSILON);
        assert!(report.image_alt_ratio.abs() < f64::EPSILON);
        assert!(report.content_diversity_score.abs() < f64::EPSILON);
        assert!(report.faq_sections.is_empty());
        assert!(report.keyword_density.is_empty());
    }

    #[test]
    fn test_word_count_ignores_scripts() {
        let report = analyze_html("<body><p>one two three</p><script>var a = b + c;</script></body>");
        assert_eq!(report.word_count, 3);
    }

    #[test]
    fn test_diversity_score_caps() {
        let mut html = String::from("<h1>T</h1>");
        for _ in 0..20 {
            html.push_str("<p>para</p><ul><li>x</li></ul><img src=x.png>");
        }
        let report = analyze_html(&html);

        // headings 0.07 + paragraphs 0.15 + lists 0.15 + images 0.1
        assert!((report.content_diversity_score - 0.47).abs() < 1e-9);
    }
}
