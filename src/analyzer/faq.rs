//! FAQ section detection.
//!
//! Three detectors run in a fixed order and their sections are unioned:
//! FAQPage / Question JSON-LD, `<dl>` question lists, and headings marked as
//! questions (`Q:`, "Question", "FAQ") followed by an answer block.

use dom_query::{Document, Selection};
use serde_json::Value;

use super::json_ld::{self, Entity, ParsedBlocks};
use crate::dom;
use crate::patterns::FAQ_HEADING;
use crate::result::{FaqItem, FaqMethod, FaqSection};
use crate::Options;

/// Answers longer than this are cut.
const MAX_ANSWER_CHARS: usize = 500;

/// An answer block must carry at least this much text.
const MIN_ANSWER_CHARS: usize = 20;

/// Elements that can hold the answer to a question heading.
const ANSWER_TAGS: &[&str] = &["p", "div", "dl", "ul", "ol", "section", "dd"];

/// Detect FAQ sections with every method, schema first.
#[must_use]
pub fn detect(doc: &Document, json_ld: &ParsedBlocks, opts: &Options) -> Vec<FaqSection> {
    let mut sections = from_schema(json_ld, opts);
    sections.extend(from_definition_lists(doc));
    sections.extend(from_headings(doc));
    sections
}

fn section(method: FaqMethod, questions: Vec<FaqItem>) -> Option<FaqSection> {
    (!questions.is_empty()).then(|| FaqSection {
        method,
        confidence: method.confidence(),
        questions,
    })
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_ANSWER_CHARS) {
        Some((idx, _)) => format!("{}...", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

// === Schema ===

fn from_schema(parsed: &ParsedBlocks, opts: &Options) -> Vec<FaqSection> {
    let walk = json_ld::walk(&parsed.values, opts.max_json_depth);

    let pages: Vec<&Entity<'_>> = walk.entities.iter().filter(|e| e.is_a("FAQPage")).collect();

    if pages.is_empty() {
        let standalone: Vec<FaqItem> = walk
            .entities
            .iter()
            .filter(|e| e.is_a("Question"))
            .filter_map(|e| question_item(e.map))
            .collect();
        return section(FaqMethod::Schema, standalone).into_iter().collect();
    }

    pages
        .iter()
        .filter_map(|page| {
            let questions = match page.map.get("mainEntity") {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(question_item)
                    .collect(),
                Some(Value::Object(map)) => question_item(map).into_iter().collect(),
                _ => Vec::new(),
            };
            section(FaqMethod::Schema, questions)
        })
        .collect()
}

/// A Question object's name and first accepted answer text.
fn question_item(map: &serde_json::Map<String, Value>) -> Option<FaqItem> {
    let question = map.get("name").and_then(Value::as_str)?.trim();
    if question.is_empty() {
        return None;
    }

    let answer = match map.get("acceptedAnswer") {
        Some(Value::Array(items)) => items.first().and_then(answer_text),
        Some(value) => answer_text(value),
        None => None,
    }
    .unwrap_or_default();

    Some(FaqItem {
        question: question.to_string(),
        answer: truncate(answer.trim()),
    })
}

fn answer_text(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
}

// === Definition lists ===

fn from_definition_lists(doc: &Document) -> Vec<FaqSection> {
    dom::select_each(doc, "dl")
        .iter()
        .filter_map(|dl| {
            let mut questions = Vec::new();
            let mut pending: Option<String> = None;

            for child in dom::element_children(dl) {
                match dom::tag_name(&child).as_deref() {
                    Some("dt") => {
                        let text = dom::normalized_text(&child);
                        pending = (!text.is_empty()).then_some(text);
                    }
                    Some("dd") => {
                        if let Some(question) = pending.take() {
                            questions.push(FaqItem {
                                question,
                                answer: truncate(&dom::normalized_text(&child)),
                            });
                        }
                    }
                    _ => {}
                }
            }

            section(FaqMethod::DefinitionList, questions)
        })
        .collect()
}

// === Headings ===

fn answer_block<'a>(heading: &Selection<'a>) -> Option<Selection<'a>> {
    let next = dom::next_element_sibling(heading)?;
    let tag = dom::tag_name(&next)?;
    ANSWER_TAGS.contains(&tag.as_str()).then_some(next)
}

fn from_headings(doc: &Document) -> Vec<FaqSection> {
    let questions: Vec<FaqItem> = dom::select_each(doc, "h1, h2, h3, h4, h5, h6")
        .iter()
        .filter_map(|heading| {
            let question = dom::normalized_text(heading);
            if !FAQ_HEADING.is_match(&question) {
                return None;
            }

            let answer = dom::normalized_text(&answer_block(heading)?);
            (answer.chars().count() >= MIN_ANSWER_CHARS).then(|| FaqItem {
                question,
                answer: truncate(&answer),
            })
        })
        .collect();

    section(FaqMethod::HeadingPattern, questions).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Confidence;

    fn detect_html(html: &str) -> Vec<FaqSection> {
        let doc = Document::from(html);
        detect(&doc, &json_ld::parse_blocks(&doc), &Options::default())
    }

    #[test]
    fn test_schema_faq_page() {
        let sections = detect_html(
            r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"FAQPage","mainEntity":[
                {"@type":"Question","name":"What is Acme?","acceptedAnswer":{"@type":"Answer","text":"A widget maker."}},
                {"@type":"Question","name":"Where is Acme?","acceptedAnswer":[{"@type":"Answer","text":"Springfield."}]}
            ]}</script>"#,
        );

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].method, FaqMethod::Schema);
        assert_eq!(sections[0].confidence, Confidence::High);
        assert_eq!(sections[0].questions.len(), 2);
        assert_eq!(sections[0].questions[1].answer, "Springfield.");
    }

    #[test]
    fn test_standalone_questions_form_one_section() {
        let sections = detect_html(
            r#"<script type="application/ld+json">{"@type":"Question","name":"Is it free?","acceptedAnswer":{"text":"Yes."}}</script>
               <script type="application/ld+json">{"@type":"Question","name":"Is it fast?"}</script>"#,
        );

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].questions.len(), 2);
        assert_eq!(sections[0].questions[1].answer, "");
    }

    #[test]
    fn test_definition_list() {
        let sections = detect_html(
            "<dl><dt>Shipping time?</dt><dd>Two days.</dd><dt>Returns?</dt><dd>Thirty days.</dd><dd>orphan</dd></dl>",
        );

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].method, FaqMethod::DefinitionList);
        assert_eq!(sections[0].confidence, Confidence::Medium);
        assert_eq!(sections[0].questions.len(), 2);
    }

    #[test]
    fn test_heading_pattern_needs_answer_block() {
        let sections = detect_html(
            "<h3>Q: How do I reset my password?</h3><p>Open settings and choose reset password.</p>\
             <h3>Question: Is there a mobile app?</h3><p>No.</p>\
             <h3>FAQ: Can I export data?</h3><h4>Sub</h4>\
             <h2>Our history</h2><p>Founded long ago by people who liked widgets.</p>",
        );

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].method, FaqMethod::HeadingPattern);
        assert_eq!(sections[0].confidence, Confidence::Low);
        assert_eq!(sections[0].questions.len(), 1);
        assert_eq!(sections[0].questions[0].question, "Q: How do I reset my password?");
    }

    #[test]
    fn test_question_mark_alone_is_not_a_faq_heading() {
        let sections = detect_html(
            "<h2>Why choose Acme for your next project?</h2>\
             <p>We deliver quality widgets on time, every time.</p>",
        );

        assert!(sections.is_empty());
    }

    #[test]
    fn test_no_faq() {
        assert!(detect_html("<h1>Welcome</h1><p>Plain page.</p>").is_empty());
    }

    #[test]
    fn test_long_answer_truncated() {
        let long = "word ".repeat(200);
        let html = format!("<dl><dt>Q?</dt><dd>{long}</dd></dl>");
        let sections = detect_html(&html);

        let answer = &sections[0].questions[0].answer;
        assert!(answer.ends_with("..."));
        assert!(answer.chars().count() <= MAX_ANSWER_CHARS + 3);
    }
}
