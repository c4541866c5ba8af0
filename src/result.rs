//! Result types for audit output.
//!
//! This module defines the per-analyzer reports, the component scores and the
//! final [`AuditResult`]. Every map is ordered so that serialized output is
//! byte-identical for identical input.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link between two JSON-LD entities expressed through `@id` references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRelationship {
    /// `@type` of the entity holding the reference.
    pub source_type: String,

    /// Dot-joined property path of the referencing entity (empty at top level).
    pub source_path: String,

    /// Property name carrying the reference (e.g. `isPartOf`).
    pub relation: String,

    /// `@type` of the referenced entity.
    pub target_type: String,

    /// The referenced `@id`.
    pub target_id: String,
}

/// Structured data (JSON-LD / Schema.org) findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDataReport {
    /// At least one parsed JSON-LD block declares a `@type`.
    pub found: bool,

    /// Number of JSON-LD blocks that parsed successfully.
    pub schema_count: usize,

    /// Union of all `@type` names.
    pub types: BTreeSet<String>,

    /// Dot-joined property path mapped to its occurrence count.
    pub properties: BTreeMap<String, usize>,

    /// One message per malformed JSON-LD block.
    pub parse_errors: Vec<String>,

    /// Best completeness ratio (0–1) per high-value type present.
    pub completeness: BTreeMap<String, f64>,

    /// `@id` links between entities.
    pub relationships: Vec<SchemaRelationship>,

    /// Elements carrying a microdata `itemtype`.
    pub microdata_items: usize,

    /// Elements carrying an RDFa `typeof`.
    pub rdfa_items: usize,

    /// Traversal stopped at the configured depth limit somewhere.
    pub depth_limited: bool,

    /// Overall structured data quality (0–100).
    pub quality_score: u8,
}

impl StructuredDataReport {
    /// Total number of property occurrences across all blocks.
    #[must_use]
    pub fn property_occurrences(&self) -> usize {
        self.properties.values().sum()
    }

    /// Whether any of the given type names is present.
    #[must_use]
    pub fn has_any_type(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.types.contains(*n))
    }
}

/// Classification of a title or description length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthBand {
    /// Tag absent or empty.
    #[default]
    Missing,
    /// Far outside the recommended range.
    Poor,
    /// Usable but outside the optimal range.
    Acceptable,
    /// Within the optimal range.
    Optimal,
}

/// Completeness ratios of the meta tag set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaCompleteness {
    /// Title, description, canonical, robots and viewport (0–1).
    pub basic: f64,
    /// Open Graph, Twitter and JSON-LD social profile (0–1).
    pub social: f64,
    /// `0.7 × basic + 0.3 × social` (0–1).
    pub overall: f64,
}

/// Meta tag findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaTagReport {
    /// Text of the `<title>` element.
    pub title: Option<String>,
    /// Title length in characters.
    pub title_length: usize,
    /// Title length classification.
    pub title_band: LengthBand,
    /// `<meta name="description">` content.
    pub description: Option<String>,
    /// Description length in characters.
    pub description_length: usize,
    /// Description length classification.
    pub description_band: LengthBand,
    /// `<meta name="keywords">` content.
    pub keywords: Option<String>,
    /// `<link rel="canonical">` target.
    pub canonical: Option<String>,
    /// `<meta name="robots">` directive.
    pub robots: Option<String>,
    /// `<meta name="viewport">` content.
    pub viewport: Option<String>,
    /// `og:*` and `article:*` properties.
    pub og_tags: BTreeMap<String, String>,
    /// `twitter:*` properties.
    pub twitter_tags: BTreeMap<String, String>,
    /// Completeness ratios.
    pub completeness: MetaCompleteness,
}

impl MetaTagReport {
    /// Robots directive contains `noindex`.
    #[must_use]
    pub fn is_noindex(&self) -> bool {
        self.robots
            .as_deref()
            .is_some_and(|r| r.to_ascii_lowercase().contains("noindex"))
    }
}

/// How a FAQ section was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaqMethod {
    /// FAQPage / Question JSON-LD.
    Schema,
    /// `<dl>` with `<dt>`/`<dd>` pairs.
    DefinitionList,
    /// Question-like heading followed by an answer block.
    HeadingPattern,
}

impl FaqMethod {
    /// Detection confidence attached to this method.
    #[must_use]
    pub fn confidence(self) -> Confidence {
        match self {
            Self::Schema => Confidence::High,
            Self::DefinitionList => Confidence::Medium,
            Self::HeadingPattern => Confidence::Low,
        }
    }
}

/// Confidence label for heuristic detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Explicit markup.
    High,
    /// Structural pattern.
    Medium,
    /// Textual heuristic.
    Low,
}

/// A single question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// Question text.
    pub question: String,
    /// Answer text (may be truncated).
    pub answer: String,
}

/// A detected FAQ section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSection {
    /// Detection method.
    pub method: FaqMethod,
    /// Confidence derived from the method.
    pub confidence: Confidence,
    /// Questions found in the section.
    pub questions: Vec<FaqItem>,
}

/// Readability estimates.
///
/// These come from sentence, word and vowel-group counting. They are
/// approximations and should not be treated as linguistic ground truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    /// Flesch–Kincaid grade level.
    pub flesch_kincaid_grade: f64,
    /// Flesch reading ease.
    pub flesch_reading_ease: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Letters per word.
    pub avg_word_length: f64,
    /// Estimated syllables per word.
    pub avg_syllables_per_word: f64,
}

/// A frequent non-stop-word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensity {
    /// Lowercased word.
    pub keyword: String,
    /// Occurrences.
    pub count: usize,
    /// Share of all words, in percent.
    pub density: f64,
}

/// Counts of structure-bearing markup patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPatterns {
    /// `<dl>` elements.
    pub definition_lists: usize,
    /// `<blockquote>` elements.
    pub blockquotes: usize,
    /// `<pre>` blocks.
    pub code_blocks: usize,
    /// Tables with `<th>` or `<thead>`.
    pub tables_with_headers: usize,
    /// `<figure>` elements with a `<figcaption>`.
    pub captioned_figures: usize,
    /// `<details>` elements.
    pub expandable_sections: usize,
}

/// Heuristic named-entity mentions.
///
/// Extracted with capitalization and suffix patterns; expect both misses and
/// false positives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMentions {
    /// Honorific- or byline-introduced names.
    pub people: Vec<String>,
    /// Names ending in a corporate suffix.
    pub organizations: Vec<String>,
    /// `City, ST` patterns.
    pub locations: Vec<String>,
    /// Capitalized names followed by a model marker or trademark sign.
    pub products: Vec<String>,
}

impl EntityMentions {
    /// Total mentions across kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.people.len() + self.organizations.len() + self.locations.len() + self.products.len()
    }
}

/// Content structure findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStructureReport {
    /// Heading counts keyed `h1`..`h6`.
    pub headings: BTreeMap<String, usize>,
    /// Heading hierarchy quality (0–1).
    pub heading_hierarchy_score: f64,
    /// `<p>` elements.
    pub paragraphs: usize,
    /// `<ul>`/`<ol>` elements.
    pub lists: usize,
    /// `<li>` elements.
    pub list_items: usize,
    /// `<table>` elements.
    pub tables: usize,
    /// `<img>` elements.
    pub images: usize,
    /// Images with non-empty `alt`.
    pub images_with_alt: usize,
    /// `images_with_alt / images`, 0 when there are no images.
    pub image_alt_ratio: f64,
    /// Detected FAQ sections, unioned across methods.
    pub faq_sections: Vec<FaqSection>,
    /// Whitespace-separated words of visible text.
    pub word_count: usize,
    /// Readability estimates.
    pub readability: Readability,
    /// Most frequent keywords.
    pub keyword_density: Vec<KeywordDensity>,
    /// Semantic HTML5 element counts (present elements only).
    pub semantic_elements: BTreeMap<String, usize>,
    /// Structure-bearing pattern counts.
    pub structured_patterns: StructuredPatterns,
    /// Variety of content features (0–1).
    pub content_diversity_score: f64,
    /// Heuristic entity mentions.
    pub entities: EntityMentions,
}

impl ContentStructureReport {
    /// Count for a heading level (`1..=6`).
    #[must_use]
    pub fn heading_count(&self, level: u8) -> usize {
        self.headings.get(&format!("h{level}")).copied().unwrap_or(0)
    }

    /// Total headings on the page.
    #[must_use]
    pub fn total_headings(&self) -> usize {
        self.headings.values().sum()
    }

    /// Total questions across all FAQ sections.
    #[must_use]
    pub fn faq_count(&self) -> usize {
        self.faq_sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// Transport and site-level findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalFactorReport {
    /// Final URL uses https.
    pub ssl_enabled: bool,
    /// Responsive viewport plus responsive styling.
    pub mobile_friendly: bool,
    /// Response body size in KiB.
    pub page_size_kb: f64,
    /// Fetch time in milliseconds.
    pub load_time_ms: u64,
    /// `/sitemap.xml` answered the probe.
    pub has_sitemap: bool,
    /// `/robots.txt` answered the probe.
    pub has_robots_txt: bool,
    /// Anchors pointing at the page's own host.
    pub internal_links: usize,
    /// Anchors pointing elsewhere.
    pub external_links: usize,
    /// HTTP status of the fetched document.
    pub status_code: u16,
}

/// The four component scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Structured data score.
    pub schema: u8,
    /// Meta tag score.
    pub meta: u8,
    /// Content structure score.
    pub content: u8,
    /// Technical score.
    pub technical: u8,
}

/// Recommendation urgency. Ordered `High < Medium < Low` for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Fix first.
    High,
    /// Worth fixing.
    Medium,
    /// Nice to have.
    Low,
}

/// Area a recommendation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Structured data.
    Schema,
    /// Meta tags.
    Meta,
    /// Content structure.
    Content,
    /// Technical factors.
    Technical,
}

/// An actionable improvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Urgency.
    pub priority: Priority,
    /// Area.
    pub category: Category,
    /// What is wrong.
    pub issue: String,
    /// What to do.
    pub recommendation: String,
    /// How to do it.
    pub implementation: String,
}

/// The complete outcome of one audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Host of the audited URL.
    pub domain: String,
    /// Injected audit time.
    pub timestamp: DateTime<Utc>,
    /// Engine version that produced this result.
    pub engine_version: String,
    /// Structured data findings.
    pub structured_data: StructuredDataReport,
    /// Meta tag findings.
    pub meta_tags: MetaTagReport,
    /// Content structure findings.
    pub content: ContentStructureReport,
    /// Technical findings.
    pub technical: TechnicalFactorReport,
    /// Component scores.
    pub component_scores: ComponentScores,
    /// Weighted overall score (0–100).
    pub overall_score: u8,
    /// Recommendations, high priority first.
    pub recommendations: Vec<Recommendation>,
}
