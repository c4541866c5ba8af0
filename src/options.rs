//! Configuration options for auditing.
//!
//! The `Options` struct holds every lookup table and weight the analyzers
//! consult. It is immutable once handed to an [`Auditor`](crate::Auditor), so
//! tests can substitute alternate tables without touching global state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weights applied to the four component scores when computing the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the structured data score.
    ///
    /// Default: `0.35`
    pub schema: f64,

    /// Weight of the meta tag score.
    ///
    /// Default: `0.25`
    pub meta: f64,

    /// Weight of the content structure score.
    ///
    /// Default: `0.30`
    pub content: f64,

    /// Weight of the technical score.
    ///
    /// Default: `0.10`
    pub technical: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            schema: 0.35,
            meta: 0.25,
            content: 0.30,
            technical: 0.10,
        }
    }
}

impl ScoreWeights {
    fn validate(&self) -> Result<()> {
        let all = [
            ("schema", self.schema),
            ("meta", self.meta),
            ("content", self.content),
            ("technical", self.technical),
        ];

        for (name, weight) in all {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(Error::InvalidConfig(format!(
                    "{name} weight must be within [0, 1], got {weight}"
                )));
            }
        }

        let sum: f64 = all.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(Error::InvalidConfig(format!(
                "component weights must sum to 1.0, got {sum}"
            )));
        }

        Ok(())
    }
}

/// Configuration options for an audit.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the standard tables.
///
/// # Example
///
/// ```rust
/// use llmo_audit::{Auditor, Options};
///
/// let mut options = Options::default();
/// options.max_json_depth = 8;
/// let auditor = Auditor::new(options)?;
/// # Ok::<(), llmo_audit::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Schema.org types mapped to the properties an LLM finds most useful.
    ///
    /// Drives per-type completeness ratios.
    ///
    /// Default: 13 high-value types (Organization, Product, FAQPage, ...)
    pub required_properties: BTreeMap<String, Vec<String>>,

    /// Points awarded for the presence of each high-value Schema.org type.
    ///
    /// Default: FAQPage 15, Organization/LocalBusiness/Product 10, ...
    pub type_weights: BTreeMap<String, u32>,

    /// Weights of the component scores in the overall score.
    ///
    /// Default: schema 0.35, meta 0.25, content 0.30, technical 0.10
    pub weights: ScoreWeights,

    /// Maximum nesting depth walked inside a JSON-LD block.
    ///
    /// Values nested deeper are ignored and the report is flagged.
    ///
    /// Default: `32`
    pub max_json_depth: usize,

    /// Words excluded from keyword density.
    ///
    /// Default: common English function words
    pub stop_words: BTreeSet<String>,

    /// Minimum length of a word to be considered a keyword.
    ///
    /// Default: `3`
    pub min_keyword_length: usize,

    /// Number of keywords kept in the density table.
    ///
    /// Default: `10`
    pub keyword_limit: usize,

    /// Maximum number of entity mentions kept per kind.
    ///
    /// Default: `20`
    pub max_entities_per_kind: usize,

    /// Question templates suggested when a page has no FAQ content.
    ///
    /// `{brand}` is replaced with the page's site name.
    ///
    /// Default: five generic brand questions
    pub faq_question_templates: Vec<String>,
}

const REQUIRED_PROPERTIES: &[(&str, &[&str])] = &[
    ("Organization", &["name", "url", "logo", "description", "sameAs"]),
    ("LocalBusiness", &["name", "address", "telephone", "openingHours", "geo"]),
    ("Product", &["name", "description", "image", "brand", "offers"]),
    ("FAQPage", &["mainEntity", "name", "description", "url"]),
    ("Question", &["name", "acceptedAnswer", "text", "dateCreated"]),
    ("Article", &["headline", "author", "datePublished", "image", "publisher"]),
    ("BreadcrumbList", &["itemListElement", "name", "numberOfItems", "itemListOrder"]),
    ("WebSite", &["name", "url", "potentialAction", "description", "publisher"]),
    ("Person", &["name", "jobTitle", "worksFor", "url", "sameAs"]),
    ("Review", &["reviewRating", "author", "itemReviewed", "reviewBody", "datePublished"]),
    ("Event", &["name", "startDate", "location", "description", "offers"]),
    ("Recipe", &["name", "recipeIngredient", "recipeInstructions", "image", "totalTime"]),
    ("HowTo", &["name", "step", "description", "totalTime", "supply"]),
];

const TYPE_WEIGHTS: &[(&str, u32)] = &[
    ("FAQPage", 15),
    ("Organization", 10),
    ("LocalBusiness", 10),
    ("Product", 10),
    ("Article", 8),
    ("BreadcrumbList", 8),
    ("HowTo", 8),
    ("Review", 6),
    ("Event", 6),
    ("Recipe", 6),
    ("Question", 5),
    ("WebSite", 5),
    ("Person", 5),
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

const FAQ_QUESTION_TEMPLATES: &[&str] = &[
    "What is {brand}?",
    "How does {brand} work?",
    "What makes {brand} different?",
    "How much does {brand} cost?",
    "How can I contact {brand}?",
];

impl Default for Options {
    fn default() -> Self {
        Self {
            required_properties: REQUIRED_PROPERTIES
                .iter()
                .map(|(ty, props)| {
                    ((*ty).to_string(), props.iter().map(|p| (*p).to_string()).collect())
                })
                .collect(),
            type_weights: TYPE_WEIGHTS
                .iter()
                .map(|(ty, weight)| ((*ty).to_string(), *weight))
                .collect(),
            weights: ScoreWeights::default(),
            max_json_depth: 32,
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            min_keyword_length: 3,
            keyword_limit: 10,
            max_entities_per_kind: 20,
            faq_question_templates: FAQ_QUESTION_TEMPLATES
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
        }
    }
}

impl Options {
    /// Check the tables and weights for programmer errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the weights are out of range or do
    /// not sum to 1, a required-property list is empty, or the JSON depth
    /// limit is zero.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.max_json_depth == 0 {
            return Err(Error::InvalidConfig("max_json_depth must be at least 1".to_string()));
        }

        if let Some((ty, _)) = self.required_properties.iter().find(|(_, props)| props.is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "required property list for {ty} is empty"
            )));
        }

        Ok(())
    }
}
