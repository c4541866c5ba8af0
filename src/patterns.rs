//! Compiled regex patterns for the content and technical analyzers.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Entity and readability patterns are heuristics, not NLP.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// FAQ Detection Patterns
// =============================================================================

/// Heading text marked as a question: `Q:`, `Q.`, `Q)`, "Question" or "FAQ".
pub static FAQ_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^\s*Q\s*[:.)]|\bquestions?\b|\bfaqs?\b)").expect("FAQ_HEADING regex")
});

// =============================================================================
// Readability Patterns
// =============================================================================

/// Sentence terminators.
pub static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]+").expect("SENTENCE_END regex")
});

/// Alphabetic words, allowing an inner apostrophe.
pub static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").expect("WORD regex")
});

/// Vowel groups used to estimate syllables.
pub static VOWEL_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[aeiouy]+").expect("VOWEL_GROUP regex")
});

// =============================================================================
// Entity Patterns
// =============================================================================

/// Honorific followed by one or two capitalized names.
pub static PERSON_HONORIFIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)")
        .expect("PERSON_HONORIFIC regex")
});

/// Byline: "by First Last".
pub static PERSON_BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[Bb]y\s+([A-Z][a-z]+\s+[A-Z][a-z]+)\b").expect("PERSON_BYLINE regex")
});

/// Capitalized name ending in a corporate suffix.
pub static ORGANIZATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b((?:[A-Z][A-Za-z0-9&]*\s+){1,4}(?:Inc|LLC|Ltd|Corp))\b\.?")
        .expect("ORGANIZATION regex")
});

/// `City, ST` with a two-letter region code.
pub static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s[A-Z][a-z]+)?,\s[A-Z]{2})\b").expect("LOCATION regex")
});

/// Capitalized name followed by a model number or tier marker.
pub static PRODUCT_MODEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z]+\s(?:\d+[A-Za-z]?|Pro|Plus|Max|Mini|Ultra))\b")
        .expect("PRODUCT_MODEL regex")
});

/// Name carrying a trademark sign.
pub static PRODUCT_TRADEMARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][\w-]+)[™®]").expect("PRODUCT_TRADEMARK regex")
});

// =============================================================================
// Technical Patterns
// =============================================================================

/// A width-based `@media` rule in inline CSS.
pub static RESPONSIVE_MEDIA_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@media[^{]*\((?:max|min)-(?:device-)?width").expect("RESPONSIVE_MEDIA_RULE regex")
});
