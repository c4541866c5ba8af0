//! Heuristic entity mentions from visible text.

use std::collections::BTreeSet;

use regex::Regex;

use crate::patterns::{LOCATION, ORGANIZATION, PERSON_BYLINE, PERSON_HONORIFIC, PRODUCT_MODEL, PRODUCT_TRADEMARK};
use crate::result::EntityMentions;

/// Collect people, organizations, locations and products.
///
/// Each kind is deduplicated, sorted and capped at `limit`.
#[must_use]
pub fn extract(text: &str, limit: usize) -> EntityMentions {
    EntityMentions {
        people: collect(text, &[&PERSON_HONORIFIC, &PERSON_BYLINE], limit),
        organizations: collect(text, &[&ORGANIZATION], limit),
        locations: collect(text, &[&LOCATION], limit),
        products: collect(text, &[&PRODUCT_MODEL, &PRODUCT_TRADEMARK], limit),
    }
}

fn collect(text: &str, patterns: &[&Regex], limit: usize) -> Vec<String> {
    let found: BTreeSet<String> = patterns
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    found.into_iter().take(limit).collect()
}
