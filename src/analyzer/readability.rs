//! Readability and keyword density estimates.
//!
//! Sentence, word and syllable counts come from regexes and a vowel-group
//! heuristic. Good enough to tell dense legal prose from a product blurb, not
//! a linguistic measurement.

use std::collections::{BTreeMap, BTreeSet};

use crate::patterns::{SENTENCE_END, VOWEL_GROUP, WORD};
use crate::result::{KeywordDensity, Readability};

/// Estimate syllables in a single word.
///
/// Counts vowel groups, drops a trailing silent `e` (but not `-le`), and never
/// returns less than one for a non-empty word.
#[must_use]
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_ascii_lowercase();
    if word.is_empty() {
        return 0;
    }

    let mut count = VOWEL_GROUP.find_iter(&word).count();
    if count > 1 && word.ends_with('e') && !word.ends_with("le") {
        count -= 1;
    }

    count.max(1)
}

/// Flesch–Kincaid grade, reading ease and averages for a block of text.
#[must_use]
pub fn measure(text: &str) -> Readability {
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return Readability::default();
    }

    let sentences = SENTENCE_END
        .split(text)
        .filter(|s| WORD.is_match(s))
        .count()
        .max(1);

    let word_count = words.len() as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let letters: usize = words
        .iter()
        .map(|w| w.chars().filter(char::is_ascii_alphabetic).count())
        .sum();

    let avg_sentence_length = word_count / sentences as f64;
    let avg_syllables_per_word = syllables as f64 / word_count;

    Readability {
        flesch_kincaid_grade: 0.39 * avg_sentence_length + 11.8 * avg_syllables_per_word - 15.59,
        flesch_reading_ease: 206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables_per_word,
        avg_sentence_length,
        avg_word_length: letters as f64 / word_count,
        avg_syllables_per_word,
    }
}

/// Most frequent non-stop-words, highest count first, ties alphabetical.
///
/// Density is the share of all words in `text`, in percent.
#[must_use]
pub fn keyword_density(
    text: &str,
    stop_words: &BTreeSet<String>,
    min_length: usize,
    limit: usize,
) -> Vec<KeywordDensity> {
    let mut total = 0usize;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for m in WORD.find_iter(text) {
        total += 1;
        let word = m.as_str().to_lowercase();
        if word.chars().count() < min_length || stop_words.contains(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // BTreeMap order makes the stable sort break ties alphabetically.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(keyword, count)| KeywordDensity {
            density: count as f64 / total as f64 * 100.0,
            keyword,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables(""), 0);
    }

    #[test]
    fn test_measure_simple_text() {
        let r = measure("The cat sat. The dog ran.");

        assert!((r.avg_sentence_length - 3.0).abs() < 1e-9);
        assert!((r.avg_syllables_per_word - 1.0).abs() < 1e-9);
        assert!((r.flesch_kincaid_grade - (0.39 * 3.0 + 11.8 - 15.59)).abs() < 1e-9);
        assert!((r.avg_word_length - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_measure_empty_text() {
        assert_eq!(measure("  ... !!"), Readability::default());
    }

    #[test]
    fn test_text_without_terminator_is_one_sentence() {
        let r = measure("one two three four");
        assert!((r.avg_sentence_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_density_ranking() {
        let stop: BTreeSet<String> = ["the", "and"].iter().map(|s| (*s).to_string()).collect();
        let kd = keyword_density(
            "Widgets and gadgets. The widgets are durable widgets; gadgets too. Durable!",
            &stop,
            3,
            2,
        );

        assert_eq!(kd.len(), 2);
        assert_eq!(kd[0].keyword, "widgets");
        assert_eq!(kd[0].count, 3);
        // "durable" and "gadgets" tie at 2; alphabetical order decides.
        assert_eq!(kd[1].keyword, "durable");
        assert!((kd[0].density - 3.0 / 11.0 * 100.0).abs() < 1e-9);
    }
}
