//! Specificity: numbers, proper nouns, example cues and concrete wording

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::*;
use super::text;

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?-u:\b)[0-9]+(?:\.[0-9]+)?(?:%|k|m|b)?(?-u:\b)").expect("valid number regex")
});

static CAPITALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+").expect("valid capitalized regex"));

pub fn score(text: &str) -> f64 {
    let words = text::words(text);

    if words.is_empty() {
        return 0.0;
    }

    let sentences = text::sentences(text);

    number_score(text, sentences.len()) * SPECIFICITY_NUMBER_WEIGHT
        + proper_noun_score(text, &words) * SPECIFICITY_PROPER_NOUN_WEIGHT
        + example_score(text) * SPECIFICITY_EXAMPLE_WEIGHT
        + concrete_score(&words) * SPECIFICITY_CONCRETE_WEIGHT
}

/// Numeric mentions per sentence
pub(crate) fn number_score(text: &str, sentence_count: usize) -> f64 {
    let numbers = NUMBER.find_iter(text).count();
    let density = text::ratio(numbers, sentence_count);

    (density / 2.0 * 0.5 + 0.5).min(1.0)
}

/// Capitalized words that do not open a sentence.
///
/// Sentence openers are detected by looking two characters before the
/// first occurrence of the word in the text, so a repeated word is judged
/// by its first position.
pub(crate) fn proper_noun_score(text: &str, words: &[&str]) -> f64 {
    let proper_nouns = words
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, word)| !follows_sentence_end(text, word))
        .filter(|(_, word)| CAPITALIZED.is_match(word))
        .count();
    let density = text::ratio(proper_nouns, words.len());

    (density / PROPER_NOUN_DENSITY_TARGET * 0.5 + 0.5).min(1.0)
}

fn follows_sentence_end(text: &str, word: &str) -> bool {
    text.find(word)
        .and_then(|idx| text[..idx].chars().rev().nth(1))
        .is_some_and(|c| matches!(c, '.' | '!' | '?'))
}

/// Counts distinct example cues present in the text
pub(crate) fn example_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let cues = EXAMPLE_CUES
        .iter()
        .filter(|cue| lowered.contains(*cue))
        .count();

    (cues as f64 / 2.0 * 0.5 + 0.5).min(1.0)
}

/// Action verbs and concrete word forms
pub(crate) fn concrete_score(words: &[&str]) -> f64 {
    let concrete = words
        .iter()
        .map(|w| w.to_lowercase())
        .filter(|w| text::char_len(w) > 4 && is_concrete(w))
        .count();
    let density = text::ratio(concrete, words.len());

    (density / CONCRETE_DENSITY_TARGET * 0.5 + 0.5).min(1.0)
}

fn is_concrete(word: &str) -> bool {
    ACTION_VERB_PREFIXES.iter().any(|p| word.starts_with(p))
        || word.ends_with("ing")
        || word.ends_with("ed")
        || word.ends_with("tion")
}
