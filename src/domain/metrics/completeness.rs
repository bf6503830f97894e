//! Completeness: proper ending, minimum length, sentence density and progression

use super::constants::*;
use super::text;

pub fn score(text: &str) -> f64 {
    let sentences = text::sentences(text);

    ending_score(text, &sentences) * COMPLETENESS_ENDING_WEIGHT
        + threshold_score(text::word_count(text).max(1)) * COMPLETENESS_THRESHOLD_WEIGHT
        + density_score(&sentences) * COMPLETENESS_DENSITY_WEIGHT
        + progression_score(&sentences) * COMPLETENESS_PROGRESSION_WEIGHT
}

/// Terminal punctuation, with a penalty for trailing ellipses and dangling phrases
pub(crate) fn ending_score(text: &str, sentences: &[&str]) -> f64 {
    let trimmed = text.trim();
    let ellipsis = trimmed.ends_with("...");
    let terminated = trimmed.ends_with(['.', '!', '?']);

    let mut value = if terminated && !ellipsis {
        1.0
    } else if ellipsis {
        0.6
    } else {
        0.4
    };

    let last_sentence = sentences
        .last()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    if CUTOFF_CUES.iter().any(|cue| last_sentence.ends_with(cue)) {
        value *= CUTOFF_PENALTY;
    }

    value
}

pub(crate) fn threshold_score(words: usize) -> f64 {
    let wc = words as f64;
    let (low, high) = MIN_COMPLETE_WORDS;

    if wc < low {
        wc / low * 0.6
    } else if wc < high {
        0.6 + (wc - low) / (high - low) * 0.4
    } else {
        1.0
    }
}

/// Penalizes a high share of fragments under four words
pub(crate) fn density_score(sentences: &[&str]) -> f64 {
    if sentences.is_empty() {
        return 0.9;
    }

    let short = sentences
        .iter()
        .filter(|s| text::word_count(s) < SHORT_SENTENCE_WORDS)
        .count();
    let short_ratio = text::ratio(short, sentences.len());

    if short_ratio > SHORT_SENTENCE_RATIO_LIMIT {
        (0.9 - (short_ratio - SHORT_SENTENCE_RATIO_LIMIT) / 0.3 * 0.3).max(0.6)
    } else {
        0.9
    }
}

/// Compares the first and last thirds of the response
pub(crate) fn progression_score(sentences: &[&str]) -> f64 {
    if sentences.len() < 3 {
        return 0.8;
    }

    let third = sentences.len() / 3;
    let first = text::char_len(&sentences[..third].join(" "));
    let last = text::char_len(&sentences[sentences.len() - third..].join(" "));

    if last as f64 >= first as f64 * 0.5 {
        1.0
    } else {
        0.6
    }
}
