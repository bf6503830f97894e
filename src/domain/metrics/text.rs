//! Tokenization helpers shared by the scorers

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+").expect("valid paragraph regex"));

static VOWEL_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]+").expect("valid vowel regex"));

/// Whitespace-separated tokens, punctuation attached
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Non-blank fragments between runs of `.`, `!` or `?`
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Non-blank blocks separated by at least one empty line
pub fn paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in characters, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Rough syllable estimate from vowel groups
pub fn syllables(word: &str) -> usize {
    let word: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if word.len() <= 3 {
        return 1;
    }

    let mut count = VOWEL_GROUP.find_iter(&word).count().max(1) as i64;

    if word.ends_with('e') {
        count -= 1;
    }

    if word.ends_with("le") {
        count += 1;
    }

    count.max(1) as usize
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ratio that is 0 when the denominator is 0
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
