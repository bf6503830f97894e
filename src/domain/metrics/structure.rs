//! Structural quality: paragraphing, intro and conclusion, lists, headings, balance

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::*;
use super::text;

static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*•]\s+").expect("valid bullet regex"));

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[0-9]+\.\s+").expect("valid numbered regex"));

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+\s+").expect("valid heading regex"));

static LABEL_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[A-Z][^.!?]*:$").expect("valid label regex"));

pub fn score(text: &str) -> f64 {
    let paragraphs = text::paragraphs(text);

    paragraph_score(paragraphs.len()) * STRUCTURE_PARAGRAPH_WEIGHT
        + intro_outro_score(&paragraphs) * STRUCTURE_INTRO_OUTRO_WEIGHT
        + list_score(text) * STRUCTURE_LIST_WEIGHT
        + heading_score(text) * STRUCTURE_HEADING_WEIGHT
        + balance_score(&paragraphs) * STRUCTURE_BALANCE_WEIGHT
}

pub(crate) fn paragraph_score(count: usize) -> f64 {
    match count {
        0 => 0.3,
        1 => 0.5,
        n if n <= PARAGRAPHS_IDEAL_MAX => 0.5 + n as f64 / PARAGRAPHS_IDEAL_MAX as f64 * 0.5,
        n => (1.0 - (n - PARAGRAPHS_IDEAL_MAX) as f64 / 10.0 * 0.2).max(0.8),
    }
}

/// Half credit each for an introduction and a conclusion
pub(crate) fn intro_outro_score(paragraphs: &[&str]) -> f64 {
    let Some(first) = paragraphs.first() else {
        return 0.0;
    };

    let has_intro = text::sentences(first).len() >= INTRO_MIN_SENTENCES
        && text::char_len(first) > INTRO_MIN_CHARS;

    let has_conclusion = paragraphs.len() > 1
        && paragraphs.last().is_some_and(|last| {
            let last = last.to_lowercase();
            CONCLUSION_CUES.iter().any(|cue| last.contains(cue))
        });

    let mut value = 0.0;
    if has_intro {
        value += 0.5;
    }
    if has_conclusion {
        value += 0.5;
    }
    value
}

pub(crate) fn list_score(text: &str) -> f64 {
    if BULLET_ITEM.is_match(text) || NUMBERED_ITEM.is_match(text) {
        1.0
    } else {
        0.6
    }
}

pub(crate) fn heading_score(text: &str) -> f64 {
    if MARKDOWN_HEADING.is_match(text) || LABEL_HEADING.is_match(text) {
        1.0
    } else {
        0.7
    }
}

/// Largest deviation of a paragraph's length from the mean, relative to the mean
pub(crate) fn balance_score(paragraphs: &[&str]) -> f64 {
    if paragraphs.len() <= 1 {
        return 0.8;
    }

    let lengths: Vec<f64> = paragraphs
        .iter()
        .map(|p| text::char_len(p) as f64)
        .collect();
    let avg = text::mean(&lengths);

    if avg == 0.0 {
        return 0.8;
    }

    let max_deviation = lengths
        .iter()
        .map(|len| (len - avg).abs())
        .fold(0.0_f64, f64::max);
    let imbalance = max_deviation / avg;

    if imbalance < 0.5 {
        1.0
    } else if imbalance < 1.5 {
        1.0 - (imbalance - 0.5) * 0.3
    } else {
        0.6
    }
}
