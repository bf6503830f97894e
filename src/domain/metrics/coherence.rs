//! Coherence: lexical diversity, sentence variety, repetition and transitions

use std::collections::{HashMap, HashSet};

use super::constants::*;
use super::text;

pub fn score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words = text::words(&lowered);

    if words.is_empty() {
        return 0.0;
    }

    diversity_score(&words) * COHERENCE_DIVERSITY_WEIGHT
        + variety_score(&text::sentences(text)) * COHERENCE_VARIETY_WEIGHT
        + repetition_score(&words) * COHERENCE_REPETITION_WEIGHT
        + transition_score(&lowered) * COHERENCE_TRANSITION_WEIGHT
}

/// Unique words longer than two characters over all words
pub(crate) fn diversity_score(words: &[&str]) -> f64 {
    let unique: HashSet<&str> = words
        .iter()
        .copied()
        .filter(|w| text::char_len(w) > 2)
        .collect();
    let diversity = text::ratio(unique.len(), words.len());
    let (low, high) = LEXICAL_DIVERSITY_BAND;

    if diversity < low {
        diversity / low * 0.6
    } else if diversity <= high {
        0.6 + (diversity - low) / (high - low) * 0.4
    } else {
        1.0
    }
}

/// Spread of sentence lengths, favoring moderate variation
pub(crate) fn variety_score(sentences: &[&str]) -> f64 {
    if sentences.len() <= 1 {
        return 0.5;
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| text::word_count(s) as f64)
        .collect();
    let spread = text::std_dev(&lengths);
    let (low, high) = SENTENCE_SPREAD_BAND;

    if spread < low {
        spread / low * 0.6
    } else if spread <= high {
        0.6 + (spread - low) / (high - low) * 0.4
    } else {
        (1.0 - (spread - high) / 10.0 * 0.3).max(0.7)
    }
}

/// Penalizes any word trigram seen more than three times
pub(crate) fn repetition_score(words: &[&str]) -> f64 {
    let mut counts: HashMap<(&str, &str, &str), usize> = HashMap::new();

    for window in words.windows(3) {
        *counts.entry((window[0], window[1], window[2])).or_default() += 1;
    }

    let max_repeat = counts.values().copied().max().unwrap_or(0);

    if max_repeat > TRIGRAM_REPEAT_LIMIT {
        (1.0 - (max_repeat - TRIGRAM_REPEAT_LIMIT) as f64 / 5.0 * 0.5).max(0.5)
    } else {
        1.0
    }
}

/// Counts distinct transition phrases present in already lowercased text
pub(crate) fn transition_score(lowered: &str) -> f64 {
    let present = TRANSITION_PHRASES
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .count();

    (present as f64 / TRANSITION_SATURATION * 0.5 + 0.5).min(1.0)
}
