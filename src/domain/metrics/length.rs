//! Length appropriateness: word count, sentence count and token efficiency

use super::constants::*;
use super::text;

pub fn score(text: &str, tokens_used: u32) -> f64 {
    // blank text still counts as one word
    let words = text::word_count(text).max(1);
    let sentences = text::sentences(text).len();
    let words_per_token = text::ratio(words, tokens_used as usize);

    word_count_score(words) * LENGTH_WORD_WEIGHT
        + sentence_count_score(sentences) * LENGTH_SENTENCE_WEIGHT
        + efficiency_score(words_per_token) * LENGTH_EFFICIENCY_WEIGHT
}

/// Rises to 1.0 at 300 words, then decays slowly
pub(crate) fn word_count_score(words: usize) -> f64 {
    let wc = words as f64;

    if wc < WORDS_SHORT {
        wc / WORDS_SHORT * 0.5
    } else if wc <= WORDS_PEAK {
        0.5 + (wc - WORDS_SHORT) / (WORDS_PEAK - WORDS_SHORT) * 0.5
    } else if wc <= WORDS_LONG {
        1.0 - (wc - WORDS_PEAK) / (WORDS_LONG - WORDS_PEAK) * 0.2
    } else {
        (0.8 - (wc - WORDS_LONG) / WORDS_LONG * 0.2).max(0.6)
    }
}

pub(crate) fn sentence_count_score(sentences: usize) -> f64 {
    match sentences {
        0 => 0.3,
        n if n < SENTENCES_MIN => 0.6,
        n if n <= SENTENCES_MAX => 1.0,
        n => (1.0 - (n - SENTENCES_MAX) as f64 / 30.0 * 0.3).max(0.7),
    }
}

pub(crate) fn efficiency_score(words_per_token: f64) -> f64 {
    let (low, high) = WORDS_PER_TOKEN_IDEAL;

    if (low..=high).contains(&words_per_token) {
        1.0
    } else if words_per_token < low {
        (words_per_token / low).max(0.5)
    } else {
        (1.0 - (words_per_token - high) / 0.3).max(0.6)
    }
}
