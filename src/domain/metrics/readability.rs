//! Readability from a Flesch reading-ease estimate plus word and sentence complexity

use super::constants::*;
use super::text;

/// Neutral value when there is nothing to measure
const NEUTRAL: f64 = 0.5;

pub fn score(text: &str) -> f64 {
    let words = text::words(text);
    let sentences = text::sentences(text);

    if words.is_empty() || sentences.is_empty() {
        return NEUTRAL;
    }

    let total_syllables: usize = words.iter().map(|w| text::syllables(w)).sum();
    let words_per_sentence = words.len() as f64 / sentences.len() as f64;
    let syllables_per_word = total_syllables as f64 / words.len() as f64;
    let flesch = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;

    flesch_score(flesch) * READABILITY_FLESCH_WEIGHT
        + syllable_score(syllables_per_word) * READABILITY_SYLLABLE_WEIGHT
        + sentence_length_score(words_per_sentence) * READABILITY_SENTENCE_WEIGHT
        + technical_score(&words) * READABILITY_TECHNICAL_WEIGHT
}

pub(crate) fn flesch_score(flesch: f64) -> f64 {
    let (low, high) = FLESCH_FAVORABLE_BAND;

    if flesch < low {
        (flesch / low * 0.5).max(0.3)
    } else if flesch <= high {
        0.5 + (flesch - low) / (high - low) * 0.5
    } else if flesch <= FLESCH_EASY_LIMIT {
        1.0 - (flesch - high) / (FLESCH_EASY_LIMIT - high) * 0.1
    } else {
        0.9
    }
}

pub(crate) fn syllable_score(per_word: f64) -> f64 {
    let (low, high) = SYLLABLES_PER_WORD_IDEAL;

    if per_word < low {
        0.7
    } else if per_word <= high {
        1.0
    } else if per_word <= SYLLABLES_PER_WORD_MAX {
        1.0 - (per_word - high) / (SYLLABLES_PER_WORD_MAX - high) * 0.3
    } else {
        0.5
    }
}

pub(crate) fn sentence_length_score(per_sentence: f64) -> f64 {
    let (low, high) = WORDS_PER_SENTENCE_IDEAL;

    if per_sentence < low {
        0.7
    } else if per_sentence <= high {
        1.0
    } else if per_sentence <= WORDS_PER_SENTENCE_MAX {
        1.0 - (per_sentence - high) / (WORDS_PER_SENTENCE_MAX - high) * 0.3
    } else {
        0.6
    }
}

/// Penalizes a high share of very long words
pub(crate) fn technical_score(words: &[&str]) -> f64 {
    let long_words = words
        .iter()
        .filter(|w| text::char_len(w) > TECHNICAL_WORD_CHARS)
        .count();
    let density = text::ratio(long_words, words.len());

    if density > TECHNICAL_DENSITY_LIMIT {
        (1.0 - (density - TECHNICAL_DENSITY_LIMIT) / 0.1 * 0.4).max(0.6)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_measure_is_neutral() {
        assert_eq!(score(""), 0.5);
        assert_eq!(score("..."), 0.5);
    }

    #[test]
    fn test_flesch_curve() {
        assert_eq!(flesch_score(-20.0), 0.3);
        assert_eq!(flesch_score(0.0), 0.3);
        assert!((flesch_score(50.0) - 0.75).abs() < 1e-9);
        assert!((flesch_score(80.0) - 0.95).abs() < 1e-9);
        assert_eq!(flesch_score(100.0), 0.9);
    }

    #[test]
    fn test_syllable_curve() {
        assert_eq!(syllable_score(1.0), 0.7);
        assert_eq!(syllable_score(1.5), 1.0);
        assert!((syllable_score(2.1) - 0.85).abs() < 1e-9);
        assert_eq!(syllable_score(3.0), 0.5);
    }

    #[test]
    fn test_sentence_length_curve() {
        assert_eq!(sentence_length_score(5.0), 0.7);
        assert_eq!(sentence_length_score(15.0), 1.0);
        assert!((sentence_length_score(25.0) - 0.85).abs() < 1e-9);
        assert_eq!(sentence_length_score(40.0), 0.6);
    }

    #[test]
    fn test_technical_density() {
        assert_eq!(technical_score(&["plain", "words"]), 1.0);
        assert_eq!(technical_score(&["internationalization", "a"]), 0.6);
    }

    #[test]
    fn test_plain_prose_reads_well() {
        let text = "The team shipped the new build on Friday. It was a calm release with \
                    few surprises and clear notes for every user. Support saw fewer tickets \
                    than the week before.";
        let value = score(text);
        assert!(value > 0.7, "got {value}");
        assert!(value <= 1.0);
    }
}
