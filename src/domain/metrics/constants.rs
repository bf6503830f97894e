//! Weights and curve breakpoints used by the quality scorers.
//!
//! Kept apart from the scoring code so they can be tuned and tested
//! on their own.

/// Weights of the six dimensions in the overall score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeights {
    pub coherence: f64,
    pub structure: f64,
    pub completeness: f64,
    pub readability: f64,
    pub length: f64,
    pub specificity: f64,
}

impl DimensionWeights {
    pub const DEFAULT: Self = Self {
        coherence: 0.25,
        structure: 0.20,
        completeness: 0.20,
        readability: 0.15,
        length: 0.10,
        specificity: 0.10,
    };

    pub fn total(&self) -> f64 {
        self.coherence
            + self.structure
            + self.completeness
            + self.readability
            + self.length
            + self.specificity
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Length
pub const LENGTH_WORD_WEIGHT: f64 = 0.5;
pub const LENGTH_SENTENCE_WEIGHT: f64 = 0.3;
pub const LENGTH_EFFICIENCY_WEIGHT: f64 = 0.2;
pub const WORDS_SHORT: f64 = 50.0;
pub const WORDS_PEAK: f64 = 300.0;
pub const WORDS_LONG: f64 = 500.0;
pub const SENTENCES_MIN: usize = 3;
pub const SENTENCES_MAX: usize = 20;
pub const WORDS_PER_TOKEN_IDEAL: (f64, f64) = (0.70, 0.85);

// Coherence
pub const COHERENCE_DIVERSITY_WEIGHT: f64 = 0.35;
pub const COHERENCE_VARIETY_WEIGHT: f64 = 0.25;
pub const COHERENCE_REPETITION_WEIGHT: f64 = 0.25;
pub const COHERENCE_TRANSITION_WEIGHT: f64 = 0.15;
pub const LEXICAL_DIVERSITY_BAND: (f64, f64) = (0.3, 0.6);
pub const SENTENCE_SPREAD_BAND: (f64, f64) = (2.0, 8.0);
pub const TRIGRAM_REPEAT_LIMIT: usize = 3;
pub const TRANSITION_SATURATION: f64 = 3.0;

pub const TRANSITION_PHRASES: &[&str] = &[
    "however",
    "therefore",
    "furthermore",
    "moreover",
    "additionally",
    "consequently",
    "nevertheless",
    "thus",
    "hence",
    "meanwhile",
    "similarly",
    "likewise",
    "conversely",
    "alternatively",
    "specifically",
    "for example",
    "for instance",
    "in contrast",
    "on the other hand",
    "as a result",
    "in addition",
    "in conclusion",
    "to summarize",
];

// Structure
pub const STRUCTURE_PARAGRAPH_WEIGHT: f64 = 0.30;
pub const STRUCTURE_INTRO_OUTRO_WEIGHT: f64 = 0.25;
pub const STRUCTURE_LIST_WEIGHT: f64 = 0.15;
pub const STRUCTURE_HEADING_WEIGHT: f64 = 0.15;
pub const STRUCTURE_BALANCE_WEIGHT: f64 = 0.15;
pub const PARAGRAPHS_IDEAL_MAX: usize = 5;
pub const INTRO_MIN_SENTENCES: usize = 2;
pub const INTRO_MIN_CHARS: usize = 50;

pub const CONCLUSION_CUES: &[&str] = &[
    "conclusion",
    "summary",
    "in summary",
    "to summarize",
    "overall",
    "in short",
    "finally",
];

// Readability
pub const READABILITY_FLESCH_WEIGHT: f64 = 0.40;
pub const READABILITY_SYLLABLE_WEIGHT: f64 = 0.25;
pub const READABILITY_SENTENCE_WEIGHT: f64 = 0.20;
pub const READABILITY_TECHNICAL_WEIGHT: f64 = 0.15;
pub const FLESCH_FAVORABLE_BAND: (f64, f64) = (30.0, 70.0);
pub const FLESCH_EASY_LIMIT: f64 = 90.0;
pub const SYLLABLES_PER_WORD_IDEAL: (f64, f64) = (1.3, 1.7);
pub const SYLLABLES_PER_WORD_MAX: f64 = 2.5;
pub const WORDS_PER_SENTENCE_IDEAL: (f64, f64) = (10.0, 20.0);
pub const WORDS_PER_SENTENCE_MAX: f64 = 30.0;
pub const TECHNICAL_WORD_CHARS: usize = 12;
pub const TECHNICAL_DENSITY_LIMIT: f64 = 0.15;

// Completeness
pub const COMPLETENESS_ENDING_WEIGHT: f64 = 0.35;
pub const COMPLETENESS_THRESHOLD_WEIGHT: f64 = 0.25;
pub const COMPLETENESS_DENSITY_WEIGHT: f64 = 0.25;
pub const COMPLETENESS_PROGRESSION_WEIGHT: f64 = 0.15;
pub const MIN_COMPLETE_WORDS: (f64, f64) = (30.0, 50.0);
pub const SHORT_SENTENCE_WORDS: usize = 4;
pub const SHORT_SENTENCE_RATIO_LIMIT: f64 = 0.3;
pub const CUTOFF_PENALTY: f64 = 0.7;

pub const CUTOFF_CUES: &[&str] = &[
    "...", "and so", "and then", "and the", "which", "that", "when", "where",
];

// Specificity
pub const SPECIFICITY_NUMBER_WEIGHT: f64 = 0.25;
pub const SPECIFICITY_PROPER_NOUN_WEIGHT: f64 = 0.25;
pub const SPECIFICITY_EXAMPLE_WEIGHT: f64 = 0.30;
pub const SPECIFICITY_CONCRETE_WEIGHT: f64 = 0.20;
pub const PROPER_NOUN_DENSITY_TARGET: f64 = 0.05;
pub const CONCRETE_DENSITY_TARGET: f64 = 0.15;

pub const EXAMPLE_CUES: &[&str] = &[
    "for example",
    "for instance",
    "such as",
    "like",
    "including",
    "e.g.",
    "i.e.",
    "specifically",
    "particularly",
    "namely",
];

pub const ACTION_VERB_PREFIXES: &[&str] = &[
    "make", "build", "create", "write", "design", "develop", "implement", "test",
];
