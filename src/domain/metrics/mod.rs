//! Heuristic quality metrics for generated text.
//!
//! Every dimension is a pure function of the text (and, for length, the
//! token count) and lands in `[0, 1]`. The overall score is a weighted
//! sum of the six dimensions, computed from the unrounded values.

mod coherence;
mod completeness;
pub mod constants;
mod length;
mod readability;
mod specificity;
mod structure;
mod text;

pub use constants::DimensionWeights;

use serde::{Deserialize, Serialize};

/// Scores for a single response, each rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub coherence: f64,
    pub completeness: f64,
    pub readability: f64,
    pub length: f64,
    pub structure: f64,
    pub specificity: f64,
    pub overall: f64,
}

/// Stateless scorer applying a fixed set of dimension weights
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer {
    weights: DimensionWeights,
}

impl QualityScorer {
    pub fn new(weights: DimensionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &DimensionWeights {
        &self.weights
    }

    /// Scores `text` generated with `tokens_used` tokens
    pub fn score(&self, text: &str, tokens_used: u32) -> QualityMetrics {
        let coherence = coherence::score(text);
        let completeness = completeness::score(text);
        let readability = readability::score(text);
        let length = length::score(text, tokens_used);
        let structure = structure::score(text);
        let specificity = specificity::score(text);

        let w = &self.weights;
        let overall = coherence * w.coherence
            + structure * w.structure
            + completeness * w.completeness
            + readability * w.readability
            + length * w.length
            + specificity * w.specificity;

        QualityMetrics {
            coherence: round2(coherence),
            completeness: round2(completeness),
            readability: round2(readability),
            length: round2(length),
            structure: round2(structure),
            specificity: round2(specificity),
            overall: round2(overall),
        }
    }
}

/// Scores with the default weights
pub fn score(text: &str, tokens_used: u32) -> QualityMetrics {
    QualityScorer::default().score(text, tokens_used)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 250 words in four paragraphs with one bullet list and two transition words
    const WELL_FORMED: &str = "Choosing a database for a growing product is rarely a simple decision. Teams must weigh \
consistency, operational cost, hiring, and the skills already present on staff before \
committing to any engine. A wrong early choice rarely kills a product, yet it quietly taxes \
every feature the team ships for years afterward.

Relational engines remain the safest default for most workloads. They offer mature tooling, \
strong transactional guarantees, and a query language that nearly every engineer already \
understands. Backups, replication and point-in-time recovery are well documented, and \
managed offerings remove much of the operational burden. However, rigid schemas can slow \
down early experimentation when requirements shift every week.

Document stores trade some of those guarantees for flexibility. The main trade-offs look \
like this:
- faster iteration on evolving data shapes
- simpler horizontal scaling across many nodes
- weaker support for complex joins and reporting
- looser validation unless the application enforces it
Therefore, teams with heavy analytics needs often pair a document store with a separate \
warehouse. That split keeps the primary store lean while reporting queries run elsewhere \
without contention.

In summary, start with a relational database unless a specific access pattern clearly \
demands something else. Measure real traffic before migrating, because observed behavior \
beats early speculation about future scale and load. Keep schemas versioned, keep queries \
visible in code review, and keep an eye on slow query logs. Good monitoring makes every \
later conversation about storage much easier, since the discussion can rest on numbers \
rather than opinions.";

    #[test]
    fn test_short_answer() {
        let metrics = score("Short.", 5);

        assert!(metrics.length < 0.3);
        assert!(metrics.completeness >= 0.5 && metrics.completeness <= 0.7);
        assert!(metrics.overall < 0.7);
    }

    #[test]
    fn test_well_formed_response() {
        assert_eq!(text::word_count(WELL_FORMED), 250);
        assert_eq!(text::paragraphs(WELL_FORMED).len(), 4);

        let metrics = score(WELL_FORMED, 320);

        assert!(metrics.structure >= 0.8, "{metrics:?}");
        assert!(metrics.coherence >= 0.6, "{metrics:?}");
        assert!(metrics.completeness >= 0.8, "{metrics:?}");
        assert!(metrics.overall > score("Short.", 5).overall);
    }

    #[test]
    fn test_scores_are_idempotent() {
        assert_eq!(score(WELL_FORMED, 320), score(WELL_FORMED, 320));
    }

    #[test]
    fn test_all_scores_in_unit_range_and_rounded() {
        let repetitive = "word ".repeat(800);
        let samples = ["", "   ", "...", "Short.", repetitive.as_str(), WELL_FORMED];

        for text in samples {
            let m = score(text, 50);
            for value in [
                m.coherence,
                m.completeness,
                m.readability,
                m.length,
                m.structure,
                m.specificity,
                m.overall,
            ] {
                assert!((0.0..=1.0).contains(&value), "{value} for {text:?}");
                assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_overall_matches_weighted_sum() {
        let m = score(WELL_FORMED, 320);
        let w = DimensionWeights::DEFAULT;
        let recomputed = m.coherence * w.coherence
            + m.structure * w.structure
            + m.completeness * w.completeness
            + m.readability * w.readability
            + m.length * w.length
            + m.specificity * w.specificity;

        // rounding of the parts can shift the sum by at most half a cent
        assert!((m.overall - recomputed).abs() <= 0.01);
    }

    #[test]
    fn test_empty_text_has_defined_low_scores() {
        let m = score("", 0);

        assert_eq!(m.coherence, 0.0);
        assert_eq!(m.specificity, 0.0);
        assert_eq!(m.readability, 0.5);
        assert_eq!(m.length, 0.2);
        assert_eq!(score("   ", 0).length, 0.2);
        assert!(m.overall < 0.3);
    }

    #[test]
    fn test_custom_weights() {
        let only_length = DimensionWeights {
            coherence: 0.0,
            structure: 0.0,
            completeness: 0.0,
            readability: 0.0,
            length: 1.0,
            specificity: 0.0,
        };
        let m = QualityScorer::new(only_length).score("Short.", 5);
        assert_eq!(m.overall, m.length);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(score("Short.", 5)).unwrap();
        assert!(json.get("overall").is_some());
        assert!(json.get("specificity").is_some());
    }
}
