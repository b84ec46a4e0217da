//! Signal/insight similarity scoring
//!
//! The combined score weighs surface text overlap (60%) against semantic
//! tag agreement (40%). Semantic agreement only counts axes that carry
//! information on both sides: unknown frequency, neutral modality, and
//! mixed time reference are skipped rather than counted as disagreement.

use std::collections::HashSet;

use crate::models::{Dimension, Frequency, Modality, Semantics, TimeRef};
use crate::text::text_similarity;

/// Weight of the surface text term in the combined score
const TEXT_WEIGHT: f64 = 0.6;
/// Weight of the semantic tag term in the combined score
const SEMANTIC_WEIGHT: f64 = 0.4;

/// Agreement score over the semantic axes, in [0, 1]
///
/// Each contributing axis adds 1 to the weight and its match adds to the
/// score; the dimension axis contributes its set Jaccard instead of a
/// binary hit. Returns 0 when no axis contributes.
pub fn semantic_similarity(
    a: &Semantics,
    a_dims: &[Dimension],
    b: &Semantics,
    b_dims: &[Dimension],
) -> f64 {
    let mut score = 0.0;
    let mut weight = 0.0;

    if a.frequency != Frequency::Unknown && b.frequency != Frequency::Unknown {
        weight += 1.0;
        if a.frequency == b.frequency {
            score += 1.0;
        }
    }

    weight += 1.0;
    if a.valence == b.valence {
        score += 1.0;
    }

    if a.modality != Modality::Neutral && b.modality != Modality::Neutral {
        weight += 1.0;
        if a.modality == b.modality {
            score += 1.0;
        }
    }

    if a.time_ref != TimeRef::Mixed && b.time_ref != TimeRef::Mixed {
        weight += 1.0;
        if a.time_ref == b.time_ref {
            score += 1.0;
        }
    }

    weight += 1.0;
    score += dimension_jaccard(a_dims, b_dims);

    if weight > 0.0 {
        score / weight
    } else {
        0.0
    }
}

fn dimension_jaccard(a: &[Dimension], b: &[Dimension]) -> f64 {
    let set_a: HashSet<Dimension> = a.iter().copied().collect();
    let set_b: HashSet<Dimension> = b.iter().copied().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Combined similarity between two tagged utterances, in [0, 1]
pub(crate) fn combined_similarity(
    text_a: &str,
    a: &Semantics,
    a_dims: &[Dimension],
    text_b: &str,
    b: &Semantics,
    b_dims: &[Dimension],
) -> f64 {
    let text_score = text_similarity(text_a, text_b);
    let semantic_score = semantic_similarity(a, a_dims, b, b_dims);
    (TEXT_WEIGHT * text_score + SEMANTIC_WEIGHT * semantic_score).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Valence;

    #[test]
    fn test_identical_semantics_scores_one() {
        let sem = Semantics::default();
        let dims = vec![Dimension::Thought];
        assert_eq!(semantic_similarity(&sem, &dims, &sem, &dims), 1.0);
    }

    #[test]
    fn test_unknown_frequency_axis_is_skipped() {
        let mut a = Semantics::default();
        let mut b = Semantics::default();
        a.frequency = Frequency::Always;
        b.frequency = Frequency::Unknown;
        let dims = vec![Dimension::Thought];

        // valence + time + dimensions all agree; frequency and modality skip
        assert_eq!(semantic_similarity(&a, &dims, &b, &dims), 1.0);
    }

    #[test]
    fn test_valence_disagreement_lowers_score() {
        let a = Semantics::default();
        let mut b = Semantics::default();
        b.valence = Valence::Negative;
        let dims = vec![Dimension::Thought];

        let score = semantic_similarity(&a, &dims, &b, &dims);
        assert!(score < 1.0);
        assert!(score > 0.0);
    }

    #[test]
    fn test_dimension_jaccard_partial_overlap() {
        let a = [Dimension::Emotion, Dimension::Body];
        let b = [Dimension::Body, Dimension::Thought];
        assert!((dimension_jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_combined_identical_utterances() {
        let sem = Semantics::default();
        let dims = vec![Dimension::Body];
        let text = "jeg er sliten hver dag";
        let score = combined_similarity(text, &sem, &dims, text, &sem, &dims);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_combined_disjoint_texts_stay_low() {
        let sem_a = Semantics::default();
        let mut sem_b = Semantics::default();
        sem_b.valence = Valence::Negative;
        sem_b.time_ref = TimeRef::Past;

        let score = combined_similarity(
            "katten sover ute",
            &sem_a,
            &[Dimension::Thought],
            "jobben stresser meg",
            &sem_b,
            &[Dimension::Body],
        );
        assert!(score < 0.5);
    }

    #[test]
    fn test_combined_score_within_unit_interval() {
        let sem = Semantics::default();
        let score = combined_similarity(
            "",
            &sem,
            &[Dimension::Thought],
            "",
            &sem,
            &[Dimension::Thought],
        );
        assert!((0.0..=1.0).contains(&score));
    }
}
