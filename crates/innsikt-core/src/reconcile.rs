//! Signal reconciliation: reinforce the best-matching insight or mint a
//! new one
//!
//! Candidates are restricted to the signal's (subject, theme) partition.
//! The best candidate wins only with a combined similarity of at least
//! [`SIMILARITY_THRESHOLD`]; ties on the maximum keep the earliest insight.

use tracing::debug;

use crate::extract::{self, Features, Patterns};
use crate::lexicon::Lexicon;
use crate::models::{
    generate_id, Chamber, Dimension, Insight, InsightKind, MetaLanguage, Modality, Semantics,
    Semiotic, Signal, Strength, Valence,
};
use crate::similarity::combined_similarity;
use crate::text::title_from_text;

/// Minimum combined similarity for reinforcement instead of creation
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Outcome of reconciling one signal into the chamber
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// No candidate reached the threshold; a new insight was created
    Created { insight_id: String },
    /// An existing insight absorbed the signal
    Reinforced { insight_id: String, similarity: f64 },
}

impl Reconciliation {
    pub fn insight_id(&self) -> &str {
        match self {
            Reconciliation::Created { insight_id } => insight_id,
            Reconciliation::Reinforced { insight_id, .. } => insight_id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Reconciliation::Created { .. })
    }
}

/// All insights belonging to one (subject, theme) partition
pub fn insights_for_topic<'a>(
    chamber: &'a Chamber,
    subject_id: &str,
    theme_id: &str,
) -> Vec<&'a Insight> {
    chamber
        .insights
        .iter()
        .filter(|ins| ins.subject_id == subject_id && ins.theme_id == theme_id)
        .collect()
}

pub(crate) fn reconcile(
    chamber: &mut Chamber,
    signal: &Signal,
    lexicon: &Lexicon,
    patterns: &Patterns,
) -> Reconciliation {
    let features = extract::extract(&signal.text, lexicon, patterns);

    let mut best: Option<usize> = None;
    let mut best_sim = 0.0_f64;
    for (idx, ins) in chamber.insights.iter().enumerate() {
        if ins.subject_id != signal.subject_id || ins.theme_id != signal.theme_id {
            continue;
        }
        let sim = combined_similarity(
            &signal.text,
            &features.semantic,
            &features.dimensions,
            &ins.summary,
            &ins.semantic,
            &ins.dimensions,
        );
        if sim > best_sim {
            best_sim = sim;
            best = Some(idx);
        }
    }

    match best {
        Some(idx) if best_sim >= SIMILARITY_THRESHOLD => {
            let insight = &mut chamber.insights[idx];
            reinforce(insight, signal, &features);
            debug!(
                insight_id = %insight.id,
                similarity = best_sim,
                "signal reinforced existing insight"
            );
            Reconciliation::Reinforced {
                insight_id: insight.id.clone(),
                similarity: best_sim,
            }
        }
        _ => {
            let insight = create_insight(signal, features);
            let insight_id = insight.id.clone();
            debug!(insight_id = %insight_id, "signal created new insight");
            chamber.insights.push(insight);
            Reconciliation::Created { insight_id }
        }
    }
}

fn reinforce(insight: &mut Insight, signal: &Signal, features: &Features) {
    insight.strength.evidence_count += 1;
    insight.last_updated = signal.timestamp;

    insight.concepts = crate::extract::concepts::merge_concepts(&insight.concepts, &features.concepts);
    insight.semiotic = Semiotic::merge(&insight.semiotic, &features.semiotic);

    // Depth is the floor; evidence builds on top of it.
    insight.strength.total_score =
        (insight.strength.evidence_count * 10 + insight.depth_score).min(100);
}

fn create_insight(signal: &Signal, features: Features) -> Insight {
    let depth_score = depth_heuristic(&features.semantic, &features.dimensions, &features.semiotic);
    let insight_type = classify_insight(&features.semantic, &features.dimensions);

    Insight {
        id: generate_id("ins", &signal.text, signal.timestamp),
        subject_id: signal.subject_id.clone(),
        theme_id: signal.theme_id.clone(),
        place_id: signal.place_id.clone(),
        person_id: signal.person_id.clone(),
        field_id: signal.field_id.clone(),
        emner: signal.emner.clone(),
        title: title_from_text(&signal.text),
        summary: signal.text.clone(),
        strength: Strength {
            evidence_count: 1,
            total_score: (10 + depth_score).min(100),
        },
        depth_score,
        insight_type,
        first_seen: signal.timestamp,
        last_updated: signal.timestamp,
        semantic: features.semantic,
        dimensions: features.dimensions,
        narrative: features.narrative,
        concepts: features.concepts,
        semiotic: features.semiotic,
        coherence: features.coherence,
        terminology: features.terminology,
        logical: features.logical,
        meta_concepts: features.meta_concepts,
    }
}

/// Heuristic depth score for a freshly minted insight
fn depth_heuristic(semantic: &Semantics, dimensions: &[Dimension], semiotic: &Semiotic) -> u32 {
    let mut score = 0;

    if semantic.meta == MetaLanguage::Reflective {
        score += 3;
    }

    // Mixed valence reads as complexity
    if semantic.valence == Valence::Mixed {
        score += 2;
    }

    match dimensions.len() {
        n if n >= 3 => score += 2,
        2 => score += 1,
        _ => {}
    }

    // Bodily experience paired with negative valence
    if dimensions.contains(&Dimension::Body) && semantic.valence == Valence::Negative {
        score += 2;
    }

    if semiotic.emojis.len() >= 3 {
        score += 1;
    }
    if semiotic.markers.exclamation {
        score += 1;
    }

    score
}

fn classify_insight(semantic: &Semantics, dimensions: &[Dimension]) -> InsightKind {
    let is_press = semantic.modality == Modality::Demand && semantic.valence == Valence::Negative;
    let is_opportunity =
        semantic.modality == Modality::Opportunity && semantic.valence == Valence::Positive;
    let has_meta = semantic.meta == MetaLanguage::Reflective;

    if is_press {
        InsightKind::Press
    } else if is_opportunity && dimensions.len() >= 2 {
        InsightKind::Discovery
    } else if has_meta && semantic.valence == Valence::Mixed && dimensions.len() >= 2 {
        InsightKind::Integration
    } else {
        InsightKind::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn setup() -> (Lexicon, Patterns) {
        (Lexicon::builtin().unwrap(), Patterns::new().unwrap())
    }

    fn signal_at(text: &str, secs: i64) -> Signal {
        let ts = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        Signal::from_message_at(text, "subj", "theme", ts)
    }

    #[test]
    fn test_first_signal_creates_insight() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();

        let outcome = reconcile(
            &mut chamber,
            &signal_at("jeg er sliten hver dag og klarer ikke å starte", 0),
            &lexicon,
            &patterns,
        );
        assert!(outcome.is_created());
        assert_eq!(chamber.len(), 1);

        let ins = &chamber.insights[0];
        assert_eq!(ins.strength.evidence_count, 1);
        assert_eq!(ins.summary, "jeg er sliten hver dag og klarer ikke å starte");
        assert_eq!(ins.semantic.modality, Modality::Obstruction);
    }

    #[test]
    fn test_near_duplicate_reinforces_instead_of_duplicating() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();

        reconcile(
            &mut chamber,
            &signal_at("jeg er sliten hver dag og klarer ikke å starte", 0),
            &lexicon,
            &patterns,
        );
        let outcome = reconcile(
            &mut chamber,
            &signal_at("jeg er sliten hver dag og klarer ikke å begynne", 60),
            &lexicon,
            &patterns,
        );

        assert!(!outcome.is_created());
        assert_eq!(chamber.len(), 1);
        assert_eq!(chamber.insights[0].strength.evidence_count, 2);
    }

    #[test]
    fn test_different_topics_never_merge() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();
        let text = "jeg er sliten hver dag og klarer ikke å starte";

        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        reconcile(
            &mut chamber,
            &Signal::from_message_at(text, "subj", "theme-a", ts),
            &lexicon,
            &patterns,
        );
        reconcile(
            &mut chamber,
            &Signal::from_message_at(text, "subj", "theme-b", ts),
            &lexicon,
            &patterns,
        );

        assert_eq!(chamber.len(), 2);
    }

    #[test]
    fn test_reinforcement_score_formula() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();

        reconcile(
            &mut chamber,
            &signal_at("jeg er sliten hver dag og klarer ikke å starte", 0),
            &lexicon,
            &patterns,
        );
        reconcile(
            &mut chamber,
            &signal_at("jeg er sliten hver dag og klarer ikke å starte", 60),
            &lexicon,
            &patterns,
        );

        let ins = &chamber.insights[0];
        assert_eq!(
            ins.strength.total_score,
            (ins.strength.evidence_count * 10 + ins.depth_score).min(100)
        );
    }

    #[test]
    fn test_reinforcement_updates_last_updated_not_first_seen() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();

        let first = signal_at("jeg er sliten hver dag og klarer ikke å starte", 0);
        let second = signal_at("jeg er sliten hver dag og klarer ikke å begynne", 3600);
        reconcile(&mut chamber, &first, &lexicon, &patterns);
        reconcile(&mut chamber, &second, &lexicon, &patterns);

        let ins = &chamber.insights[0];
        assert_eq!(ins.first_seen, first.timestamp);
        assert_eq!(ins.last_updated, second.timestamp);
    }

    #[test]
    fn test_context_axes_propagate_to_new_insight() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();

        let signal = signal_at("jeg er sliten hver dag", 0).with_context(
            crate::models::SignalContext {
                place_id: Some("oslo".to_string()),
                person_id: None,
                field_id: Some("helse".to_string()),
                emner: vec!["søvn".to_string()],
            },
        );
        reconcile(&mut chamber, &signal, &lexicon, &patterns);

        let ins = &chamber.insights[0];
        assert_eq!(ins.place_id.as_deref(), Some("oslo"));
        assert_eq!(ins.field_id.as_deref(), Some("helse"));
        assert_eq!(ins.emner, vec!["søvn".to_string()]);
    }

    #[test]
    fn test_depth_heuristic_components() {
        let mut sem = Semantics::default();
        sem.meta = MetaLanguage::Reflective;
        sem.valence = Valence::Mixed;
        let dims = [Dimension::Emotion, Dimension::Thought, Dimension::Body];
        let semiotic = Semiotic::default();

        // 3 (reflective) + 2 (mixed) + 2 (three dimensions)
        assert_eq!(depth_heuristic(&sem, &dims, &semiotic), 7);
    }

    #[test]
    fn test_depth_body_negative_bonus() {
        let mut sem = Semantics::default();
        sem.valence = Valence::Negative;
        let dims = [Dimension::Body];
        let semiotic = Semiotic::default();

        assert_eq!(depth_heuristic(&sem, &dims, &semiotic), 2);
    }

    #[test]
    fn test_classify_press() {
        let mut sem = Semantics::default();
        sem.modality = Modality::Demand;
        sem.valence = Valence::Negative;
        assert_eq!(classify_insight(&sem, &[Dimension::Thought]), InsightKind::Press);
    }

    #[test]
    fn test_classify_discovery_needs_two_dimensions() {
        let mut sem = Semantics::default();
        sem.modality = Modality::Opportunity;
        sem.valence = Valence::Positive;

        assert_eq!(
            classify_insight(&sem, &[Dimension::Thought]),
            InsightKind::Unclassified
        );
        assert_eq!(
            classify_insight(&sem, &[Dimension::Thought, Dimension::Emotion]),
            InsightKind::Discovery
        );
    }

    #[test]
    fn test_classify_integration() {
        let mut sem = Semantics::default();
        sem.meta = MetaLanguage::Reflective;
        sem.valence = Valence::Mixed;
        assert_eq!(
            classify_insight(&sem, &[Dimension::Thought, Dimension::Emotion]),
            InsightKind::Integration
        );
    }

    #[test]
    fn test_insights_for_topic_filters_partition() {
        let (lexicon, patterns) = setup();
        let mut chamber = Chamber::new();
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        reconcile(
            &mut chamber,
            &Signal::from_message_at("jeg er sliten hver dag", "a", "t1", ts),
            &lexicon,
            &patterns,
        );
        reconcile(
            &mut chamber,
            &Signal::from_message_at("jeg gruer meg til møtene", "b", "t1", ts),
            &lexicon,
            &patterns,
        );

        assert_eq!(insights_for_topic(&chamber, "a", "t1").len(), 1);
        assert_eq!(insights_for_topic(&chamber, "b", "t1").len(), 1);
        assert!(insights_for_topic(&chamber, "a", "t2").is_empty());
    }
}
