//! Cross-topic meta profile for one subject
//!
//! Reads the chamber through the per-topic aggregators and builds a global
//! picture: averaged saturation, pressure and negativity indices, phase
//! histogram, cross-topic patterns, insight lifecycle states, a global
//! concept index, and a semiotic profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::{Chamber, Insight, Intensity, Valence};
use crate::reconcile::insights_for_topic;
use crate::stats::{
    semantic_counts, topic_stats, ModalityCounts, Phase, SemanticCounts, TopicStats, ValenceCounts,
};

/// Lifecycle state of one insight, derived from evidence and age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    New,
    Growing,
    Mature,
    Integrated,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::New => "new",
            Lifecycle::Growing => "growing",
            Lifecycle::Mature => "mature",
            Lifecycle::Integrated => "integrated",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An insight annotated with its lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleInsight {
    #[serde(flatten)]
    pub insight: Insight,
    pub lifecycle: Lifecycle,
}

/// One topic seen from the meta level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicProfile {
    pub theme_id: String,
    pub stats: TopicStats,
    pub semantic_counts: SemanticCounts,
}

/// Phase histogram over a subject's topics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounts {
    pub exploration: u32,
    pub pattern: u32,
    pub press: u32,
    pub stuck: u32,
    pub integration: u32,
}

/// Global semantic profile rolled up from the topic profiles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalProfile {
    pub avg_saturation: f64,
    pub modality: ModalityCounts,
    pub valence: ValenceCounts,
    pub phases: PhaseCounts,
    /// (demand + obstruction) / max(1, opportunity + neutral)
    pub pressure_index: f64,
    /// negative / max(1, positive + mixed + neutral)
    pub negativity_index: f64,
    pub stuck_topics: u32,
    pub integration_topics: u32,
}

/// Identifier of a detected cross-topic pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternId {
    CrossPressure,
    CrossExploration,
    StuckCluster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    GlobalPattern,
    Cluster,
}

/// A pattern spanning at least two of the subject's themes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTopicPattern {
    pub id: PatternId,
    pub kind: PatternKind,
    pub description: String,
    pub themes: Vec<String>,
}

/// One entry in the global or per-theme concept index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptIndexEntry {
    pub key: String,
    pub total_count: u32,
    pub theme_count: usize,
    pub themes: Vec<String>,
    /// Up to 5 surface examples
    pub examples: Vec<String>,
}

/// Semiotic usage rolled up over a subject's insights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemioticProfile {
    pub total_insights: u32,
    pub body_count: u32,
    pub space_count: u32,
    pub tech_count: u32,
    pub heart_markers: u32,
    pub star_markers: u32,
    pub arrow_markers: u32,
    pub exclamation_markers: u32,
    pub emoji_count: u32,
    pub body_ratio: f64,
    pub space_ratio: f64,
    pub tech_ratio: f64,
    pub emoji_per_insight: f64,
}

/// The full meta picture for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaProfile {
    pub subject_id: String,
    pub topics: Vec<TopicProfile>,
    pub global: GlobalProfile,
    pub semiotic: SemioticProfile,
    pub patterns: Vec<CrossTopicPattern>,
    pub insights: Vec<LifecycleInsight>,
    pub concepts: Vec<ConceptIndexEntry>,
}

/// Lifecycle state of one insight at a given reference time
pub fn insight_lifecycle(insight: &Insight, now: DateTime<Utc>) -> Lifecycle {
    let age_days = (now - insight.first_seen).num_seconds() as f64 / 86_400.0;
    let recency_days = (now - insight.last_updated).num_seconds() as f64 / 86_400.0;
    let evidence = insight.strength.evidence_count;

    let mut status = Lifecycle::New;
    if evidence >= 2 && age_days > 1.0 {
        status = Lifecycle::Growing;
    }
    if evidence >= 4 && age_days > 7.0 {
        status = Lifecycle::Mature;
    }
    if status == Lifecycle::Mature && recency_days > 14.0 {
        status = Lifecycle::Integrated;
    }
    status
}

fn global_profile(topics: &[TopicProfile]) -> GlobalProfile {
    if topics.is_empty() {
        return GlobalProfile::default();
    }

    let mut profile = GlobalProfile::default();
    let mut saturation_sum = 0u32;

    for topic in topics {
        saturation_sum += topic.stats.insight_saturation;

        let m = &topic.semantic_counts.modality;
        profile.modality.demand += m.demand;
        profile.modality.opportunity += m.opportunity;
        profile.modality.obstruction += m.obstruction;
        profile.modality.neutral += m.neutral;

        let v = &topic.semantic_counts.valence;
        profile.valence.negative += v.negative;
        profile.valence.positive += v.positive;
        profile.valence.mixed += v.mixed;
        profile.valence.neutral += v.neutral;

        match topic.stats.user_phase {
            Phase::Exploration => profile.phases.exploration += 1,
            Phase::Pattern => profile.phases.pattern += 1,
            Phase::Press => profile.phases.press += 1,
            Phase::Stuck => profile.phases.stuck += 1,
            Phase::Integration => profile.phases.integration += 1,
        }
    }

    profile.avg_saturation = saturation_sum as f64 / topics.len() as f64;
    profile.pressure_index = (profile.modality.demand + profile.modality.obstruction) as f64
        / (profile.modality.opportunity + profile.modality.neutral).max(1) as f64;
    profile.negativity_index = profile.valence.negative as f64
        / (profile.valence.positive + profile.valence.mixed + profile.valence.neutral).max(1)
            as f64;
    profile.stuck_topics = profile.phases.stuck;
    profile.integration_topics = profile.phases.integration;

    profile
}

fn detect_patterns(topics: &[TopicProfile], global: &GlobalProfile) -> Vec<CrossTopicPattern> {
    let mut patterns = Vec::new();

    if global.pressure_index > 1.2 {
        let press_themes: Vec<String> = topics
            .iter()
            .filter(|t| matches!(t.stats.user_phase, Phase::Press | Phase::Stuck))
            .map(|t| t.theme_id.clone())
            .collect();
        if press_themes.len() >= 2 {
            patterns.push(CrossTopicPattern {
                id: PatternId::CrossPressure,
                kind: PatternKind::GlobalPattern,
                description: "Sterkt press-/må-/burde-/hindringsmønster i flere tema.".to_string(),
                themes: press_themes,
            });
        }
    }

    if global.pressure_index < 0.8 && global.negativity_index < 0.7 {
        let exploratory_themes: Vec<String> = topics
            .iter()
            .filter(|t| matches!(t.stats.user_phase, Phase::Exploration | Phase::Integration))
            .map(|t| t.theme_id.clone())
            .collect();
        if exploratory_themes.len() >= 2 {
            patterns.push(CrossTopicPattern {
                id: PatternId::CrossExploration,
                kind: PatternKind::GlobalPattern,
                description: "Utforskende/åpent mønster på tvers av flere tema.".to_string(),
                themes: exploratory_themes,
            });
        }
    }

    let stuck_themes: Vec<String> = topics
        .iter()
        .filter(|t| t.stats.user_phase == Phase::Stuck)
        .map(|t| t.theme_id.clone())
        .collect();
    if stuck_themes.len() >= 2 {
        patterns.push(CrossTopicPattern {
            id: PatternId::StuckCluster,
            kind: PatternKind::Cluster,
            description: "Flere tema er i fastlåst fase samtidig.".to_string(),
            themes: stuck_themes,
        });
    }

    patterns
}

fn concept_index<'a, I>(insights: I) -> Vec<ConceptIndexEntry>
where
    I: IntoIterator<Item = &'a Insight>,
{
    let mut index: Vec<ConceptIndexEntry> = Vec::new();

    for ins in insights {
        for concept in &ins.concepts {
            let idx = match index.iter().position(|e| e.key == concept.key) {
                Some(idx) => idx,
                None => {
                    index.push(ConceptIndexEntry {
                        key: concept.key.clone(),
                        total_count: 0,
                        theme_count: 0,
                        themes: Vec::new(),
                        examples: Vec::new(),
                    });
                    index.len() - 1
                }
            };
            let entry = &mut index[idx];

            entry.total_count += concept.count.max(1);
            if !entry.themes.contains(&ins.theme_id) {
                entry.themes.push(ins.theme_id.clone());
            }
            for example in &concept.examples {
                if entry.examples.len() < 5 && !entry.examples.contains(example) {
                    entry.examples.push(example.clone());
                }
            }
        }
    }

    for entry in &mut index {
        entry.theme_count = entry.themes.len();
    }
    index.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    index
}

fn semiotic_profile(insights: &[&Insight]) -> SemioticProfile {
    let mut profile = SemioticProfile::default();

    for ins in insights {
        profile.total_insights += 1;
        let sem = &ins.semiotic;

        if sem.domains.body {
            profile.body_count += 1;
        }
        if sem.domains.space {
            profile.space_count += 1;
        }
        if sem.domains.tech {
            profile.tech_count += 1;
        }
        if sem.markers.heart {
            profile.heart_markers += 1;
        }
        if sem.markers.stars {
            profile.star_markers += 1;
        }
        if sem.markers.arrow {
            profile.arrow_markers += 1;
        }
        if sem.markers.exclamation {
            profile.exclamation_markers += 1;
        }
        profile.emoji_count += sem.emojis.len() as u32;
    }

    if profile.total_insights > 0 {
        let n = profile.total_insights as f64;
        profile.body_ratio = profile.body_count as f64 / n;
        profile.space_ratio = profile.space_count as f64 / n;
        profile.tech_ratio = profile.tech_count as f64 / n;
        profile.emoji_per_insight = profile.emoji_count as f64 / n;
    }

    profile
}

/// Build the meta profile for a subject, with `now` as the lifecycle
/// reference time. Returns `None` when the subject has no insights.
pub(crate) fn build_meta_profile_at(
    chamber: &Chamber,
    subject_id: &str,
    lexicon: &Lexicon,
    now: DateTime<Utc>,
) -> Option<MetaProfile> {
    let mut themes: Vec<String> = Vec::new();
    for ins in &chamber.insights {
        if ins.subject_id == subject_id && !themes.contains(&ins.theme_id) {
            themes.push(ins.theme_id.clone());
        }
    }
    if themes.is_empty() {
        return None;
    }

    let topics: Vec<TopicProfile> = themes
        .iter()
        .map(|theme_id| {
            let stats = topic_stats(chamber, subject_id, theme_id, lexicon);
            let insights = insights_for_topic(chamber, subject_id, theme_id);
            TopicProfile {
                theme_id: theme_id.clone(),
                stats,
                semantic_counts: semantic_counts(&insights),
            }
        })
        .collect();

    let global = global_profile(&topics);
    let patterns = detect_patterns(&topics, &global);
    debug!(
        subject_id,
        topic_count = topics.len(),
        pattern_count = patterns.len(),
        "built meta profile"
    );

    let subject_insights: Vec<&Insight> = chamber
        .insights
        .iter()
        .filter(|ins| ins.subject_id == subject_id)
        .collect();

    let insights = subject_insights
        .iter()
        .map(|ins| LifecycleInsight {
            insight: (*ins).clone(),
            lifecycle: insight_lifecycle(ins, now),
        })
        .collect();

    let concepts = concept_index(subject_insights.iter().copied());
    let semiotic = semiotic_profile(&subject_insights);

    Some(MetaProfile {
        subject_id: subject_id.to_string(),
        topics,
        global,
        semiotic,
        patterns,
        insights,
        concepts,
    })
}

/// Concept index restricted to one (subject, theme) topic
pub fn concepts_for_theme(
    chamber: &Chamber,
    subject_id: &str,
    theme_id: &str,
) -> Vec<ConceptIndexEntry> {
    let insights = insights_for_topic(chamber, subject_id, theme_id);
    concept_index(insights.into_iter())
}

/// Numbered path steps: the first `max_steps` insights by `first_seen`
pub fn path_steps(insights: &[&Insight], max_steps: usize) -> Vec<String> {
    if insights.is_empty() {
        return vec!["Ingen innsikter å lage sti av ennå.".to_string()];
    }

    let mut sorted: Vec<&Insight> = insights.to_vec();
    sorted.sort_by_key(|ins| ins.first_seen);

    sorted
        .iter()
        .take(max_steps)
        .enumerate()
        .map(|(idx, ins)| format!("{}. {}", idx + 1, ins.summary))
        .collect()
}

/// Strength of a concept's use within one insight: its count plus bonuses
/// for high intensity and negative/mixed valence
fn concept_strength(insight: &Insight, key: &str) -> u32 {
    let base = insight
        .concepts
        .iter()
        .find(|c| c.key.eq_ignore_ascii_case(key))
        .map(|c| c.count.max(1))
        .unwrap_or(1);

    let mut bonus = 0;
    match insight.semantic.intensity {
        Intensity::High => bonus += 2,
        Intensity::Medium => bonus += 1,
        Intensity::Low => {}
    }
    match insight.semantic.valence {
        Valence::Negative => bonus += 2,
        Valence::Mixed => bonus += 1,
        _ => {}
    }

    base + bonus
}

/// Chronological thinking trail for one concept across a topic's insights
///
/// With more hits than the limit, picks the first mention, the most charged
/// use, a midpoint, and the latest mention, then backfills by strength.
pub fn concept_path_for_concept(
    insights: &[&Insight],
    concept_key: &str,
    max_steps: usize,
) -> Vec<String> {
    let key = concept_key.trim().to_lowercase();
    if key.is_empty() {
        return vec!["Ingen begrepssti: du må velge et begrep først.".to_string()];
    }

    let mut sorted: Vec<&Insight> = insights
        .iter()
        .copied()
        .filter(|ins| ins.concepts.iter().any(|c| c.key.to_lowercase() == key))
        .collect();
    if sorted.is_empty() {
        return vec![format!(
            "Ingen innsikter for begrepet «{key}» ennå i dette temaet."
        )];
    }
    sorted.sort_by_key(|ins| ins.first_seen);

    if sorted.len() <= max_steps {
        return sorted
            .iter()
            .enumerate()
            .map(|(idx, ins)| format!("{}. «{}» – {}", idx + 1, key, ins.summary))
            .collect();
    }

    let first = 0;
    let last = sorted.len() - 1;
    let mid = sorted.len() / 2;
    // earliest wins on ties
    let mut strongest = first;
    let mut strongest_score = 0;
    for (idx, ins) in sorted.iter().enumerate() {
        let score = concept_strength(ins, &key);
        if score > strongest_score {
            strongest_score = score;
            strongest = idx;
        }
    }

    let mut picked: Vec<usize> = Vec::new();
    for idx in [first, strongest, mid, last] {
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }

    if picked.len() < max_steps {
        let mut remaining: Vec<usize> =
            (0..sorted.len()).filter(|idx| !picked.contains(idx)).collect();
        remaining.sort_by(|a, b| {
            concept_strength(sorted[*b], &key).cmp(&concept_strength(sorted[*a], &key))
        });
        for idx in remaining.into_iter().take(max_steps - picked.len()) {
            picked.push(idx);
        }
    }

    picked.sort_unstable();

    picked
        .iter()
        .enumerate()
        .map(|(step, &idx)| {
            let ins = sorted[idx];
            let mut roles: Vec<&str> = Vec::new();
            if idx == first {
                roles.push("første gang du nevner begrepet");
            }
            if idx == last {
                roles.push("slik du snakker om det nå");
            }
            if idx == strongest {
                roles.push("mest ladet bruk");
            }
            if idx == mid && idx != first && idx != last {
                roles.push("midt i utviklingen");
            }

            let role = if roles.is_empty() {
                String::new()
            } else {
                format!(" ({})", roles.join(", "))
            };
            format!("{}. «{}»{}: {}", step + 1, key, role, ins.summary)
        })
        .collect()
}
