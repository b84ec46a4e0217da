//! Per-topic aggregation: saturation, concept density, artifact type,
//! phase, and semantic/dimension tallies
//!
//! All counters match exhaustively on the axis enums so a new variant is a
//! compile error here rather than a silent miscount.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::models::{
    Chamber, Dimension, Frequency, Insight, MetaDomain, MetaLanguage, Modality, TimeRef, Tempo,
    Valence,
};
use crate::reconcile::insights_for_topic;
use crate::text::content_tokens;

/// Recommended rendering artifact for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Card,
    List,
    Path,
    Article,
}

impl ArtifactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Card => "card",
            ArtifactType::List => "list",
            ArtifactType::Path => "path",
            ArtifactType::Article => "article",
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the subject stands with a topic, read off saturation + semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Exploration,
    Press,
    Pattern,
    Stuck,
    Integration,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Exploration => "exploration",
            Phase::Press => "press",
            Phase::Pattern => "pattern",
            Phase::Stuck => "stuck",
            Phase::Integration => "integration",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyCounts {
    pub unknown: u32,
    pub rare: u32,
    pub often: u32,
    pub always: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValenceCounts {
    pub negative: u32,
    pub positive: u32,
    pub mixed: u32,
    pub neutral: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityCounts {
    pub demand: u32,
    pub opportunity: u32,
    pub obstruction: u32,
    pub neutral: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRefCounts {
    pub now: u32,
    pub past: u32,
    pub future: u32,
    pub mixed: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempoCounts {
    pub unknown: u32,
    pub sudden: u32,
    pub gradual: u32,
    pub slow: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaLanguageCounts {
    pub none: u32,
    pub reflective: u32,
    pub uncertain: u32,
}

/// Per-axis tallies over a set of insights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticCounts {
    pub frequency: FrequencyCounts,
    pub valence: ValenceCounts,
    pub modality: ModalityCounts,
    pub time_ref: TimeRefCounts,
    pub tempo: TempoCounts,
    pub meta: MetaLanguageCounts,
    pub contrast_count: u32,
    pub absolute_count: u32,
}

/// How many insights touch each dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub emotion: u32,
    pub behavior: u32,
    pub thought: u32,
    pub body: u32,
    pub relation: u32,
}

/// Per-insight averages of logical connective counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalAverages {
    pub causal: f64,
    pub inferential: f64,
    pub contrast: f64,
    pub balancing: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaConceptCount {
    pub key: MetaDomain,
    pub count: u32,
}

/// Rollup of meta-concept domains across a topic's insights
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaConceptRollup {
    pub unique_count: usize,
    /// Up to 10 domains, most frequent first
    pub top: Vec<MetaConceptCount>,
}

/// Aggregated statistics for one (subject, theme) topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicStats {
    pub topic_id: String,
    pub subject_id: String,
    /// 0-100
    pub insight_saturation: u32,
    /// 0-100
    pub concept_density: u32,
    pub artifact_type: ArtifactType,
    pub insight_count: usize,
    pub user_phase: Phase,
    /// 0-10, averaged per insight
    pub avg_coherence: f64,
    /// 0-1, averaged per insight
    pub avg_terminology: f64,
    pub logical_patterns: LogicalAverages,
    pub meta_concepts: MetaConceptRollup,
}

/// One row in the cross-topic overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicOverview {
    pub subject_id: String,
    pub topic_id: String,
    pub insight_count: usize,
    pub insight_saturation: u32,
    pub concept_density: u32,
    pub artifact_type: ArtifactType,
}

/// Tally the semantic axes over a set of insights
pub fn semantic_counts(insights: &[&Insight]) -> SemanticCounts {
    let mut counts = SemanticCounts::default();

    for ins in insights {
        let sem = &ins.semantic;
        match sem.frequency {
            Frequency::Unknown => counts.frequency.unknown += 1,
            Frequency::Rare => counts.frequency.rare += 1,
            Frequency::Often => counts.frequency.often += 1,
            Frequency::Always => counts.frequency.always += 1,
        }
        match sem.valence {
            Valence::Negative => counts.valence.negative += 1,
            Valence::Positive => counts.valence.positive += 1,
            Valence::Mixed => counts.valence.mixed += 1,
            Valence::Neutral => counts.valence.neutral += 1,
        }
        match sem.modality {
            Modality::Demand => counts.modality.demand += 1,
            Modality::Opportunity => counts.modality.opportunity += 1,
            Modality::Obstruction => counts.modality.obstruction += 1,
            Modality::Neutral => counts.modality.neutral += 1,
        }
        match sem.time_ref {
            TimeRef::Now => counts.time_ref.now += 1,
            TimeRef::Past => counts.time_ref.past += 1,
            TimeRef::Future => counts.time_ref.future += 1,
            TimeRef::Mixed => counts.time_ref.mixed += 1,
        }
        match sem.tempo {
            Tempo::Unknown => counts.tempo.unknown += 1,
            Tempo::Sudden => counts.tempo.sudden += 1,
            Tempo::Gradual => counts.tempo.gradual += 1,
            Tempo::Slow => counts.tempo.slow += 1,
        }
        match sem.meta {
            MetaLanguage::None => counts.meta.none += 1,
            MetaLanguage::Reflective => counts.meta.reflective += 1,
            MetaLanguage::Uncertain => counts.meta.uncertain += 1,
        }
        if sem.has_contrast {
            counts.contrast_count += 1;
        }
        if sem.has_absolute {
            counts.absolute_count += 1;
        }
    }

    counts
}

/// Tally how many insights touch each dimension
pub fn dimension_summary(insights: &[&Insight]) -> DimensionSummary {
    let mut summary = DimensionSummary::default();
    for ins in insights {
        for dim in &ins.dimensions {
            match dim {
                Dimension::Emotion => summary.emotion += 1,
                Dimension::Behavior => summary.behavior += 1,
                Dimension::Thought => summary.thought += 1,
                Dimension::Body => summary.body += 1,
                Dimension::Relation => summary.relation += 1,
            }
        }
    }
    summary
}

/// Saturation 0-100: volume (up to 70) plus breadth bonuses for distinct
/// dimensions, time references, and valences
pub(crate) fn insight_saturation(insights: &[&Insight]) -> u32 {
    let n = insights.len() as u32;
    if n == 0 {
        return 0;
    }

    let base = n.min(10) * 7;

    let mut dims_seen: HashSet<Dimension> = HashSet::new();
    let mut times_seen: HashSet<TimeRef> = HashSet::new();
    let mut valences_seen: HashSet<Valence> = HashSet::new();
    for ins in insights {
        dims_seen.extend(ins.dimensions.iter().copied());
        times_seen.insert(ins.semantic.time_ref);
        valences_seen.insert(ins.semantic.valence);
    }

    let dim_bonus = (dims_seen.len() as u32).min(5) * 4;
    let time_bonus = (times_seen.len() as u32).min(3) * 3;
    let val_bonus = (valences_seen.len() as u32).min(4);

    (base + dim_bonus + time_bonus + val_bonus).min(100)
}

/// Concept density 0-100: unique/total content-token ratio over the
/// combined titles and summaries, normalized against a 0.25 ceiling
pub(crate) fn concept_density(insights: &[&Insight], lexicon: &Lexicon) -> u32 {
    let combined = insights
        .iter()
        .map(|ins| format!("{}. {}", ins.title, ins.summary))
        .collect::<Vec<_>>()
        .join(" ");

    let tokens = content_tokens(&combined, lexicon);
    if tokens.is_empty() {
        return 0;
    }

    let unique: HashSet<&String> = tokens.iter().collect();
    let raw = unique.len() as f64 / tokens.len() as f64;
    let normalized = (raw / 0.25).clamp(0.0, 1.0);
    (normalized * 100.0).round() as u32
}

pub(crate) fn decide_artifact(saturation: u32, density: u32) -> ArtifactType {
    if saturation < 30 && density < 30 {
        ArtifactType::Card
    } else if (30..60).contains(&saturation) && density < 60 {
        ArtifactType::List
    } else if (30..60).contains(&saturation) {
        ArtifactType::Path
    } else if saturation >= 60 && density >= 60 {
        ArtifactType::Article
    } else if saturation >= 60 {
        ArtifactType::Path
    } else {
        ArtifactType::Card
    }
}

pub(crate) fn user_phase(saturation: u32, counts: &SemanticCounts) -> Phase {
    if saturation < 30 {
        return Phase::Exploration;
    }

    if saturation < 60 {
        let pressure = counts.modality.demand + counts.modality.obstruction;
        if pressure > counts.modality.opportunity {
            return Phase::Press;
        }
        return Phase::Pattern;
    }

    if counts.valence.negative > counts.valence.positive {
        Phase::Stuck
    } else {
        Phase::Integration
    }
}

/// Full statistics for one (subject, theme) topic
pub(crate) fn topic_stats(
    chamber: &Chamber,
    subject_id: &str,
    theme_id: &str,
    lexicon: &Lexicon,
) -> TopicStats {
    let insights = insights_for_topic(chamber, subject_id, theme_id);
    let n = insights.len();

    let saturation = insight_saturation(&insights);
    let density = concept_density(&insights, lexicon);
    let counts = semantic_counts(&insights);

    let mut avg_coherence = 0.0;
    let mut avg_terminology = 0.0;
    let mut logical = LogicalAverages::default();
    let mut domain_counts: Vec<(MetaDomain, u32)> = Vec::new();

    if n > 0 {
        for ins in &insights {
            avg_coherence += ins.coherence;
            avg_terminology += ins.terminology;
            logical.causal += ins.logical.causal as f64;
            logical.inferential += ins.logical.inferential as f64;
            logical.contrast += ins.logical.contrast as f64;
            logical.balancing += ins.logical.balancing as f64;

            for domain in &ins.meta_concepts {
                match domain_counts.iter_mut().find(|(d, _)| d == domain) {
                    Some((_, count)) => *count += 1,
                    None => domain_counts.push((*domain, 1)),
                }
            }
        }

        let divisor = n as f64;
        avg_coherence /= divisor;
        avg_terminology /= divisor;
        logical.causal /= divisor;
        logical.inferential /= divisor;
        logical.contrast /= divisor;
        logical.balancing /= divisor;
    }

    let unique_count = domain_counts.len();
    domain_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top = domain_counts
        .into_iter()
        .take(10)
        .map(|(key, count)| MetaConceptCount { key, count })
        .collect();

    TopicStats {
        topic_id: theme_id.to_string(),
        subject_id: subject_id.to_string(),
        insight_saturation: saturation,
        concept_density: density,
        artifact_type: decide_artifact(saturation, density),
        insight_count: n,
        user_phase: user_phase(saturation, &counts),
        avg_coherence,
        avg_terminology,
        logical_patterns: logical,
        meta_concepts: MetaConceptRollup { unique_count, top },
    }
}

/// One overview row per (subject, theme) pair, in first-seen order
pub(crate) fn topics_overview(chamber: &Chamber, lexicon: &Lexicon) -> Vec<TopicOverview> {
    let mut keys: Vec<(String, String)> = Vec::new();
    for ins in &chamber.insights {
        let key = (ins.subject_id.clone(), ins.theme_id.clone());
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys.into_iter()
        .map(|(subject_id, theme_id)| {
            let stats = topic_stats(chamber, &subject_id, &theme_id, lexicon);
            TopicOverview {
                subject_id,
                topic_id: theme_id,
                insight_count: stats.insight_count,
                insight_saturation: stats.insight_saturation,
                concept_density: stats.concept_density,
                artifact_type: stats.artifact_type,
            }
        })
        .collect()
}
