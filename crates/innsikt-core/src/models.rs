//! Core data model: signals, insights, and the chamber
//!
//! A `Signal` is one raw utterance tagged to a subject/theme. An `Insight`
//! is the accumulated, annotated evidence unit built from one or more
//! similar signals. The `Chamber` is the full insight collection for one
//! storage partition; it is owned by the caller and passed explicitly to
//! every engine operation.
//!
//! Every per-axis tag is a closed enum so the aggregators can match
//! exhaustively, with no silent default-bucket miscounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Perceived intensity of the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// How often the described experience occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Unknown,
    Rare,
    Often,
    Always,
}

/// Modal color of the utterance (demand, opportunity, obstruction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Neutral,
    Demand,
    Opportunity,
    Obstruction,
}

/// Which time frame the utterance refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRef {
    Now,
    Past,
    Future,
    Mixed,
}

/// Who the utterance is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    #[serde(rename = "self")]
    SelfVoice,
    Others,
    Diffuse,
}

/// Emotional valence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Valence {
    Neutral,
    Positive,
    Negative,
    Mixed,
}

/// Pace of change described in the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Unknown,
    Sudden,
    Gradual,
    Slow,
}

/// Meta-language flag: is the speaker reflecting on their own pattern?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaLanguage {
    None,
    Reflective,
    Uncertain,
}

/// Experiential dimension an utterance touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Emotion,
    Thought,
    Behavior,
    Body,
    Relation,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Emotion => "emotion",
            Dimension::Thought => "thought",
            Dimension::Behavior => "behavior",
            Dimension::Body => "body",
            Dimension::Relation => "relation",
        }
    }

    /// All dimensions, in canonical display order
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Emotion,
            Dimension::Thought,
            Dimension::Behavior,
            Dimension::Body,
            Dimension::Relation,
        ]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Narrative actor (grammatical subject carrying the story)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    None,
    I,
    We,
    One,
    Everyone,
    They,
}

/// Moral tone of the narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoralTone {
    None,
    Critical,
    Normative,
}

/// Classification of an insight at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Unclassified,
    Press,
    Discovery,
    Integration,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Unclassified => "unclassified",
            InsightKind::Press => "press",
            InsightKind::Discovery => "discovery",
            InsightKind::Integration => "integration",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse meta-concept domain derived from concept keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaDomain {
    Body,
    Time,
    Work,
    Society,
    Technology,
}

impl MetaDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaDomain::Body => "body",
            MetaDomain::Time => "time",
            MetaDomain::Work => "work",
            MetaDomain::Society => "society",
            MetaDomain::Technology => "technology",
        }
    }
}

impl fmt::Display for MetaDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic tag bundle extracted from one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semantics {
    pub intensity: Intensity,
    pub frequency: Frequency,
    pub valence: Valence,
    pub modality: Modality,
    pub subject_type: SubjectType,
    pub time_ref: TimeRef,
    pub tempo: Tempo,
    pub meta: MetaLanguage,
    pub has_contrast: bool,
    pub has_absolute: bool,
}

impl Default for Semantics {
    fn default() -> Self {
        Self {
            intensity: Intensity::Medium,
            frequency: Frequency::Unknown,
            valence: Valence::Neutral,
            modality: Modality::Neutral,
            subject_type: SubjectType::Diffuse,
            time_ref: TimeRef::Now,
            tempo: Tempo::Unknown,
            meta: MetaLanguage::None,
            has_contrast: false,
            has_absolute: false,
        }
    }
}

/// Narrative markers extracted from one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub actor: Actor,
    pub norm_break: bool,
    pub bagatellization: bool,
    pub systemic_effect: bool,
    pub moral_tone: MoralTone,
}

impl Default for Narrative {
    fn default() -> Self {
        Self {
            actor: Actor::None,
            norm_break: false,
            bagatellization: false,
            systemic_effect: false,
            moral_tone: MoralTone::None,
        }
    }
}

/// Symbolic markers (typography and emoji shorthand)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemioticMarkers {
    pub heart: bool,
    pub stars: bool,
    pub arrow: bool,
    pub exclamation: bool,
}

/// Semiotic domain flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemioticDomains {
    pub body: bool,
    pub space: bool,
    pub tech: bool,
}

/// Semiotic tag bundle: emoji glyphs, symbolic markers, domain flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Semiotic {
    pub emojis: Vec<String>,
    pub markers: SemioticMarkers,
    pub domains: SemioticDomains,
}

impl Semiotic {
    /// Merge two semiotic bundles: emoji union (capped at 20), OR'd flags
    pub fn merge(a: &Semiotic, b: &Semiotic) -> Semiotic {
        let mut emojis = a.emojis.clone();
        for e in &b.emojis {
            if !emojis.contains(e) {
                emojis.push(e.clone());
            }
        }
        emojis.truncate(20);

        Semiotic {
            emojis,
            markers: SemioticMarkers {
                heart: a.markers.heart || b.markers.heart,
                stars: a.markers.stars || b.markers.stars,
                arrow: a.markers.arrow || b.markers.arrow,
                exclamation: a.markers.exclamation || b.markers.exclamation,
            },
            domains: SemioticDomains {
                body: a.domains.body || b.domains.body,
                space: a.domains.space || b.domains.space,
                tech: a.domains.tech || b.domains.tech,
            },
        }
    }
}

/// Counts of logical connective phrases in a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalPatterns {
    pub causal: u32,
    pub inferential: u32,
    pub contrast: u32,
    pub balancing: u32,
}

/// A normalized concept with its occurrence count and raw surface examples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub key: String,
    pub count: u32,
    /// Up to 5 distinct raw surface forms, in encounter order
    pub examples: Vec<String>,
}

/// Evidence strength of an insight
///
/// Invariants: `evidence_count >= 1`, `total_score <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub evidence_count: u32,
    pub total_score: u32,
}

/// Optional context axes attached to a signal (place, person, field, tags)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalContext {
    pub place_id: Option<String>,
    pub person_id: Option<String>,
    pub field_id: Option<String>,
    #[serde(default)]
    pub emner: Vec<String>,
}

/// One raw utterance submitted for analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub subject_id: String,
    pub theme_id: String,
    /// Trimmed utterance text
    pub text: String,
    pub place_id: Option<String>,
    pub person_id: Option<String>,
    pub field_id: Option<String>,
    #[serde(default)]
    pub emner: Vec<String>,
}

impl Signal {
    /// Create a signal from a chat message, stamped with the current time
    pub fn from_message(
        text: impl Into<String>,
        subject_id: impl Into<String>,
        theme_id: impl Into<String>,
    ) -> Self {
        Self::from_message_at(text, subject_id, theme_id, Utc::now())
    }

    /// Create a signal with an explicit timestamp (deterministic for tests)
    pub fn from_message_at(
        text: impl Into<String>,
        subject_id: impl Into<String>,
        theme_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let text = text.into().trim().to_string();
        Self {
            id: generate_id("sig", &text, timestamp),
            timestamp,
            subject_id: subject_id.into(),
            theme_id: theme_id.into(),
            text,
            place_id: None,
            person_id: None,
            field_id: None,
            emner: Vec::new(),
        }
    }

    /// Attach optional context axes
    pub fn with_context(mut self, context: SignalContext) -> Self {
        self.place_id = context.place_id;
        self.person_id = context.person_id;
        self.field_id = context.field_id;
        self.emner = context.emner;
        self
    }
}

/// The unit of accumulated evidence about a topic
///
/// Created by the reconciliation engine when no sufficiently similar insight
/// exists; mutated in place by the reinforcement path; never deleted except
/// by wholesale chamber reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub subject_id: String,
    pub theme_id: String,
    pub place_id: Option<String>,
    pub person_id: Option<String>,
    pub field_id: Option<String>,
    #[serde(default)]
    pub emner: Vec<String>,
    /// First ~10 words of the founding signal's text
    pub title: String,
    /// Verbatim text of the founding signal
    pub summary: String,
    pub strength: Strength,
    pub depth_score: u32,
    pub insight_type: InsightKind,
    pub first_seen: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub semantic: Semantics,
    /// Never empty: defaults to [thought] when no keyword matches
    pub dimensions: Vec<Dimension>,
    pub narrative: Narrative,
    pub concepts: Vec<Concept>,
    pub semiotic: Semiotic,
    /// 0-10 coherence score
    pub coherence: f64,
    /// 0-1 terminology density
    pub terminology: f64,
    pub logical: LogicalPatterns,
    pub meta_concepts: Vec<MetaDomain>,
}

/// The full insight collection for one storage partition
///
/// Persisted by the storage collaborator as a single JSON document
/// `{"insights": [...]}`. Order is irrelevant to semantics except display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chamber {
    pub insights: Vec<Insight>,
}

impl Chamber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }
}

/// Content-derived id: `<prefix>_<unix millis>_<sha256 prefix>`
pub(crate) fn generate_id(prefix: &str, text: &str, timestamp: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(timestamp.to_rfc3339().as_bytes());
    let digest = hasher.finalize();
    format!(
        "{}_{}_{}",
        prefix,
        timestamp.timestamp_millis(),
        &hex::encode(digest)[..8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_trims_text() {
        let sig = Signal::from_message("  hei på deg  ", "s1", "t1");
        assert_eq!(sig.text, "hei på deg");
        assert!(sig.id.starts_with("sig_"));
    }

    #[test]
    fn test_semiotic_merge_or_logic() {
        let a = Semiotic {
            emojis: vec!["🌊".to_string()],
            markers: SemioticMarkers {
                heart: true,
                ..Default::default()
            },
            domains: SemioticDomains {
                body: true,
                ..Default::default()
            },
        };
        let b = Semiotic {
            emojis: vec!["🌊".to_string(), "🔥".to_string()],
            markers: SemioticMarkers {
                stars: true,
                ..Default::default()
            },
            domains: SemioticDomains {
                tech: true,
                ..Default::default()
            },
        };

        let merged = Semiotic::merge(&a, &b);
        assert_eq!(merged.emojis, vec!["🌊".to_string(), "🔥".to_string()]);
        assert!(merged.markers.heart);
        assert!(merged.markers.stars);
        assert!(!merged.markers.arrow);
        assert!(merged.domains.body);
        assert!(merged.domains.tech);
        assert!(!merged.domains.space);
    }

    #[test]
    fn test_axis_serialization_names() {
        assert_eq!(
            serde_json::to_string(&SubjectType::SelfVoice).unwrap(),
            "\"self\""
        );
        assert_eq!(
            serde_json::to_string(&Modality::Obstruction).unwrap(),
            "\"obstruction\""
        );
        assert_eq!(serde_json::to_string(&Frequency::Always).unwrap(), "\"always\"");
    }

    #[test]
    fn test_generate_id_distinct_for_distinct_text() {
        let now = Utc::now();
        let a = generate_id("sig", "en tekst", now);
        let b = generate_id("sig", "en annen tekst", now);
        assert_ne!(a, b);
    }
}
