//! Innsikt Core Library
//!
//! Rule-based insight engine for free-text signals (Norwegian):
//! - Linguistic feature extraction (semantics, dimensions, narrative,
//!   semiotics, concepts, discourse measures)
//! - Signal reconciliation into de-duplicated, evidence-weighted insights
//! - Per-topic statistics: saturation, concept density, artifact type,
//!   phase classification
//! - Cross-topic meta profile with patterns, lifecycle states, and a
//!   global concept index
//! - Configurable word lists (embedded TOML default, data-dir override)
//!
//! The engine is deterministic and fully synchronous; the caller owns the
//! `Chamber` and passes it to every operation.

pub mod engine;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod meta;
pub mod models;
pub mod reconcile;
pub mod similarity;
pub mod stats;
pub mod text;

pub use engine::InsightEngine;
pub use error::{Error, Result};
pub use extract::{Features, Patterns};
pub use extract::concepts::merge_concepts;
pub use lexicon::{default_lexicon_path, Lexicon};
pub use meta::{
    concept_path_for_concept, concepts_for_theme, insight_lifecycle, path_steps,
    ConceptIndexEntry, CrossTopicPattern, GlobalProfile, Lifecycle, LifecycleInsight, MetaProfile,
    PatternId, PatternKind, PhaseCounts, SemioticProfile, TopicProfile,
};
pub use models::{
    Actor, Chamber, Concept, Dimension, Frequency, Insight, InsightKind, Intensity,
    LogicalPatterns, MetaDomain, MetaLanguage, Modality, MoralTone, Narrative, Semantics,
    Semiotic, SemioticDomains, SemioticMarkers, Signal, SignalContext, Strength, SubjectType,
    Tempo, TimeRef, Valence,
};
pub use reconcile::{insights_for_topic, Reconciliation, SIMILARITY_THRESHOLD};
pub use similarity::semantic_similarity;
pub use stats::{
    dimension_summary, semantic_counts, ArtifactType, DimensionSummary, LogicalAverages,
    MetaConceptCount, MetaConceptRollup, Phase, SemanticCounts, TopicOverview, TopicStats,
};
pub use text::{split_into_sentences, text_similarity, title_from_text};
