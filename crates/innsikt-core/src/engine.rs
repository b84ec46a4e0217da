//! The engine facade: a stateless value bundling the lexicon and the
//! precompiled regex patterns
//!
//! The engine never owns a chamber. Callers keep their own `Chamber` and
//! pass it to every operation, so two engines (or two threads with their
//! own chambers) never interfere.

use chrono::Utc;

use crate::error::Result;
use crate::extract::{self, Features, Patterns};
use crate::lexicon::Lexicon;
use crate::meta::{self, MetaProfile};
use crate::models::{Chamber, Concept, Insight, Signal};
use crate::reconcile::{self, Reconciliation};
use crate::similarity::combined_similarity;
use crate::stats::{self, TopicOverview, TopicStats};

/// Reconciliation and analytics engine over caller-owned chambers
#[derive(Debug)]
pub struct InsightEngine {
    lexicon: Lexicon,
    patterns: Patterns,
}

impl InsightEngine {
    /// Engine with the embedded default lexicon
    pub fn new() -> Result<Self> {
        Self::with_lexicon(Lexicon::builtin()?)
    }

    /// Engine with a caller-provided lexicon (e.g. `Lexicon::load()`)
    pub fn with_lexicon(lexicon: Lexicon) -> Result<Self> {
        Ok(Self {
            lexicon,
            patterns: Patterns::new()?,
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run the full feature extractor over one utterance
    pub fn extract_features(&self, text: &str) -> Features {
        extract::extract(text, &self.lexicon, &self.patterns)
    }

    /// Extract normalized concepts from one utterance
    pub fn extract_concepts(&self, text: &str) -> Vec<Concept> {
        extract::concepts::extract_concepts(text, &self.lexicon)
    }

    /// Combined text + semantic similarity between a signal and an insight
    pub fn similarity(&self, signal: &Signal, insight: &Insight) -> f64 {
        let features = self.extract_features(&signal.text);
        combined_similarity(
            &signal.text,
            &features.semantic,
            &features.dimensions,
            &insight.summary,
            &insight.semantic,
            &insight.dimensions,
        )
    }

    /// Fold one signal into the chamber: reinforce the best match above
    /// the threshold or create a new insight
    pub fn reconcile(&self, chamber: &mut Chamber, signal: &Signal) -> Reconciliation {
        reconcile::reconcile(chamber, signal, &self.lexicon, &self.patterns)
    }

    /// Aggregated statistics for one (subject, theme) topic
    pub fn topic_stats(&self, chamber: &Chamber, subject_id: &str, theme_id: &str) -> TopicStats {
        stats::topic_stats(chamber, subject_id, theme_id, &self.lexicon)
    }

    /// One overview row per (subject, theme) pair in the chamber
    pub fn topics_overview(&self, chamber: &Chamber) -> Vec<TopicOverview> {
        stats::topics_overview(chamber, &self.lexicon)
    }

    /// Cross-topic meta profile for a subject, `None` when the subject
    /// has no insights
    pub fn build_meta_profile(&self, chamber: &Chamber, subject_id: &str) -> Option<MetaProfile> {
        meta::build_meta_profile_at(chamber, subject_id, &self.lexicon, Utc::now())
    }

    /// Meta profile with an explicit lifecycle reference time
    pub fn build_meta_profile_at(
        &self,
        chamber: &Chamber,
        subject_id: &str,
        now: chrono::DateTime<Utc>,
    ) -> Option<MetaProfile> {
        meta::build_meta_profile_at(chamber, subject_id, &self.lexicon, now)
    }
}
