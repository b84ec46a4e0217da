//! Linguistic feature extraction from raw text
//!
//! Pure functions mapping one utterance to a structured feature bundle via
//! keyword/phrase containment tests against the lexicon. Every call is
//! independent; there is no shared state beyond the precompiled regexes.

pub mod concepts;
pub mod dimensions;
pub mod discourse;
pub mod narrative;
pub mod semantics;
pub mod semiotic;

use regex::Regex;

use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::models::{Concept, LogicalPatterns, MetaDomain, Narrative, Semantics, Semiotic};

/// Precompiled regexes used by the extractor
///
/// Kept as versioned constant tables: pronoun boundaries, the emoji Unicode
/// range, and the symbolic marker glyphs.
#[derive(Debug)]
pub struct Patterns {
    pub(crate) first_person: Regex,
    pub(crate) other_people: Regex,
    pub(crate) actor_we: Regex,
    pub(crate) actor_one: Regex,
    pub(crate) actor_everyone: Regex,
    pub(crate) actor_they: Regex,
    pub(crate) emoji: Regex,
    pub(crate) heart: Regex,
    pub(crate) stars: Regex,
    pub(crate) arrow: Regex,
    pub(crate) exclamation: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            first_person: Regex::new(r"\bjeg\b")?,
            other_people: Regex::new(r"\bde\b|\bandre\b|\bfolk\b|\balle\b")?,
            actor_we: Regex::new(r"\bvi\b")?,
            actor_one: Regex::new(r"\bman\b")?,
            actor_everyone: Regex::new(r"\balle\b|\bfolk\b")?,
            actor_they: Regex::new(r"\bde\b")?,
            emoji: Regex::new(r"[\x{1F300}-\x{1FAFF}]")?,
            heart: Regex::new("❤️|💜|💙|💚|💛|🧡|💕|💖|💗")?,
            stars: Regex::new("⭐|✨|🌟")?,
            arrow: Regex::new("→|←|↔|⇄|->|<-")?,
            exclamation: Regex::new("!{2,}")?,
        })
    }
}

/// The full feature bundle extracted from one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub semantic: Semantics,
    pub dimensions: Vec<crate::models::Dimension>,
    pub narrative: Narrative,
    pub concepts: Vec<Concept>,
    pub semiotic: Semiotic,
    /// 0-10
    pub coherence: f64,
    /// 0-1
    pub terminology: f64,
    pub logical: LogicalPatterns,
    pub meta_concepts: Vec<MetaDomain>,
}

/// Run the full extractor over one utterance
pub(crate) fn extract(text: &str, lexicon: &Lexicon, patterns: &Patterns) -> Features {
    let concepts = concepts::extract_concepts(text, lexicon);
    let meta_concepts = discourse::meta_concepts(&concepts, lexicon);

    Features {
        semantic: semantics::analyze_semantics(text, lexicon, patterns),
        dimensions: dimensions::analyze_dimensions(text, lexicon),
        narrative: narrative::analyze_narrative(text, lexicon, patterns),
        concepts,
        semiotic: semiotic::analyze_semiotic(text, lexicon, patterns),
        coherence: discourse::coherence(text, lexicon),
        terminology: discourse::terminology_density(text, lexicon),
        logical: discourse::logical_patterns(text, lexicon),
        meta_concepts,
    }
}

/// Case-folded substring containment against a word list
pub(crate) fn contains_any(lower: &str, words: &[String]) -> bool {
    words.iter().any(|w| lower.contains(w.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimension, Modality, Valence};

    #[test]
    fn test_extract_empty_text_yields_defaults() {
        let lexicon = Lexicon::builtin().unwrap();
        let patterns = Patterns::new().unwrap();

        let features = extract("", &lexicon, &patterns);
        assert!(features.concepts.is_empty());
        assert_eq!(features.dimensions, vec![Dimension::Thought]);
        assert_eq!(features.semantic.valence, Valence::Neutral);
        assert_eq!(features.semantic.modality, Modality::Neutral);
        assert_eq!(features.coherence, 0.0);
        assert_eq!(features.terminology, 0.0);
    }

    #[test]
    fn test_extract_full_bundle() {
        let lexicon = Lexicon::builtin().unwrap();
        let patterns = Patterns::new().unwrap();

        let features = extract(
            "Jeg føler meg sliten hver dag og klarer ikke å starte",
            &lexicon,
            &patterns,
        );
        assert_eq!(features.semantic.modality, Modality::Obstruction);
        assert_eq!(features.semantic.valence, Valence::Negative);
        assert!(features.dimensions.contains(&Dimension::Body));
        assert!(!features.concepts.is_empty());
    }
}
