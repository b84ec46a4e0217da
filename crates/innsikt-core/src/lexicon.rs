//! Data-driven word lists for the rule-based feature extractor
//!
//! The classification rules are deliberately kept out of code so they can be
//! tested and tuned independently. Resolution is two-layer:
//! 1. Check for an override in the data dir
//!    (~/.local/share/innsikt/config/lexicon.toml)
//! 2. Fall back to the embedded default (compiled into the binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default lexicon (compiled into binary)
const DEFAULT_LEXICON: &str = include_str!("../../../config/lexicon.toml");

/// Word lists for the semantic axes
#[derive(Debug, Clone, Deserialize)]
pub struct SemanticsLexicon {
    pub intensity_high: Vec<String>,
    pub intensity_low: Vec<String>,
    pub frequency_always: Vec<String>,
    pub frequency_often: Vec<String>,
    pub frequency_rare: Vec<String>,
    pub modality_demand: Vec<String>,
    pub modality_opportunity: Vec<String>,
    pub modality_obstruction: Vec<String>,
    pub time_now: Vec<String>,
    pub time_past: Vec<String>,
    pub time_future: Vec<String>,
    pub valence_positive: Vec<String>,
    pub valence_negative: Vec<String>,
    pub tempo_sudden: Vec<String>,
    pub tempo_gradual: Vec<String>,
    pub tempo_slow: Vec<String>,
    pub meta_reflective: Vec<String>,
    pub meta_uncertain: Vec<String>,
    pub contrast: Vec<String>,
    pub absolute: Vec<String>,
}

/// Keyword lists per experiential dimension
#[derive(Debug, Clone, Deserialize)]
pub struct DimensionLexicon {
    pub emotion: Vec<String>,
    pub behavior: Vec<String>,
    pub thought: Vec<String>,
    pub body: Vec<String>,
    pub relation: Vec<String>,
}

/// Phrase lists for narrative markers
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeLexicon {
    pub norm_break: Vec<String>,
    pub bagatellization: Vec<String>,
    pub systemic_effect: Vec<String>,
    pub moral_critical: Vec<String>,
    pub moral_normative: Vec<String>,
}

/// Phrase lists for semiotic domain flags
#[derive(Debug, Clone, Deserialize)]
pub struct SemioticLexicon {
    pub body: Vec<String>,
    pub space: Vec<String>,
    pub tech: Vec<String>,
}

/// Stopwords and suffix tables for the concept normalizer
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptLexicon {
    pub stopwords: Vec<String>,
    pub academic_suffixes: Vec<String>,
}

/// Connector and technical-term tables for coherence/terminology/logic
#[derive(Debug, Clone, Deserialize)]
pub struct DiscourseLexicon {
    pub connectors: Vec<String>,
    pub technical_words: Vec<String>,
    pub technical_suffixes: Vec<String>,
    pub causal: Vec<String>,
    pub inferential: Vec<String>,
    pub contrast: Vec<String>,
    pub balancing: Vec<String>,
}

/// Concept keys mapping into coarse meta-concept domains
#[derive(Debug, Clone, Deserialize)]
pub struct MetaConceptLexicon {
    pub body: Vec<String>,
    pub time: Vec<String>,
    pub work: Vec<String>,
    pub society: Vec<String>,
    pub technology: Vec<String>,
}

/// The full lexicon driving the feature extractor
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub semantics: SemanticsLexicon,
    pub dimensions: DimensionLexicon,
    pub narrative: NarrativeLexicon,
    pub semiotic: SemioticLexicon,
    pub concepts: ConceptLexicon,
    pub discourse: DiscourseLexicon,
    pub meta_concepts: MetaConceptLexicon,
}

impl Lexicon {
    /// The embedded default lexicon
    pub fn builtin() -> Result<Self> {
        parse_lexicon(DEFAULT_LEXICON)
    }

    /// Load the lexicon: data-dir override first, then embedded default
    pub fn load() -> Result<Self> {
        if let Some(path) = default_lexicon_path() {
            if path.exists() {
                return Self::from_path(&path);
            }
        }
        Self::builtin()
    }

    /// Load a lexicon from an explicit TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        parse_lexicon(&content)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.concepts.stopwords.iter().any(|s| s == token)
    }
}

/// Default lexicon override path
pub fn default_lexicon_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("innsikt").join("config").join("lexicon.toml"))
}

fn parse_lexicon(content: &str) -> Result<Lexicon> {
    toml::from_str(content).map_err(|e| Error::Lexicon(format!("Invalid lexicon TOML: {}", e)))
}
