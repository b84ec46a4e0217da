//! Semiotic signal analysis: emoji glyphs, symbolic markers, domain flags

use super::{contains_any, Patterns};
use crate::lexicon::Lexicon;
use crate::models::{Semiotic, SemioticDomains, SemioticMarkers};

pub(crate) fn analyze_semiotic(text: &str, lexicon: &Lexicon, patterns: &Patterns) -> Semiotic {
    let lower = text.to_lowercase();
    let lex = &lexicon.semiotic;

    let emojis = patterns
        .emoji
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let markers = SemioticMarkers {
        heart: patterns.heart.is_match(text),
        stars: patterns.stars.is_match(text),
        arrow: patterns.arrow.is_match(text),
        exclamation: patterns.exclamation.is_match(text),
    };

    let domains = SemioticDomains {
        body: contains_any(&lower, &lex.body),
        space: contains_any(&lower, &lex.space),
        tech: contains_any(&lower, &lex.tech),
    };

    Semiotic {
        emojis,
        markers,
        domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Semiotic {
        let lexicon = Lexicon::builtin().unwrap();
        let patterns = Patterns::new().unwrap();
        analyze_semiotic(text, &lexicon, &patterns)
    }

    #[test]
    fn test_emoji_extraction() {
        let semiotic = analyze("dette er fint 🌊🔥 og litt rart 🤔");
        assert_eq!(semiotic.emojis, vec!["🌊", "🔥", "🤔"]);
    }

    #[test]
    fn test_markers() {
        let semiotic = analyze("elsker det ❤️ -> videre!!");
        assert!(semiotic.markers.heart);
        assert!(semiotic.markers.arrow);
        assert!(semiotic.markers.exclamation);
        assert!(!semiotic.markers.stars);
    }

    #[test]
    fn test_single_exclamation_is_not_a_marker() {
        assert!(!analyze("bra jobba!").markers.exclamation);
        assert!(analyze("bra jobba!!!").markers.exclamation);
    }

    #[test]
    fn test_domain_flags() {
        let semiotic = analyze("hjertet banker når jeg ser på skjermen i rommet");
        assert!(semiotic.domains.body);
        assert!(semiotic.domains.tech);
        assert!(semiotic.domains.space);
    }

    #[test]
    fn test_plain_text_has_no_semiotics() {
        let semiotic = analyze("en helt vanlig setning");
        assert!(semiotic.emojis.is_empty());
        assert_eq!(semiotic.markers, SemioticMarkers::default());
        assert_eq!(semiotic.domains, SemioticDomains::default());
    }
}
