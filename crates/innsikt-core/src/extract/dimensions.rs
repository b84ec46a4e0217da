//! Experiential dimension detection (emotion, thought, behavior, body,
//! relation) via independent keyword-list tests

use super::contains_any;
use crate::lexicon::Lexicon;
use crate::models::Dimension;

/// Detect which dimensions an utterance touches. Never empty: defaults to
/// [thought] when no keyword matches.
pub(crate) fn analyze_dimensions(text: &str, lexicon: &Lexicon) -> Vec<Dimension> {
    let lower = text.to_lowercase();
    let lex = &lexicon.dimensions;
    let mut dims = Vec::new();

    if contains_any(&lower, &lex.emotion) {
        dims.push(Dimension::Emotion);
    }
    if contains_any(&lower, &lex.behavior) {
        dims.push(Dimension::Behavior);
    }
    if contains_any(&lower, &lex.thought) {
        dims.push(Dimension::Thought);
    }
    if contains_any(&lower, &lex.body) {
        dims.push(Dimension::Body);
    }
    if contains_any(&lower, &lex.relation) {
        dims.push(Dimension::Relation);
    }

    if dims.is_empty() {
        dims.push(Dimension::Thought);
    }

    dims
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Vec<Dimension> {
        let lexicon = Lexicon::builtin().unwrap();
        analyze_dimensions(text, &lexicon)
    }

    #[test]
    fn test_defaults_to_thought() {
        assert_eq!(analyze("og med ja"), vec![Dimension::Thought]);
        assert_eq!(analyze(""), vec![Dimension::Thought]);
    }

    #[test]
    fn test_multiple_dimensions() {
        let dims = analyze("jeg er redd og sliten og ringer venner");
        assert!(dims.contains(&Dimension::Emotion));
        assert!(dims.contains(&Dimension::Body));
        assert!(dims.contains(&Dimension::Behavior));
        assert!(dims.contains(&Dimension::Relation));
    }

    #[test]
    fn test_tiredness_reads_as_body() {
        let dims = analyze("jeg føler meg sliten hver dag og klarer ikke å starte");
        assert!(dims.contains(&Dimension::Body));
        assert!(!dims.is_empty());
    }
}
