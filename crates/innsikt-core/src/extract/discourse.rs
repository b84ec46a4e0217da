//! Discourse-level measures: coherence, terminology density, logical
//! connective patterns, and meta-concept domains

use std::collections::HashSet;

use crate::lexicon::Lexicon;
use crate::models::{Concept, LogicalPatterns, MetaDomain};
use crate::text::content_tokens;

/// Coherence score 0-10: connector phrases (capped at 4) plus average
/// adjacent-sentence token overlap scaled to 0-6
pub(crate) fn coherence(text: &str, lexicon: &Lexicon) -> f64 {
    let raw = text.trim();
    if raw.is_empty() {
        return 0.0;
    }

    let lower = raw.to_lowercase();

    let connector_count = lexicon
        .discourse
        .connectors
        .iter()
        .filter(|c| lower.contains(c.as_str()))
        .count();
    let connector_score = connector_count.min(4) as f64;

    let sentence_sets: Vec<HashSet<String>> = raw
        .split(['.', '!', '?', '…'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(sentence_tokens)
        .collect();

    let mut overlap_sum = 0.0;
    let mut pairs = 0u32;
    for window in sentence_sets.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if a.is_empty() || b.is_empty() {
            continue;
        }
        let intersection = a.intersection(b).count();
        let union = a.union(b).count();
        if union > 0 {
            overlap_sum += intersection as f64 / union as f64;
        }
        pairs += 1;
    }

    let avg_overlap = if pairs > 0 {
        overlap_sum / pairs as f64
    } else {
        0.0
    };
    let overlap_score = (avg_overlap * 6.0).clamp(0.0, 6.0);

    (connector_score + overlap_score).clamp(0.0, 10.0)
}

fn sentence_tokens(sentence: &str) -> HashSet<String> {
    sentence
        .to_lowercase()
        .chars()
        .map(|c| {
            if matches!(c, 'a'..='z' | 'æ' | 'ø' | 'å' | '0'..='9') {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Fraction of content tokens that look technical: 12+ chars, in the
/// technical word list, or carrying a technical suffix. Range 0-1.
pub(crate) fn terminology_density(text: &str, lexicon: &Lexicon) -> f64 {
    let tokens = content_tokens(text, lexicon);
    if tokens.is_empty() {
        return 0.0;
    }

    let lex = &lexicon.discourse;
    let technical_count = tokens
        .iter()
        .filter(|tok| {
            tok.chars().count() >= 12
                || lex.technical_words.iter().any(|w| w == *tok)
                || lex.technical_suffixes.iter().any(|suf| tok.ends_with(suf.as_str()))
        })
        .count();

    (technical_count as f64 / tokens.len() as f64).clamp(0.0, 1.0)
}

/// Counts of causal/inferential/contrastive/balancing connective phrases
pub(crate) fn logical_patterns(text: &str, lexicon: &Lexicon) -> LogicalPatterns {
    if text.trim().is_empty() {
        return LogicalPatterns::default();
    }

    let lower = text.to_lowercase();
    let lex = &lexicon.discourse;

    let count_all =
        |phrases: &[String]| phrases.iter().map(|p| lower.matches(p.as_str()).count() as u32).sum();

    LogicalPatterns {
        causal: count_all(&lex.causal),
        inferential: count_all(&lex.inferential),
        contrast: count_all(&lex.contrast),
        balancing: count_all(&lex.balancing),
    }
}

/// Map extracted concept keys into coarse meta-concept domains
pub(crate) fn meta_concepts(concepts: &[Concept], lexicon: &Lexicon) -> Vec<MetaDomain> {
    if concepts.is_empty() {
        return Vec::new();
    }

    let keys: HashSet<&str> = concepts.iter().map(|c| c.key.as_str()).collect();
    let lex = &lexicon.meta_concepts;

    let domains = [
        (MetaDomain::Body, &lex.body),
        (MetaDomain::Time, &lex.time),
        (MetaDomain::Work, &lex.work),
        (MetaDomain::Society, &lex.society),
        (MetaDomain::Technology, &lex.technology),
    ];

    domains
        .into_iter()
        .filter(|(_, words)| words.iter().any(|w| keys.contains(w.as_str())))
        .map(|(domain, _)| domain)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::concepts::extract_concepts;

    fn lexicon() -> Lexicon {
        Lexicon::builtin().unwrap()
    }

    #[test]
    fn test_coherence_zero_for_empty() {
        assert_eq!(coherence("", &lexicon()), 0.0);
        assert_eq!(coherence("   ", &lexicon()), 0.0);
    }

    #[test]
    fn test_coherence_counts_connectors() {
        // Single sentence: no adjacent pairs, so only connectors score.
        let score = coherence("jeg gjør det fordi det hjelper, derfor fortsetter jeg", &lexicon());
        assert_eq!(score, 2.0);
    }

    #[test]
    fn test_coherence_connector_cap() {
        let score = coherence(
            "fordi derfor dermed samtidig likevel mens derimot",
            &lexicon(),
        );
        assert_eq!(score, 4.0);
    }

    #[test]
    fn test_coherence_rewards_sentence_overlap() {
        let disjoint = coherence("Jeg liker fisk. Katten sover ute.", &lexicon());
        let overlapping = coherence("Jeg liker fisk. Jeg liker fisk.", &lexicon());
        assert!(overlapping > disjoint);
        assert!(overlapping <= 10.0);
    }

    #[test]
    fn test_terminology_density_range() {
        let lex = lexicon();
        assert_eq!(terminology_density("", &lex), 0.0);

        // "industrialisering" (12+ chars), "teknologi" (word list) vs plain words
        let density = terminology_density("industrialisering endrer teknologi raskt", &lex);
        assert!(density > 0.0 && density <= 1.0);

        let plain = terminology_density("katten sover ute hele natten", &lex);
        assert!(plain < density);
    }

    #[test]
    fn test_logical_pattern_counts() {
        let lp = logical_patterns(
            "det skjer fordi jeg utsetter, men det viser at jeg bryr meg",
            &lexicon(),
        );
        assert!(lp.causal >= 1);
        assert!(lp.contrast >= 1);
        assert_eq!(lp.inferential, 1);
    }

    #[test]
    fn test_meta_concepts_domains() {
        let lex = lexicon();
        let concepts = extract_concepts("stress på jobben foran skjermen", &lex);
        let domains = meta_concepts(&concepts, &lex);
        assert!(domains.contains(&MetaDomain::Body)); // "stress"
        assert!(!domains.contains(&MetaDomain::Society));
    }

    #[test]
    fn test_meta_concepts_empty() {
        assert!(meta_concepts(&[], &lexicon()).is_empty());
    }
}
