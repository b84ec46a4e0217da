//! Concept extraction and normalization
//!
//! Tokens are normalized to canonical concept keys with a small
//! suffix-stripping step for Norwegian inflections (longer endings first),
//! grouped and counted. Tokens with academic-sounding suffixes are
//! double-weighted. Each concept keeps up to 5 raw surface-form examples.

use crate::lexicon::Lexicon;
use crate::models::Concept;
use crate::text::content_tokens;

/// Inflectional endings stripped during normalization, longest first
const LONG_ENDINGS: [&str; 2] = ["ende", "ene"];
const SHORT_ENDINGS: [&str; 5] = ["ene", "ane", "er", "en", "et"];

/// Normalize a raw token to a concept key. Returns `None` for tokens that
/// do not make an interesting concept (too short, pure digits).
pub(crate) fn normalize_concept_token(token: &str) -> Option<String> {
    let mut t: String = token
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | 'æ' | 'ø' | 'å' | '0'..='9'))
        .collect();

    if t.chars().count() <= 2 || t.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if t.chars().count() > 5 {
        if let Some(ending) = LONG_ENDINGS.iter().find(|e| t.ends_with(**e)) {
            t.truncate(t.len() - ending.len());
        } else if t.chars().count() > 4 {
            if let Some(ending) = SHORT_ENDINGS.iter().find(|e| t.ends_with(**e)) {
                t.truncate(t.len() - ending.len());
            }
        }
    } else if t.chars().count() > 4 {
        if let Some(ending) = SHORT_ENDINGS.iter().find(|e| t.ends_with(**e)) {
            t.truncate(t.len() - ending.len());
        }
    }

    // Definite form on -a (jenta, boka)
    if t.chars().count() > 4 && t.ends_with('a') {
        t.pop();
    }

    if t.chars().count() <= 2 {
        return None;
    }

    Some(t)
}

/// Extract concepts from one text, sorted descending by count
pub(crate) fn extract_concepts(text: &str, lexicon: &Lexicon) -> Vec<Concept> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let tokens = content_tokens(text, lexicon);
    let mut concepts: Vec<Concept> = Vec::new();

    for raw in &tokens {
        let key = match normalize_concept_token(raw) {
            Some(k) if k.chars().count() > 3 => k,
            _ => continue,
        };

        let idx = match concepts.iter().position(|c| c.key == key) {
            Some(idx) => idx,
            None => {
                concepts.push(Concept {
                    key: key.clone(),
                    count: 0,
                    examples: Vec::new(),
                });
                concepts.len() - 1
            }
        };
        let entry = &mut concepts[idx];

        // Academic word forms weigh double.
        if lexicon
            .concepts
            .academic_suffixes
            .iter()
            .any(|suf| entry.key.ends_with(suf.as_str()))
        {
            entry.count += 2;
        }
        entry.count += 1;

        if entry.examples.len() < 5 && !entry.examples.iter().any(|e| e == raw) {
            entry.examples.push(raw.clone());
        }
    }

    concepts.sort_by(|a, b| b.count.cmp(&a.count));
    concepts
}

/// Merge two concept lists: counts are summed per key, examples capped at
/// 5 per key. Total counts are associative and commutative under merge.
pub fn merge_concepts(existing: &[Concept], incoming: &[Concept]) -> Vec<Concept> {
    let mut merged: Vec<Concept> = existing.to_vec();

    for concept in incoming {
        match merged.iter_mut().find(|c| c.key == concept.key) {
            Some(entry) => {
                entry.count += concept.count;
                for example in &concept.examples {
                    if entry.examples.len() < 5 && !entry.examples.iter().any(|e| e == example) {
                        entry.examples.push(example.clone());
                    }
                }
            }
            None => merged.push(concept.clone()),
        }
    }

    merged.sort_by(|a, b| b.count.cmp(&a.count));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_plural_endings() {
        assert_eq!(normalize_concept_token("tankene").as_deref(), Some("tank"));
        assert_eq!(normalize_concept_token("rutiner").as_deref(), Some("rutin"));
        assert_eq!(normalize_concept_token("arbeidet").as_deref(), Some("arbeid"));
    }

    #[test]
    fn test_normalize_strips_definite_a() {
        assert_eq!(normalize_concept_token("jenta").as_deref(), Some("jent"));
    }

    #[test]
    fn test_normalize_rejects_short_and_numeric() {
        assert_eq!(normalize_concept_token("på"), None);
        assert_eq!(normalize_concept_token("1234"), None);
        assert_eq!(normalize_concept_token("a1"), None);
    }

    #[test]
    fn test_extract_concepts_counts_and_examples() {
        let lexicon = Lexicon::builtin().unwrap();
        let concepts =
            extract_concepts("arbeidet krever struktur, og arbeidet former struktur", &lexicon);

        let work = concepts.iter().find(|c| c.key == "arbeid").unwrap();
        assert_eq!(work.count, 2);
        assert_eq!(work.examples, vec!["arbeidet".to_string()]);

        let structure = concepts.iter().find(|c| c.key == "struktur").unwrap();
        assert_eq!(structure.count, 2);
    }

    #[test]
    fn test_academic_suffix_boost() {
        let lexicon = Lexicon::builtin().unwrap();
        let concepts = extract_concepts("forståelse og fjell", &lexicon);

        let understanding = concepts.iter().find(|c| c.key == "forståelse").unwrap();
        assert_eq!(understanding.count, 3); // 1 + 2 boost for -else

        let mountain = concepts.iter().find(|c| c.key == "fjell").unwrap();
        assert_eq!(mountain.count, 1);

        // Boosted concept sorts first
        assert_eq!(concepts[0].key, "forståelse");
    }

    #[test]
    fn test_extract_concepts_empty_input() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(extract_concepts("", &lexicon).is_empty());
        assert!(extract_concepts("   ", &lexicon).is_empty());
    }

    #[test]
    fn test_merge_concepts_sums_counts() {
        let lexicon = Lexicon::builtin().unwrap();
        let a = extract_concepts("struktur og rutiner hjelper", &lexicon);
        let b = extract_concepts("struktur gir trygghet", &lexicon);

        let merged = merge_concepts(&a, &b);
        let structure = merged.iter().find(|c| c.key == "struktur").unwrap();

        let count_a = a.iter().find(|c| c.key == "struktur").unwrap().count;
        let count_b = b.iter().find(|c| c.key == "struktur").unwrap().count;
        assert_eq!(structure.count, count_a + count_b);
    }

    #[test]
    fn test_merge_concepts_caps_examples_at_five() {
        let make = |key: &str, examples: &[&str]| Concept {
            key: key.to_string(),
            count: 1,
            examples: examples.iter().map(|s| s.to_string()).collect(),
        };

        let a = make("tank", &["tanke", "tanken", "tankene"]);
        let b = make("tank", &["tanker", "tankes", "tankenes"]);

        let merged = merge_concepts(&[a], &[b]);
        assert_eq!(merged[0].examples.len(), 5);
    }
}
